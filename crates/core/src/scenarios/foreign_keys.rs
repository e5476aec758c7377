use async_trait::async_trait;

use crate::domain::{Company, PurchaseOrderRecord, QuoteRecord};
use crate::errors::ScenarioFailure;
use crate::fixtures;
use crate::scenarios::{company_relation, Resource, Scenario, ScenarioContext};

/// One company referenced by both a quote and a purchase order; each read
/// must embed that company.
pub struct ForeignKeyRelationships;

#[async_trait]
impl Scenario for ForeignKeyRelationships {
    fn slug(&self) -> &'static str {
        "foreign-keys"
    }

    fn title(&self) -> &'static str {
        "Foreign Key Relationships"
    }

    fn section(&self) -> &'static str {
        "TESTING FOREIGN KEY RELATIONSHIPS"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        let company_payload = fixtures::relationship_company();
        let company: Company =
            ctx.create(Resource::Companies, "FK Test Setup", &company_payload).await?;
        ctx.record("FK Test Setup", true, format!("Company ID: {}", company.id));

        let quote_payload = fixtures::relationship_quote(company.id.clone());
        let quote: QuoteRecord = ctx
            .create(Resource::Quotes, &Resource::Quotes.step("POST", false), &quote_payload)
            .await?;
        let fetched_quote: QuoteRecord = ctx.fetch(Resource::Quotes, quote.id.as_str()).await?;
        ctx.soft_check(
            "Quote-Company FK",
            company_relation(fetched_quote.companies.as_ref(), &company_payload.name)
                .map(|_| "Foreign key relationship working".to_string()),
        );

        let order_payload = fixtures::relationship_purchase_order(
            company.id.clone(),
            quote.id.clone(),
            &quote_payload.quote_number,
        );
        let order: PurchaseOrderRecord = ctx
            .create(
                Resource::PurchaseOrders,
                &Resource::PurchaseOrders.step("POST", false),
                &order_payload,
            )
            .await?;
        let fetched_order: PurchaseOrderRecord =
            ctx.fetch(Resource::PurchaseOrders, order.id.as_str()).await?;
        ctx.soft_check(
            "PO-Company FK",
            company_relation(fetched_order.companies.as_ref(), &company_payload.name)
                .map(|_| "Foreign key relationship working".to_string()),
        );

        Ok(())
    }
}
