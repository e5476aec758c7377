use async_trait::async_trait;

use crate::domain::{Company, QuotePatch, QuoteRecord};
use crate::errors::ScenarioFailure;
use crate::fixtures;
use crate::scenarios::{company_relation, Resource, Scenario, ScenarioContext};

/// Lifecycle of `/api/quotes` against a company created for the purpose.
pub struct QuotesLifecycle;

#[async_trait]
impl Scenario for QuotesLifecycle {
    fn slug(&self) -> &'static str {
        "quotes"
    }

    fn title(&self) -> &'static str {
        "Quotes API"
    }

    fn section(&self) -> &'static str {
        "TESTING QUOTES API"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        let resource = Resource::Quotes;

        ctx.step(0, "Creating test company for quotes");
        let company_payload = fixtures::quotes_company();
        let company: Company =
            ctx.create(Resource::Companies, "Create test company", &company_payload).await?;
        ctx.record("Create test company", true, format!("Company ID: {}", company.id));

        ctx.step(1, "Testing GET /api/quotes");
        let quotes = ctx.list(resource).await?;
        ctx.record(&resource.step("GET", false), true, format!("Retrieved {} quotes", quotes.len()));

        ctx.step(2, "Testing POST /api/quotes");
        let payload = fixtures::lifecycle_quote(company.id.clone(), ctx.options().today);
        let created: QuoteRecord =
            ctx.create(resource, &resource.step("POST", false), &payload).await?;
        let id = created.id.clone();
        ctx.record(
            &resource.step("POST", false),
            true,
            format!("Created quote with ID: {}", id.as_str()),
        );

        ctx.step(3, "Testing GET /api/quotes/{id}");
        let fetched: QuoteRecord = ctx.fetch(resource, id.as_str()).await?;
        ctx.record(
            &resource.step("GET", true),
            true,
            format!("Retrieved quote: {}", fetched.quote_number.as_deref().unwrap_or_default()),
        );
        ctx.soft_check(
            "Quote-Company relation",
            company_relation(fetched.companies.as_ref(), &company.name),
        );

        ctx.step(4, "Testing PUT /api/quotes/{id}");
        let patch = fixtures::lifecycle_quote_update();
        let updated: QuoteRecord = ctx.update(resource, id.as_str(), &patch).await?;
        let patched = verify_patch(&patch, &payload.quote_number, &updated).map(|()| {
            format!(
                "Updated quote total: ${}",
                updated.total_amount.map(|total| total.to_string()).unwrap_or_default()
            )
        });
        ctx.check(&resource.step("PUT", true), patched)?;

        ctx.step(5, "Testing DELETE /api/quotes/{id}");
        let confirmation = ctx.remove(resource, id.as_str()).await?;
        ctx.record(
            &resource.step("DELETE", true),
            true,
            format!("Deleted quote successfully: {confirmation}"),
        );
        ctx.verify_removed(resource, id.as_str()).await?;

        Ok(())
    }
}

fn verify_patch(patch: &QuotePatch, quote_number: &str, updated: &QuoteRecord) -> Result<(), String> {
    if patch.bill_to.is_some() && updated.bill_to != patch.bill_to {
        return Err(format!("billTo: expected {:?}, got {:?}", patch.bill_to, updated.bill_to));
    }
    if patch.notes.is_some() && updated.notes != patch.notes {
        return Err(format!("notes: expected {:?}, got {:?}", patch.notes, updated.notes));
    }
    if patch.total_amount.is_some() && updated.total_amount != patch.total_amount {
        return Err(format!(
            "totalAmount: expected {:?}, got {:?}",
            patch.total_amount, updated.total_amount
        ));
    }
    if updated.quote_number.as_deref() != Some(quote_number) {
        return Err(format!(
            "quoteNumber should be preserved as `{quote_number}`, got {:?}",
            updated.quote_number
        ));
    }
    Ok(())
}
