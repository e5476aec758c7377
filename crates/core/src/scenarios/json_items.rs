use async_trait::async_trait;

use crate::domain::{compare_items, Company, QuoteRecord};
use crate::errors::ScenarioFailure;
use crate::fixtures;
use crate::scenarios::{Resource, Scenario, ScenarioContext};

/// Stores a quote whose line items carry non-ASCII text and fractional
/// amounts, then checks they decode back unchanged and in order.
pub struct LineItemRoundTrip;

#[async_trait]
impl Scenario for LineItemRoundTrip {
    fn slug(&self) -> &'static str {
        "json-items"
    }

    fn title(&self) -> &'static str {
        "JSON Parsing"
    }

    fn section(&self) -> &'static str {
        "TESTING JSON PARSING & CURRENCY CALCULATIONS"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        let company: Company =
            ctx.create(Resource::Companies, "JSON Test Setup", &fixtures::json_company()).await?;
        ctx.record("JSON Test Setup", true, format!("Company ID: {}", company.id));

        let payload = fixtures::json_quote(company.id.clone());
        let created: QuoteRecord = ctx.create(Resource::Quotes, "JSON Items Storage", &payload).await?;
        ctx.record(
            "JSON Items Storage",
            true,
            format!("Stored {} line items on quote {}", payload.items.len(), created.id.as_str()),
        );

        let fetched: QuoteRecord = ctx.fetch(Resource::Quotes, created.id.as_str()).await?;
        let round_trip = fetched
            .line_items()
            .map_err(|error| format!("items could not be decoded: {error}"))
            .and_then(|stored| {
                compare_items(&payload.items, &stored)?;
                Ok(format!("{} items decoded with every field and position intact", stored.len()))
            });
        ctx.check("JSON Items Retrieval", round_trip)?;

        Ok(())
    }
}
