pub mod companies;
pub mod context;
pub mod foreign_keys;
pub mod json_items;
pub mod purchase_orders;
pub mod quotes;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CompanyRef;
use crate::errors::ScenarioFailure;

pub use context::{CheckRecord, Fixture, Resource, ScenarioContext, StoredRecord};

#[async_trait]
pub trait Scenario: Send + Sync {
    /// Stable identifier used on the command line.
    fn slug(&self) -> &'static str;

    /// Name used in the summary, e.g. `Companies API`.
    fn title(&self) -> &'static str;

    /// Banner printed before the scenario starts.
    fn section(&self) -> &'static str;

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure>;
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown scenario `{slug}` (expected one of: {known})")]
pub struct UnknownScenario {
    pub slug: String,
    pub known: String,
}

/// Every scenario in execution order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(companies::CompaniesLifecycle),
        Box::new(quotes::QuotesLifecycle),
        Box::new(purchase_orders::PurchaseOrdersLifecycle),
        Box::new(json_items::LineItemRoundTrip),
        Box::new(foreign_keys::ForeignKeyRelationships),
    ]
}

/// Scenarios named by `slugs`, kept in execution order. Empty selects all.
pub fn select(slugs: &[String]) -> Result<Vec<Box<dyn Scenario>>, UnknownScenario> {
    let scenarios = all();
    if slugs.is_empty() {
        return Ok(scenarios);
    }

    if let Some(unknown) =
        slugs.iter().find(|slug| !scenarios.iter().any(|scenario| scenario.slug() == slug.as_str()))
    {
        let known = scenarios.iter().map(|scenario| scenario.slug()).collect::<Vec<_>>().join(", ");
        return Err(UnknownScenario { slug: unknown.clone(), known });
    }

    Ok(scenarios
        .into_iter()
        .filter(|scenario| slugs.iter().any(|slug| slug == scenario.slug()))
        .collect())
}

/// Outcome of the embedded-company check on a quote or purchase order read.
pub(crate) fn company_relation(
    relation: Option<&CompanyRef>,
    expected_name: &str,
) -> Result<String, String> {
    match relation.and_then(|company| company.name.as_deref()) {
        Some(name) if name == expected_name => Ok(format!("Company: {name}")),
        Some(name) => Err(format!("Company relation name `{name}` != `{expected_name}`")),
        None => Err("Company relation not found".to_string()),
    }
}
