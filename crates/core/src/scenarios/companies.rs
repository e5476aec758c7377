use async_trait::async_trait;

use crate::domain::Company;
use crate::errors::ScenarioFailure;
use crate::fixtures;
use crate::scenarios::{Resource, Scenario, ScenarioContext};

/// list → create → read → partial update → delete on `/api/companies`.
pub struct CompaniesLifecycle;

#[async_trait]
impl Scenario for CompaniesLifecycle {
    fn slug(&self) -> &'static str {
        "companies"
    }

    fn title(&self) -> &'static str {
        "Companies API"
    }

    fn section(&self) -> &'static str {
        "TESTING COMPANIES API"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        let resource = Resource::Companies;

        ctx.step(1, "Testing GET /api/companies");
        let companies = ctx.list(resource).await?;
        ctx.record(
            &resource.step("GET", false),
            true,
            format!("Retrieved {} companies", companies.len()),
        );

        ctx.step(2, "Testing POST /api/companies");
        let payload = fixtures::acme_company();
        let created: Company = ctx.create(resource, &resource.step("POST", false), &payload).await?;
        let id = created.id.clone();
        ctx.record(&resource.step("POST", false), true, format!("Created company with ID: {id}"));

        ctx.step(3, "Testing GET /api/companies/{id}");
        let fetched: Company = ctx.fetch(resource, id.as_str()).await?;
        let name_matches = if fetched.name == payload.name {
            Ok(format!("Retrieved company: {}", fetched.name))
        } else {
            Err(format!("expected name `{}`, got `{}`", payload.name, fetched.name))
        };
        ctx.check(&resource.step("GET", true), name_matches)?;

        ctx.step(4, "Testing PUT /api/companies/{id}");
        let patch = fixtures::acme_company_update();
        let updated: Company = ctx.update(resource, id.as_str(), &patch).await?;
        let patched = patch
            .verify(&payload, &updated)
            .map(|()| format!("Updated company name: {}", updated.name));
        ctx.check(&resource.step("PUT", true), patched)?;

        let reread: Company = ctx.fetch(resource, id.as_str()).await?;
        let persisted = patch
            .verify(&payload, &reread)
            .map(|()| format!("Stored company name: {}", reread.name));
        ctx.check(&format!("{} after update", resource.step("GET", true)), persisted)?;

        ctx.step(5, "Testing DELETE /api/companies/{id}");
        let confirmation = ctx.remove(resource, id.as_str()).await?;
        ctx.record(
            &resource.step("DELETE", true),
            true,
            format!("Deleted company successfully: {confirmation}"),
        );
        ctx.verify_removed(resource, id.as_str()).await?;

        Ok(())
    }
}
