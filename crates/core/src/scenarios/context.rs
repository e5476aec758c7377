use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::errors::ScenarioFailure;
use crate::report::Reporter;
use crate::runner::RunOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Companies,
    Quotes,
    PurchaseOrders,
}

impl Resource {
    /// Path segment under `/api`.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Quotes => "quotes",
            Self::PurchaseOrders => "purchase-orders",
        }
    }

    pub fn collection_path(&self) -> &'static str {
        match self {
            Self::Companies => "/companies",
            Self::Quotes => "/quotes",
            Self::PurchaseOrders => "/purchase-orders",
        }
    }

    /// Display form only; requests go through [`ApiClient`] segments.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// Step label as printed, e.g. `GET /api/quotes/{id}`.
    pub fn step(&self, method: &str, by_id: bool) -> String {
        let suffix = if by_id { "/{id}" } else { "" };
        format!("{method} /api{}{suffix}", self.collection_path())
    }
}

/// Records that carry a server-assigned id.
pub trait StoredRecord: DeserializeOwned {
    fn record_id(&self) -> &str;
}

impl StoredRecord for crate::domain::Company {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl StoredRecord for crate::domain::QuoteRecord {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl StoredRecord for crate::domain::PurchaseOrderRecord {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub resource: Resource,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

/// Per-scenario state: the shared client, the checks recorded so far and the
/// fixtures still alive on the server.
pub struct ScenarioContext<'a> {
    client: &'a ApiClient,
    reporter: Reporter,
    options: &'a RunOptions,
    run_id: Uuid,
    fixtures: Vec<Fixture>,
    checks: Vec<CheckRecord>,
    soft_failures: usize,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(client: &'a ApiClient, reporter: Reporter, options: &'a RunOptions, run_id: Uuid) -> Self {
        Self {
            client,
            reporter,
            options,
            run_id,
            fixtures: Vec::new(),
            checks: Vec::new(),
            soft_failures: 0,
        }
    }

    pub fn options(&self) -> &RunOptions {
        self.options
    }

    pub fn step(&self, number: u32, description: &str) {
        self.reporter.step(number, description);
    }

    pub fn record(&mut self, name: &str, passed: bool, details: impl Into<String>) {
        let details = details.into();
        self.reporter.record(name, passed, &details);
        self.checks.push(CheckRecord { name: name.to_string(), passed, details });
    }

    /// Check that stops the scenario when it fails. The failure line is
    /// printed by the runner, only passes are recorded here.
    pub fn check(
        &mut self,
        name: &str,
        result: Result<String, String>,
    ) -> Result<(), ScenarioFailure> {
        match result {
            Ok(details) => {
                self.record(name, true, details);
                Ok(())
            }
            Err(detail) => Err(ScenarioFailure::assertion(name, detail)),
        }
    }

    /// Check whose failure is logged but lets the scenario carry on. The
    /// scenario still ends up failed.
    pub fn soft_check(&mut self, name: &str, result: Result<String, String>) {
        match result {
            Ok(details) => self.record(name, true, details),
            Err(details) => {
                self.soft_failures += 1;
                self.record(name, false, details);
            }
        }
    }

    pub fn soft_failures(&self) -> usize {
        self.soft_failures
    }

    pub fn into_checks(self) -> Vec<CheckRecord> {
        self.checks
    }

    pub fn checks(&self) -> &[CheckRecord] {
        &self.checks
    }

    pub fn live_fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub async fn list(&mut self, resource: Resource) -> Result<Vec<Value>, ScenarioFailure> {
        let step = resource.step("GET", false);
        let response = self
            .client
            .get(&[resource.segment()])
            .await
            .map_err(|error| ScenarioFailure::network(&step, error))?;

        match response.expect_ok(&step)? {
            Value::Array(entries) => Ok(entries),
            other => Err(ScenarioFailure::unexpected(
                &step,
                format!("expected a JSON array, got `{other}`"),
            )),
        }
    }

    /// Creates a record and registers it for teardown.
    pub async fn create<P, R>(
        &mut self,
        resource: Resource,
        step: &str,
        payload: &P,
    ) -> Result<R, ScenarioFailure>
    where
        P: Serialize + Sync + ?Sized,
        R: StoredRecord,
    {
        let response = self
            .client
            .post(&[resource.segment()], payload)
            .await
            .map_err(|error| ScenarioFailure::network(step, error))?;

        let record: R = response.decode(step)?;
        let id = record.record_id().trim();
        if id.is_empty() {
            return Err(ScenarioFailure::unexpected(step, "response is missing a server-assigned id"));
        }

        self.fixtures.push(Fixture { resource, id: id.to_string() });
        debug!(
            event_name = "harness.fixture.created",
            run_id = %self.run_id,
            resource = resource.collection_path(),
            fixture_id = id,
            "fixture registered"
        );
        Ok(record)
    }

    pub async fn fetch<R: StoredRecord>(
        &mut self,
        resource: Resource,
        id: &str,
    ) -> Result<R, ScenarioFailure> {
        let step = resource.step("GET", true);
        let response = self
            .client
            .get(&[resource.segment(), id])
            .await
            .map_err(|error| ScenarioFailure::network(&step, error))?;
        response.decode(&step)
    }

    pub async fn update<P, R>(
        &mut self,
        resource: Resource,
        id: &str,
        patch: &P,
    ) -> Result<R, ScenarioFailure>
    where
        P: Serialize + Sync + ?Sized,
        R: StoredRecord,
    {
        let step = resource.step("PUT", true);
        let response = self
            .client
            .put(&[resource.segment(), id], patch)
            .await
            .map_err(|error| ScenarioFailure::network(&step, error))?;
        response.decode(&step)
    }

    /// Deletes a record as a tested step and releases it from teardown.
    /// Returns the confirmation body.
    pub async fn remove(&mut self, resource: Resource, id: &str) -> Result<Value, ScenarioFailure> {
        let step = resource.step("DELETE", true);
        let response = self
            .client
            .delete(&[resource.segment(), id])
            .await
            .map_err(|error| ScenarioFailure::network(&step, error))?;
        let confirmation = response.expect_ok(&step)?;
        self.release(resource, id);
        Ok(confirmation)
    }

    /// Follow-up read after a tested delete. Only runs when delete
    /// verification is enabled; the record must no longer come back.
    pub async fn verify_removed(&mut self, resource: Resource, id: &str) -> Result<(), ScenarioFailure> {
        if !self.options.verify_deletes {
            return Ok(());
        }

        let check = format!("{} removed", resource.step("GET", true));
        let response = self
            .client
            .get(&[resource.segment(), id])
            .await
            .map_err(|error| ScenarioFailure::network(&check, error))?;

        let still_there = response.is_ok()
            && response.json().and_then(|body| body.get("id")).and_then(Value::as_str) == Some(id);
        let result = if still_there {
            Err(format!("record {id} is still retrievable after delete"))
        } else {
            Ok(format!("follow-up read returned status {}", response.status))
        };
        self.check(&check, result)
    }

    fn release(&mut self, resource: Resource, id: &str) {
        self.fixtures.retain(|fixture| !(fixture.resource == resource && fixture.id == id));
    }

    /// Best-effort delete of every fixture still registered, newest first.
    /// Failures are logged and never change the scenario outcome.
    pub async fn teardown(&mut self) {
        while let Some(fixture) = self.fixtures.pop() {
            let path = fixture.resource.item_path(&fixture.id);
            match self.client.delete(&[fixture.resource.segment(), fixture.id.as_str()]).await {
                Ok(response) if response.is_ok() => debug!(
                    event_name = "harness.fixture.deleted",
                    run_id = %self.run_id,
                    path = %path,
                    "fixture cleaned up"
                ),
                Ok(response) => warn!(
                    event_name = "harness.fixture.cleanup_failed",
                    run_id = %self.run_id,
                    path = %path,
                    status = response.status,
                    "fixture cleanup returned unexpected status"
                ),
                Err(error) => warn!(
                    event_name = "harness.fixture.cleanup_failed",
                    run_id = %self.run_id,
                    path = %path,
                    error = %error,
                    "fixture cleanup request failed"
                ),
            }
        }
    }
}
