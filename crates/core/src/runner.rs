use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::errors::{FailureKind, ScenarioFailure};
use crate::report::Reporter;
use crate::scenarios::{CheckRecord, Scenario, ScenarioContext};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub verify_deletes: bool,
    /// Date stamped into generated quote and purchase order numbers.
    pub today: NaiveDate,
}

impl RunOptions {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self { verify_deletes: config.run.verify_deletes, today: Local::now().date_naive() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub step: String,
    pub message: String,
}

impl From<&ScenarioFailure> for FailureReport {
    fn from(failure: &ScenarioFailure) -> Self {
        Self { kind: failure.kind(), step: failure.step().to_string(), message: failure.detail() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub slug: &'static str,
    pub title: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReport>,
    pub checks: Vec<CheckRecord>,
    pub elapsed_ms: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub command: &'static str,
    pub status: &'static str,
    pub summary: String,
    pub run_id: Uuid,
    pub api_base: String,
    pub total_elapsed_ms: u64,
    pub scenarios: Vec<ScenarioOutcome>,
}

impl RunSummary {
    pub fn new(run_id: Uuid, api_base: String, scenarios: Vec<ScenarioOutcome>, total_elapsed_ms: u64) -> Self {
        let passed = scenarios.iter().filter(|outcome| outcome.passed).count();
        let failed = scenarios.len() - passed;
        Self {
            command: "run",
            status: if failed == 0 { "pass" } else { "fail" },
            summary: format!("run: {passed} passed, {failed} failed in {total_elapsed_ms}ms"),
            run_id,
            api_base,
            total_elapsed_ms,
            scenarios,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|outcome| outcome.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|outcome| outcome.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    /// 0 when every scenario passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|error| {
            format!(
                "{{\"command\":\"run\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        })
    }
}

/// Runs scenarios one after another against a single deployment.
pub struct Runner {
    client: ApiClient,
    reporter: Reporter,
    options: RunOptions,
    run_id: Uuid,
}

impl Runner {
    pub fn new(client: ApiClient, options: RunOptions) -> Self {
        Self { client, reporter: Reporter, options, run_id: Uuid::new_v4() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub async fn run_all(&self, scenarios: &[Box<dyn Scenario>]) -> RunSummary {
        let started = Instant::now();
        self.reporter.banner(self.client.api_base());
        info!(
            event_name = "harness.run.start",
            run_id = %self.run_id,
            api_base = self.client.api_base(),
            scenarios = scenarios.len(),
            "starting scenario run"
        );

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run_scenario(scenario.as_ref()).await);
        }

        let results: Vec<(&str, bool)> =
            outcomes.iter().map(|outcome| (outcome.title, outcome.passed)).collect();
        self.reporter.summary(&results);

        let summary = RunSummary::new(
            self.run_id,
            self.client.api_base().to_string(),
            outcomes,
            started.elapsed().as_millis() as u64,
        );
        info!(
            event_name = "harness.run.finished",
            run_id = %self.run_id,
            passed = summary.passed_count(),
            failed = summary.failed_count(),
            "scenario run finished"
        );
        summary
    }

    /// Never panics or propagates: every failure ends up in the outcome.
    pub async fn run_scenario(&self, scenario: &dyn Scenario) -> ScenarioOutcome {
        let started = Instant::now();
        self.reporter.section(scenario.section());

        let mut ctx = ScenarioContext::new(&self.client, self.reporter, &self.options, self.run_id);
        let result = scenario.run(&mut ctx).await;

        if let Err(failure) = &result {
            self.reporter.record(failure.step(), false, &failure.detail());
            info!(
                event_name = "harness.scenario.aborted",
                run_id = %self.run_id,
                scenario = scenario.slug(),
                failure_kind = failure.kind().as_str(),
                step = failure.step(),
                "scenario aborted"
            );
        }

        ctx.teardown().await;

        let soft_failures = ctx.soft_failures();
        let failure = result.err().map(|failure| FailureReport::from(&failure));
        let mut checks = ctx.into_checks();
        if let Some(report) = &failure {
            checks.push(CheckRecord {
                name: report.step.clone(),
                passed: false,
                details: report.message.clone(),
            });
        }

        let passed = failure.is_none() && soft_failures == 0;
        info!(
            event_name = "harness.scenario.finished",
            run_id = %self.run_id,
            scenario = scenario.slug(),
            passed = passed,
            "scenario finished"
        );

        ScenarioOutcome {
            slug: scenario.slug(),
            title: scenario.title(),
            passed,
            failure,
            checks,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}
