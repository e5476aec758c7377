pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod scenarios;

pub use client::{ApiClient, ApiResponse, ResponseBody};
pub use config::{ConfigError, ConfigOverrides, HarnessConfig, LoadOptions, LogFormat};
pub use domain::company::{Company, CompanyId};
pub use domain::line_item::{LineItem, Totals};
pub use domain::purchase_order::{PurchaseOrderId, PurchaseOrderStatus};
pub use domain::quote::{QuoteId, QuoteRecord};
pub use errors::{ClientError, FailureKind, ScenarioFailure, TransportError};
pub use report::Reporter;
pub use runner::{FailureReport, RunOptions, RunSummary, Runner, ScenarioOutcome};
pub use scenarios::{CheckRecord, Scenario, ScenarioContext, UnknownScenario};
