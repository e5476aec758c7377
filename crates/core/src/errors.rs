use serde::Serialize;
use thiserror::Error;

/// The API client could not be set up from the target config.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("api base `{url}` is not a valid URL: {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },
    #[error("api base `{0}` cannot carry path segments")]
    OpaqueBaseUrl(String),
    #[error("http client could not be built: {0}")]
    Http(#[from] reqwest::Error),
}

/// Request never produced an HTTP response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{method} {path} timed out after {timeout_secs}s")]
    Timeout { method: &'static str, path: String, timeout_secs: u64 },
    #[error("{method} {path} could not connect: {message}")]
    Connect { method: &'static str, path: String, message: String },
    #[error("{method} {path} failed: {message}")]
    Request { method: &'static str, path: String, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnexpectedStatus,
    Network,
    Unexpected,
    Assertion,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnexpectedStatus => "unexpected_status",
            Self::Network => "network",
            Self::Unexpected => "unexpected",
            Self::Assertion => "assertion",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScenarioFailure {
    #[error("{step}: Status: {status}, Response: {body}")]
    UnexpectedStatus { step: String, status: u16, body: String },
    #[error("{step}: Network error: {error}")]
    Network {
        step: String,
        #[source]
        error: TransportError,
    },
    #[error("{step}: Unexpected error: {message}")]
    Unexpected { step: String, message: String },
    #[error("{check}: {detail}")]
    Assertion { check: String, detail: String },
}

impl ScenarioFailure {
    pub fn network(step: impl Into<String>, error: TransportError) -> Self {
        Self::Network { step: step.into(), error }
    }

    pub fn unexpected(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected { step: step.into(), message: message.into() }
    }

    pub fn assertion(check: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Assertion { check: check.into(), detail: detail.into() }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnexpectedStatus { .. } => FailureKind::UnexpectedStatus,
            Self::Network { .. } => FailureKind::Network,
            Self::Unexpected { .. } => FailureKind::Unexpected,
            Self::Assertion { .. } => FailureKind::Assertion,
        }
    }

    /// Name of the step or check the failure was raised from.
    pub fn step(&self) -> &str {
        match self {
            Self::UnexpectedStatus { step, .. }
            | Self::Network { step, .. }
            | Self::Unexpected { step, .. } => step,
            Self::Assertion { check, .. } => check,
        }
    }

    /// Detail text without the step prefix, as printed under a FAIL line.
    pub fn detail(&self) -> String {
        match self {
            Self::UnexpectedStatus { status, body, .. } => {
                format!("Status: {status}, Response: {body}")
            }
            Self::Network { error, .. } => format!("Network error: {error}"),
            Self::Unexpected { message, .. } => format!("Unexpected error: {message}"),
            Self::Assertion { detail, .. } => detail.clone(),
        }
    }
}

impl From<serde_json::Error> for ScenarioFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::unexpected("decode", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{FailureKind, ScenarioFailure, TransportError};

    #[test]
    fn network_failures_are_classified_separately_from_status_failures() {
        let network = ScenarioFailure::network(
            "GET /api/companies",
            TransportError::Connect {
                method: "GET",
                path: "/companies".to_owned(),
                message: "connection refused".to_owned(),
            },
        );
        let status = ScenarioFailure::UnexpectedStatus {
            step: "GET /api/companies".to_owned(),
            status: 500,
            body: "{\"error\":\"boom\"}".to_owned(),
        };

        assert_eq!(network.kind(), FailureKind::Network);
        assert_eq!(status.kind(), FailureKind::UnexpectedStatus);
        assert_eq!(network.step(), "GET /api/companies");
    }

    #[test]
    fn status_failure_detail_carries_status_and_raw_body() {
        let failure = ScenarioFailure::UnexpectedStatus {
            step: "POST /api/quotes".to_owned(),
            status: 500,
            body: "{\"error\":\"insert failed\"}".to_owned(),
        };

        assert_eq!(failure.detail(), "Status: 500, Response: {\"error\":\"insert failed\"}");
        assert_eq!(
            failure.to_string(),
            "POST /api/quotes: Status: 500, Response: {\"error\":\"insert failed\"}"
        );
    }

    #[test]
    fn timeout_message_names_the_bound() {
        let error = TransportError::Timeout {
            method: "PUT",
            path: "/quotes/q-1".to_owned(),
            timeout_secs: 10,
        };
        assert_eq!(error.to_string(), "PUT /quotes/q-1 timed out after 10s");
        assert_eq!(
            ScenarioFailure::network("PUT /api/quotes/{id}", error).detail(),
            "Network error: PUT /quotes/q-1 timed out after 10s"
        );
    }

    #[test]
    fn json_errors_map_to_unexpected() {
        let error = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("malformed json should fail");
        let failure = ScenarioFailure::from(error);
        assert_eq!(failure.kind(), FailureKind::Unexpected);
        assert_eq!(FailureKind::Unexpected.as_str(), "unexpected");
    }
}
