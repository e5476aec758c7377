//! Thin JSON client over the `/api` surface of a deployment.
//!
//! Every call returns the status code and the body, parsed as JSON when it
//! parses and kept as raw text otherwise. Transport problems (refused
//! connections, DNS, timeouts) come back as [`TransportError`] so a scenario
//! can log them and stop without taking the process down.

use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::TargetConfig;
use crate::errors::{ClientError, ScenarioFailure, TransportError};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    api_base: String,
    timeout: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
    pub raw: String,
}

impl ApiResponse {
    pub fn from_raw(status: u16, raw: String) -> Self {
        let body = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.clone()),
        };
        Self { status, body, raw }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Requires a 200 with a JSON body.
    pub fn expect_ok(self, step: &str) -> Result<Value, ScenarioFailure> {
        if !self.is_ok() {
            return Err(ScenarioFailure::UnexpectedStatus {
                step: step.to_string(),
                status: self.status,
                body: self.raw,
            });
        }

        match self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => Err(ScenarioFailure::unexpected(
                step,
                format!("response body is not JSON: {text}"),
            )),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, step: &str) -> Result<T, ScenarioFailure> {
        let value = self.expect_ok(step)?;
        serde_json::from_value(value)
            .map_err(|error| ScenarioFailure::unexpected(step, error.to_string()))
    }
}

impl ApiClient {
    pub fn new(target: &TargetConfig) -> Result<Self, ClientError> {
        let api_base = target.api_base();
        let base = Url::parse(&api_base)
            .map_err(|source| ClientError::InvalidBaseUrl { url: api_base.clone(), source })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::OpaqueBaseUrl(api_base));
        }

        let timeout = target.timeout();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base, api_base, timeout })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL for `segments` under the API root. Each segment is
    /// percent-encoded on its own, so an id never adds path components.
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get(&self, segments: &[&str]) -> Result<ApiResponse, TransportError> {
        self.send::<Value>(Method::GET, segments, None).await
    }

    pub async fn post<T: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<ApiResponse, TransportError> {
        self.send(Method::POST, segments, Some(body)).await
    }

    pub async fn put<T: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<ApiResponse, TransportError> {
        self.send(Method::PUT, segments, Some(body)).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<ApiResponse, TransportError> {
        self.send::<Value>(Method::DELETE, segments, None).await
    }

    async fn send<T: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&T>,
    ) -> Result<ApiResponse, TransportError> {
        let method_name = method_name(&method);
        let started = Instant::now();
        let path = format!("/{}", segments.join("/"));

        let mut request = self.http.request(method, self.url_for(segments));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response =
            request.send().await.map_err(|error| self.classify(method_name, &path, &error))?;
        let status = response.status().as_u16();
        let raw =
            response.text().await.map_err(|error| self.classify(method_name, &path, &error))?;

        debug!(
            event_name = "harness.http.request",
            method = method_name,
            path = %path,
            status = status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request completed"
        );

        Ok(ApiResponse::from_raw(status, raw))
    }

    fn classify(&self, method: &'static str, path: &str, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                method,
                path: path.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else if error.is_connect() {
            TransportError::Connect { method, path: path.to_string(), message: error.to_string() }
        } else {
            TransportError::Request { method, path: path.to_string(), message: error.to_string() }
        }
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "OTHER",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::TargetConfig;
    use crate::errors::{ClientError, FailureKind};

    use super::{ApiClient, ApiResponse, ResponseBody};

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&TargetConfig { base_url: base_url.to_string(), timeout_secs: 10 })
            .expect("client should build")
    }

    #[test]
    fn ids_are_encoded_as_a_single_path_segment() {
        let client = client("http://localhost:3000/");

        assert_eq!(
            client.url_for(&["companies"]).as_str(),
            "http://localhost:3000/api/companies"
        );
        assert_eq!(
            client.url_for(&["quotes", "1718000000000_abc123def"]).as_str(),
            "http://localhost:3000/api/quotes/1718000000000_abc123def"
        );
        assert_eq!(
            client.url_for(&["purchase-orders", "a/b?c#d"]).as_str(),
            "http://localhost:3000/api/purchase-orders/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn base_url_that_does_not_parse_is_rejected() {
        let error = ApiClient::new(&TargetConfig {
            base_url: "http://exa mple.com".to_string(),
            timeout_secs: 10,
        })
        .expect_err("space in host should not parse");
        assert!(matches!(error, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn json_bodies_are_parsed_and_text_is_kept_raw() {
        let parsed = ApiResponse::from_raw(200, "{\"success\":true}".to_string());
        assert_eq!(parsed.body, ResponseBody::Json(json!({ "success": true })));

        let text = ApiResponse::from_raw(502, "Bad Gateway".to_string());
        assert_eq!(text.body, ResponseBody::Text("Bad Gateway".to_string()));
        assert!(text.json().is_none());
    }

    #[test]
    fn expect_ok_rejects_non_200_with_raw_body() {
        let response = ApiResponse::from_raw(500, "{\"error\":\"db down\"}".to_string());
        let failure = response.expect_ok("GET /api/companies").expect_err("500 should fail");

        assert_eq!(failure.kind(), FailureKind::UnexpectedStatus);
        assert!(failure.detail().contains("db down"));
    }

    #[test]
    fn expect_ok_rejects_non_json_success_bodies() {
        let response = ApiResponse::from_raw(200, "<html>".to_string());
        let failure = response.expect_ok("GET /api/quotes").expect_err("html should fail");
        assert_eq!(failure.kind(), FailureKind::Unexpected);
    }

    #[test]
    fn decode_reports_shape_mismatch_as_unexpected() {
        #[derive(Debug, serde::Deserialize)]
        struct Record {
            #[allow(dead_code)]
            id: String,
        }

        let response = ApiResponse::from_raw(200, "{\"name\":\"no id\"}".to_string());
        let failure = response.decode::<Record>("POST /api/companies").expect_err("missing id");
        assert_eq!(failure.kind(), FailureKind::Unexpected);
    }
}
