//! HTTP client for the object-relational service
//!
//! Speaks the host's call-style JSON RPC: every operation is a POST of
//! `{model, method, args}` answered by a `{result}` or `{error}` envelope.

use crate::consts::{dashboard, http};
use crate::environment::Environment;
use crate::orm::DataService;
use crate::orm::error::DataServiceError;
use crate::orm::records::{DomainTerm, RawRecord};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::{Value, json};
use std::collections::BTreeMap;

// User-Agent string with client version
const USER_AGENT: &str = concat!("projectdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OrmClient {
    client: Client,
    environment: Environment,
}

impl OrmClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.service_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, DataServiceError> {
        if !response.status().is_success() {
            return Err(DataServiceError::from_response(response).await);
        }
        Ok(response)
    }

    /// Unwraps the `{result}` / `{error: {message}}` envelope.
    fn decode_envelope(envelope: Value) -> Result<Value, DataServiceError> {
        if let Some(error) = envelope.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unspecified service error")
                .to_string();
            return Err(DataServiceError::Service(message));
        }
        match envelope {
            Value::Object(mut fields) => fields
                .remove("result")
                .ok_or_else(|| DataServiceError::Service("response has no result".to_string())),
            other => Err(DataServiceError::Service(format!(
                "unexpected response shape: {other}"
            ))),
        }
    }

    /// Invoke `method` on `model` with positional `args`.
    async fn call(&self, model: &str, method: &str, args: Value) -> Result<Value, DataServiceError> {
        let url = self.build_url(http::CALL_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&json!({
                "model": model,
                "method": method,
                "args": args,
            }))
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let envelope: Value = response.json().await?;
        Self::decode_envelope(envelope)
    }
}

#[async_trait::async_trait]
impl DataService for OrmClient {
    async fn fetch_aggregates(
        &self,
        model: &str,
    ) -> Result<BTreeMap<String, f64>, DataServiceError> {
        let result = self
            .call(model, dashboard::AGGREGATES_METHOD, json!([]))
            .await?;
        serde_json::from_value(result).map_err(DataServiceError::Decode)
    }

    async fn fetch_kpis(&self) -> Result<BTreeMap<String, f64>, DataServiceError> {
        let result = self
            .call(dashboard::REPORTING_MODEL, dashboard::KPIS_METHOD, json!([]))
            .await?;
        serde_json::from_value(result).map_err(DataServiceError::Decode)
    }

    async fn fetch_records(
        &self,
        model: &str,
        filter: &[DomainTerm],
        fields: &[String],
    ) -> Result<Vec<RawRecord>, DataServiceError> {
        let result = self
            .call(
                model,
                dashboard::SEARCH_READ_METHOD,
                json!([filter, fields]),
            )
            .await?;
        serde_json::from_value(result).map_err(DataServiceError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_without_duplicate_slashes() {
        let client = OrmClient::new(Environment::Local);
        assert_eq!(
            client.build_url("/web/dataset/call_kw"),
            "http://localhost:8069/web/dataset/call_kw"
        );
    }

    #[test]
    fn decodes_result_envelope() {
        let result = OrmClient::decode_envelope(json!({"result": {"total_income": 10.0}}))
            .expect("envelope should decode");
        assert_eq!(result, json!({"total_income": 10.0}));
    }

    #[test]
    fn decodes_error_envelope() {
        let err = OrmClient::decode_envelope(json!({"error": {"message": "no such model"}}))
            .expect_err("error envelope should fail");
        assert!(matches!(err, DataServiceError::Service(msg) if msg == "no such model"));
    }

    #[test]
    fn missing_result_is_a_service_error() {
        let err = OrmClient::decode_envelope(json!({})).expect_err("empty envelope should fail");
        assert!(matches!(err, DataServiceError::Service(_)));
    }
}
