//! HTTP client for the navigation dispatcher

use crate::actions::error::NavigationError;
use crate::actions::{ActionRequest, NavigationService};
use crate::consts::http;
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder};

const USER_AGENT: &str = concat!("projectdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ActionClient {
    client: Client,
    environment: Environment,
}

impl ActionClient {
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

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.service_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl NavigationService for ActionClient {
    async fn dispatch(&self, action: ActionRequest) -> Result<(), NavigationError> {
        let url = self.build_url(http::ACTION_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&action)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NavigationError::from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_from_the_environment() {
        let client = ActionClient::new(Environment::Local);
        assert_eq!(
            client.build_url("web/action/dispatch"),
            "http://localhost:8069/web/action/dispatch"
        );
    }
}
