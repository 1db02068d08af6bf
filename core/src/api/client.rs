//! Transport to the log-hosting service's GraphQL endpoint.

use serde::Deserialize;
use serde_json::Value;

use rota_types::ApiConfig;

use super::error::ApiError;

/// Executes GraphQL documents against the log service.
///
/// The pipeline is generic over this trait so tests can substitute canned
/// responses for the network.
pub trait LogClient: Send + Sync {
    fn query(
        &self,
        document: &str,
        variables: Value,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

#[derive(Deserialize)]
struct GqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GqlError>>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

/// `reqwest`-backed client with bearer authentication.
#[derive(Debug, Clone)]
pub struct GqlClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl GqlClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.api_url.clone(),
            token: config.api_token.clone(),
        }
    }
}

impl LogClient for GqlClient {
    async fn query(&self, document: &str, variables: Value) -> Result<Value, ApiError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: GqlEnvelope = response.json().await?;
        if let Some(errors) = envelope.errors {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::GraphQl(joined));
        }
        envelope.data.ok_or(ApiError::MissingField("data"))
    }
}
