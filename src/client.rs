use crate::auth::ApiKey;
use crate::config::Settings;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ErrorResponse};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Sends one endpoint and hands back its response body.
///
/// Operations are written against this trait so they can be exercised with
/// canned responses instead of the network.
#[async_trait]
pub trait Requestor: Send + Sync {
    /// Issue the request. `Ok(None)` means the response had no body (204).
    async fn execute(&self, endpoint: &Endpoint) -> Result<Option<Value>, ApiError>;

    /// Issue the request and decode the body into `T`.
    async fn request<T>(&self, endpoint: &Endpoint) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let body = self.execute(endpoint).await?.unwrap_or(Value::Null);
        Ok(serde_json::from_value(body)?)
    }
}

pub struct ApiClient {
    pub base_url: String,
    pub client: Client,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let key = ApiKey::from_settings(settings)?;
        debug!(key_id = key.key_id(), "signing API token");
        Self::with_token(&settings.api_base_url, &key.token()?)
    }

    /// Client sending `token` as bearer on every request.
    pub fn with_token(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let hv = HeaderValue::from_str(&format!("Bearer {}", token))?;
        headers.insert(AUTHORIZATION, hv);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Requestor for ApiClient {
    async fn execute(&self, endpoint: &Endpoint) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint.path);
        debug!(method = %endpoint.method, %url, query = ?endpoint.query, "sending request");

        let mut req = self
            .client
            .request(endpoint.method.clone(), &url)
            .query(&endpoint.query);
        if let Some(body) = &endpoint.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), %url, "received response");

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<ErrorResponse>(&text)
                .map(|r| r.errors)
                .unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                errors,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
