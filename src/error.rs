//! Errors raised while talking to the App Store Connect API.

use serde::Deserialize;
use thiserror::Error;

/// One entry of the JSON:API `errors` array returned on failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// Failure of a single request. Operations pass these through untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with status {status}{}", describe(.errors))]
    Status { status: u16, errors: Vec<ErrorDetail> },

    #[error("unexpected response body")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

fn describe(errors: &[ErrorDetail]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
        .collect();
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}
