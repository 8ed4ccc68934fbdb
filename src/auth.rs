//! App Store Connect API tokens.
//!
//! Every request carries a short-lived ES256 JWT signed with the team's `.p8`
//! API key. See "Generating Tokens for API Requests" in Apple's documentation.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{KeySource, Settings};
use crate::constants::{
    HOME_PRIVATE_KEY_DIRS, LOCAL_PRIVATE_KEY_DIR, TOKEN_AUDIENCE, TOKEN_LIFETIME_SECS,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing API issuer ID; pass --api-issuer or set APPSTORE_CONNECT_ISSUER_ID")]
    MissingIssuer,
    #[error("missing API key ID; pass --api-key-id or set APPSTORE_CONNECT_API_KEY_ID")]
    MissingKeyId,
    #[error("private key AuthKey_{0}.p8 not found in any of the private_keys directories")]
    KeyNotFound(String),
    #[error("cannot read private key {}", .path.display())]
    ReadKey {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid private key")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("cannot sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

/// An API key ready to sign tokens
pub struct ApiKey {
    issuer_id: String,
    key_id: String,
    encoding_key: EncodingKey,
}

impl ApiKey {
    pub fn from_pem(issuer_id: &str, key_id: &str, pem: &[u8]) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_ec_pem(pem).map_err(AuthError::InvalidKey)?;
        Ok(ApiKey {
            issuer_id: issuer_id.to_string(),
            key_id: key_id.to_string(),
            encoding_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        let issuer_id = settings
            .issuer_id
            .as_deref()
            .ok_or(AuthError::MissingIssuer)?;
        let key_id = settings.key_id.as_deref().ok_or(AuthError::MissingKeyId)?;

        let pem = match &settings.key {
            KeySource::Pem(text) => text.clone().into_bytes(),
            KeySource::File(path) => read_key(path)?,
            KeySource::Search => {
                let path = search_key(key_id, &search_dirs())
                    .ok_or_else(|| AuthError::KeyNotFound(key_id.to_string()))?;
                read_key(&path)?
            }
        };
        Self::from_pem(issuer_id, key_id, &pem)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign a token valid from now for the maximum lifetime the API accepts.
    pub fn token(&self) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: self.issuer_id.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
            aud: TOKEN_AUDIENCE.to_string(),
        };
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());
        encode(&header, &claims, &self.encoding_key).map_err(AuthError::Signing)
    }
}

fn read_key(path: &Path) -> Result<Vec<u8>, AuthError> {
    std::fs::read(path).map_err(|source| AuthError::ReadKey {
        path: path.to_path_buf(),
        source,
    })
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(LOCAL_PRIVATE_KEY_DIR)];
    if let Some(home) = dirs::home_dir() {
        dirs.extend(HOME_PRIVATE_KEY_DIRS.iter().map(|d| home.join(d)));
    }
    dirs
}

/// First `AuthKey_<key_id>.p8` found in `dirs`, in order.
pub fn search_key(key_id: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let file_name = format!("AuthKey_{key_id}.p8");
    dirs.iter()
        .map(|d| d.join(&file_name))
        .find(|candidate| candidate.is_file())
}
