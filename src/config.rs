//! Configuration management for the asc CLI
//!
//! Credentials and the API host come from three layers, highest precedence first:
//! 1. Command-line flags (`--api-issuer`, `--api-key-id`, `--api-key-path`)
//! 2. Environment variables (`APPSTORE_CONNECT_ISSUER_ID`, `APPSTORE_CONNECT_API_KEY_ID`,
//!    `APPSTORE_CONNECT_API_KEY_PATH`)
//! 3. The config file at `$ASC_CONFIG_PATH` or `~/.config/asc/config.yaml`
//!
//! ## Environment Variable Expansion
//!
//! The config file supports environment variable expansion with the following syntax:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs, path::PathBuf};

use crate::constants::{
    ASC_CONFIG_PATH_ENV, CONFIG_FILE, DEFAULT_API_BASE_URL, ISSUER_ID_ENV, KEY_ID_ENV,
    KEY_PATH_ENV,
};

/// Contents of `config.yaml`
///
/// # Example
///
/// ```yaml
/// issuerId: 69a6de7f-0000-47e3-e053-5b8c7c11a4d1
/// keyId: ${ASC_KEY_ID:-2X9R4HXF34}
/// privateKeyPath: ~/.appstoreconnect/private_keys/AuthKey_2X9R4HXF34.p8
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Issuer ID of the API key, shown on the Users and Access page
    #[serde(default)]
    pub issuer_id: Option<String>,
    /// Key ID of the API key
    #[serde(default)]
    pub key_id: Option<String>,
    /// Path to the downloaded `AuthKey_<keyId>.p8`
    #[serde(default)]
    pub private_key_path: Option<String>,
    /// Environment variable holding the PEM contents of the private key
    #[serde(default)]
    pub private_key_env: Option<String>,
    /// API host, for proxies and tests
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub issuer_id: Option<String>,
    pub key_id: Option<String>,
    pub private_key_path: Option<PathBuf>,
}

/// Where the private key comes from once all layers are merged.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySource {
    /// PEM text read from an environment variable
    Pem(String),
    /// Explicit path to a `.p8` file
    File(PathBuf),
    /// Nothing configured; search the conventional directories for this key id
    Search,
}

/// Fully merged settings needed to build an API client
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub issuer_id: Option<String>,
    pub key_id: Option<String>,
    pub key: KeySource,
    pub api_base_url: String,
}

impl Config {
    /// Merge this file config with environment values and command-line overrides.
    ///
    /// `lookup` resolves environment variables; pass `|k| std::env::var(k).ok()` outside tests.
    pub fn resolve<F>(&self, overrides: &Overrides, lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.is_empty());

        let issuer_id = overrides
            .issuer_id
            .clone()
            .or_else(|| non_empty(ISSUER_ID_ENV))
            .or_else(|| self.issuer_id.clone());
        let key_id = overrides
            .key_id
            .clone()
            .or_else(|| non_empty(KEY_ID_ENV))
            .or_else(|| self.key_id.clone());

        let key = if let Some(path) = &overrides.private_key_path {
            KeySource::File(path.clone())
        } else if let Some(path) = non_empty(KEY_PATH_ENV) {
            KeySource::File(PathBuf::from(path))
        } else if let Some(pem) = self.private_key_env.as_deref().and_then(&non_empty) {
            KeySource::Pem(pem)
        } else if let Some(path) = &self.private_key_path {
            KeySource::File(expand_home(path))
        } else {
            KeySource::Search
        };

        Settings {
            issuer_id,
            key_id,
            key,
            api_base_url: self
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        }
    }
}

/// Location of the config file: `$ASC_CONFIG_PATH`, else `<config_dir>/asc/config.yaml`.
pub fn config_path() -> PathBuf {
    env::var(ASC_CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push(CONFIG_FILE);
            p
        })
}

/// Load the config file. A missing file is an empty config.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let preprocessed_data =
        preprocess_config(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config = serde_yaml::from_str(&preprocessed_data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

pub fn expand_env_placeholders(input: &str) -> anyhow::Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let op = caps.get(2).map_or("", |m| m.as_str());
        let val = caps.get(3).map_or("", |m| m.as_str());
        let var = env::var(var_name).ok();

        match (var.as_deref(), op) {
            (Some(v), "") => v.to_string(),                      // ${VAR}
            (Some(v), ":-") if !v.is_empty() => v.to_string(),   // ${VAR:-default}
            (_, ":-") => val.to_string(),
            (Some(v), "-") => v.to_string(),                     // ${VAR-default}
            (None, "-") => val.to_string(),
            (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
            (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
            _ => String::new(),
        }
    });
    Ok(expanded.into_owned())
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)?;
    expand_env_placeholders(&raw_data)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
