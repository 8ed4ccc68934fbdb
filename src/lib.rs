//! # asc
//!
//! Library behind the `asc` command-line client for the App Store Connect API.
//!
//! Commands parse their arguments, run one [`operations`] value against a
//! [`client::Requestor`] and render the result with [`render`].

use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub mod api;
pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod operations;
pub mod render;

use crate::commands::GlobalOptions;
use crate::config::Overrides;
use crate::render::OutputFormat;

/// Command-line client for the App Store Connect API
///
/// Manages bundle IDs, certificates, devices, apps and TestFlight testers,
/// groups, builds and prerelease versions.
#[derive(Parser)]
#[command(
    name = "asc",
    version,
    about = "Command-line client for the App Store Connect API",
    long_about = "Command-line client for the App Store Connect API.\n\nAuthenticates with an App Store Connect API key (issuer id, key id and .p8 private key)\ngiven as flags, APPSTORE_CONNECT_* environment variables or ~/.config/asc/config.yaml."
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Issuer ID of the API key
    #[arg(long, global = true, value_name = "uuid")]
    pub api_issuer: Option<String>,

    /// Key ID of the API key
    #[arg(long, global = true, value_name = "key-id")]
    pub api_key_id: Option<String>,

    /// Path to the AuthKey_<key-id>.p8 private key
    #[arg(long, global = true, value_name = "path")]
    pub api_key_path: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            output: self.output,
            overrides: Overrides {
                issuer_id: self.api_issuer.clone(),
                key_id: self.api_key_id.clone(),
                private_key_path: self.api_key_path.clone(),
            },
        }
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
