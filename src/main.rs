//! # asc
//!
//! Command-line client for the App Store Connect API.
//!
//! ## Quick Start
//!
//! ```bash
//! export APPSTORE_CONNECT_ISSUER_ID=69a6de7f-0000-47e3-e053-5b8c7c11a4d1
//! export APPSTORE_CONNECT_API_KEY_ID=2X9R4HXF34
//!
//! # Look up a tester by email
//! asc testflight beta-testers read --email tester@example.com
//!
//! # Download a certificate
//! asc certificates read 1A23BCDEF4G5D6C7 --certificate-output ./dist.cer
//! ```
//!
//! The private key is read from `--api-key-path`, `APPSTORE_CONNECT_API_KEY_PATH`,
//! the config file, or found as `AuthKey_<key-id>.p8` in the usual key folders.

use asc_cli::{commands, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Main entry point for the asc CLI
///
/// Parses command-line arguments, sets up logging on stderr and delegates to
/// the command handler. Errors are printed with their full cause chain.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global_options();
    let Some(cmd) = cli.cmd else {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    };

    if let Err(e) = commands::run(cmd, global).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
