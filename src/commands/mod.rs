use anyhow::{Context, Result};
use clap::Subcommand;
use std::env;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::{config_path, load_config, Overrides};
use crate::render::OutputFormat;

pub mod apps;
pub mod bundle_ids;
pub mod certificates;
pub mod completions;
pub mod devices;
pub mod testflight;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Find and list apps added in App Store Connect")]
    Apps {
        #[command(subcommand)]
        cmd: apps::AppsCommands,
    },
    #[command(about = "Manage the bundle IDs that uniquely identify your apps")]
    BundleIds {
        #[command(subcommand)]
        cmd: bundle_ids::BundleIdsCommands,
    },
    #[command(about = "Manage the certificates used for code signing")]
    Certificates {
        #[command(subcommand)]
        cmd: certificates::CertificatesCommands,
    },
    #[command(about = "Register devices for development and testing")]
    Devices {
        #[command(subcommand)]
        cmd: devices::DevicesCommands,
    },
    #[command(about = "Manage TestFlight testers, groups, builds and prerelease versions")]
    Testflight {
        #[command(subcommand)]
        cmd: testflight::TestFlightCommands,
    },
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub output: OutputFormat,
    pub overrides: Overrides,
}

impl GlobalOptions {
    /// Authenticated client built from flags, environment and the config file.
    pub fn client(&self) -> Result<ApiClient> {
        let path = config_path();
        debug!(path = %path.display(), "loading config");
        let config = load_config(&path)?;
        let settings = config.resolve(&self.overrides, |name| env::var(name).ok());
        ApiClient::new(&settings).context("creating App Store Connect client")
    }
}

pub async fn run(cmd: Commands, global: GlobalOptions) -> Result<()> {
    match cmd {
        Commands::Apps { cmd } => apps::run(cmd, &global).await,
        Commands::BundleIds { cmd } => bundle_ids::run(cmd, &global).await,
        Commands::Certificates { cmd } => certificates::run(cmd, &global).await,
        Commands::Devices { cmd } => devices::run(cmd, &global).await,
        Commands::Testflight { cmd } => testflight::run(cmd, &global).await,
        Commands::Completions { shell } => completions::run(shell),
    }
}
