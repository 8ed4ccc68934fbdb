use anyhow::Result;
use clap::Subcommand;

use super::GlobalOptions;

pub mod beta_groups;
pub mod beta_testers;
pub mod builds;
pub mod pre_release_versions;

#[derive(Subcommand, Debug)]
pub enum TestFlightCommands {
    #[command(about = "Manage people who can install and test prerelease builds")]
    BetaTesters {
        #[command(subcommand)]
        cmd: beta_testers::BetaTestersCommands,
    },
    #[command(about = "Manage groups of beta testers")]
    BetaGroups {
        #[command(subcommand)]
        cmd: beta_groups::BetaGroupsCommands,
    },
    #[command(about = "Find builds uploaded for testing")]
    Builds {
        #[command(subcommand)]
        cmd: builds::BuildsCommands,
    },
    #[command(about = "Find prerelease versions of your apps")]
    PreReleaseVersions {
        #[command(subcommand)]
        cmd: pre_release_versions::PreReleaseVersionsCommands,
    },
}

pub async fn run(cmd: TestFlightCommands, global: &GlobalOptions) -> Result<()> {
    match cmd {
        TestFlightCommands::BetaTesters { cmd } => beta_testers::run(cmd, global).await,
        TestFlightCommands::BetaGroups { cmd } => beta_groups::run(cmd, global).await,
        TestFlightCommands::Builds { cmd } => builds::run(cmd, global).await,
        TestFlightCommands::PreReleaseVersions { cmd } => {
            pre_release_versions::run(cmd, global).await
        }
    }
}
