use anyhow::Result;
use clap::Subcommand;

use crate::api::PreReleaseVersionPlatform;
use crate::commands::GlobalOptions;
use crate::operations::pre_release_versions::{
    AppIdentifier, ListPreReleaseVersionsOperation, ListPreReleaseVersionsOptions,
    ReadPreReleaseVersionOperation,
};
use crate::render::{print_many, print_one};

#[derive(Subcommand, Debug)]
pub enum PreReleaseVersionsCommands {
    /// Get information about a specific prerelease version
    Read {
        /// App Store app id (e.g. 432156789) or bundle identifier (e.g. com.example.App)
        #[arg(value_name = "app-id / bundle-id")]
        app: String,
        /// Version number, e.g. 1.2.0
        version: String,
    },
    /// List prerelease versions
    List {
        #[arg(long = "filter-app-id", value_name = "app-id")]
        app_ids: Vec<String>,
        #[arg(long = "filter-platform", value_enum, value_name = "platform")]
        platforms: Vec<PreReleaseVersionPlatform>,
        #[arg(long = "filter-version", value_name = "version")]
        versions: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run(cmd: PreReleaseVersionsCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        PreReleaseVersionsCommands::Read { app, version } => {
            let found = ReadPreReleaseVersionOperation {
                app: AppIdentifier::parse(&app),
                version,
            }
            .execute(&client)
            .await?;
            print_one(&found, global.output)
        }
        PreReleaseVersionsCommands::List {
            app_ids,
            platforms,
            versions,
            sort,
            limit,
        } => {
            let found = ListPreReleaseVersionsOperation {
                options: ListPreReleaseVersionsOptions {
                    app_ids,
                    platforms,
                    versions,
                    sort,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            print_many(&found, global.output)
        }
    }
}
