use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::api::BundleIdPlatform;
use crate::model::BundleId;
use crate::operations::bundle_ids::{
    DeleteBundleIdOperation, ListBundleIdsOperation, ListBundleIdsOptions,
    ReadBundleIdOperation, RegisterBundleIdOperation,
};
use crate::render::{notice, print_many, print_one};

use super::GlobalOptions;

#[derive(Subcommand, Debug)]
pub enum BundleIdsCommands {
    /// Register a new bundle ID for app development
    Register {
        /// Reverse-DNS identifier, e.g. com.example.App
        identifier: String,
        /// Name of the bundle ID
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = BundleIdPlatform::Ios)]
        platform: BundleIdPlatform,
    },
    /// Find and list bundle IDs
    List {
        #[arg(long = "filter-identifier", value_name = "identifier")]
        identifiers: Vec<String>,
        #[arg(long = "filter-name", value_name = "name")]
        names: Vec<String>,
        #[arg(long = "filter-platform", value_enum, value_name = "platform")]
        platforms: Vec<BundleIdPlatform>,
        #[arg(long = "filter-seed-id", value_name = "seed-id")]
        seed_ids: Vec<String>,
        /// Limit the number of bundle IDs returned (max 200)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get information about a bundle ID
    Read { identifier: String },
    /// Delete a bundle ID that is used for app development
    Delete { identifier: String },
}

pub async fn run(cmd: BundleIdsCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        BundleIdsCommands::Register {
            identifier,
            name,
            platform,
        } => {
            let created = RegisterBundleIdOperation {
                identifier,
                name,
                platform,
            }
            .execute(&client)
            .await?;
            print_one(&BundleId::from(&created), global.output)
        }
        BundleIdsCommands::List {
            identifiers,
            names,
            platforms,
            seed_ids,
            limit,
        } => {
            let found = ListBundleIdsOperation {
                options: ListBundleIdsOptions {
                    identifiers,
                    names,
                    platforms,
                    seed_ids,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            let rows: Vec<BundleId> = found.iter().map(BundleId::from).collect();
            print_many(&rows, global.output)
        }
        BundleIdsCommands::Read { identifier } => {
            let found = ReadBundleIdOperation { identifier }.execute(&client).await?;
            print_one(&BundleId::from(&found), global.output)
        }
        BundleIdsCommands::Delete { identifier } => {
            let id = DeleteBundleIdOperation {
                identifier: identifier.clone(),
            }
            .execute(&client)
            .await?;
            info!(%id, "bundle ID removed");
            notice(&format!("Deleted bundle ID '{identifier}' ({id})"), global.output);
            Ok(())
        }
    }
}
