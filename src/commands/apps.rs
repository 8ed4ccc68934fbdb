use anyhow::Result;
use clap::Subcommand;

use crate::model::App;
use crate::operations::apps::{ListAppsOperation, ListAppsOptions, ReadAppOperation};
use crate::render::{print_many, print_one};

use super::GlobalOptions;

#[derive(Subcommand, Debug)]
pub enum AppsCommands {
    /// Find and list apps
    List {
        /// Filter by bundle identifier, e.g. com.example.App
        #[arg(long = "filter-bundle-id", value_name = "bundle-id")]
        bundle_ids: Vec<String>,
        /// Filter by app name
        #[arg(long = "filter-name", value_name = "name")]
        names: Vec<String>,
        /// Filter by SKU
        #[arg(long = "filter-sku", value_name = "sku")]
        skus: Vec<String>,
        /// Limit the number of apps returned (max 200)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get information about one app
    Read {
        /// App Store app id, e.g. 432156789
        #[arg(long, conflicts_with = "bundle_id")]
        id: Option<String>,
        /// Bundle identifier, e.g. com.example.App
        #[arg(long)]
        bundle_id: Option<String>,
    },
}

pub async fn run(cmd: AppsCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        AppsCommands::List {
            bundle_ids,
            names,
            skus,
            limit,
        } => {
            let apps = ListAppsOperation {
                options: ListAppsOptions {
                    bundle_ids,
                    names,
                    skus,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            let apps: Vec<App> = apps.iter().map(App::from).collect();
            print_many(&apps, global.output)
        }
        AppsCommands::Read { id, bundle_id } => {
            let app = ReadAppOperation::new(id, bundle_id).execute(&client).await?;
            print_one(&App::from(&app), global.output)
        }
    }
}
