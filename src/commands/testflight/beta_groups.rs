use anyhow::Result;
use clap::Subcommand;

use crate::commands::GlobalOptions;
use crate::operations::beta_groups::{ListBetaGroupsOperation, ListBetaGroupsOptions};
use crate::render::print_many;

#[derive(Subcommand, Debug)]
pub enum BetaGroupsCommands {
    /// List beta groups across all apps
    List {
        #[arg(long = "filter-app-id", value_name = "app-id")]
        app_ids: Vec<String>,
        #[arg(long = "filter-name", value_name = "name")]
        names: Vec<String>,
        /// Only internal (true) or external (false) groups
        #[arg(long = "filter-internal", value_name = "bool")]
        is_internal: Option<bool>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run(cmd: BetaGroupsCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        BetaGroupsCommands::List {
            app_ids,
            names,
            is_internal,
            sort,
            limit,
        } => {
            let groups = ListBetaGroupsOperation {
                options: ListBetaGroupsOptions {
                    app_ids,
                    names,
                    is_internal,
                    sort,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            print_many(&groups, global.output)
        }
    }
}
