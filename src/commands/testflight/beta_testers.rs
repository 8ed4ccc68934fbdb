use anyhow::Result;
use clap::Subcommand;

use crate::commands::GlobalOptions;
use crate::model::BetaTester;
use crate::operations::beta_testers::{
    BetaTesterLimits, BetaTesterRelationship, DeleteBetaTesterOperation, GetBetaTesterOperation,
    GetBetaTesterOptions, ListBetaTestersOperation, ListBetaTestersOptions,
};
use crate::render::{notice, print_many, print_one, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum BetaTestersCommands {
    /// Get information about a beta tester
    Read {
        /// Beta tester id
        #[arg(long, required_unless_present = "email")]
        id: Option<String>,
        /// Email address of the tester
        #[arg(long)]
        email: Option<String>,
        /// Extra relationships to show; apps and beta groups are always loaded
        #[arg(long, value_enum)]
        include: Vec<BetaTesterRelationship>,
        /// Number of apps side-loaded with the tester (max 50)
        #[arg(long)]
        limit_apps: Option<u32>,
        /// Number of beta groups side-loaded with the tester (max 50)
        #[arg(long)]
        limit_beta_groups: Option<u32>,
        /// Number of builds side-loaded with the tester (max 50); implies --include builds
        #[arg(long)]
        limit_builds: Option<u32>,
    },
    /// List beta testers
    List {
        #[arg(long = "filter-email", value_name = "email")]
        email: Option<String>,
        #[arg(long = "filter-first-name", value_name = "first-name")]
        first_name: Option<String>,
        #[arg(long = "filter-last-name", value_name = "last-name")]
        last_name: Option<String>,
        /// EMAIL or PUBLIC_LINK
        #[arg(long = "filter-invite-type", value_name = "invite-type")]
        invite_type: Option<String>,
        #[arg(long = "filter-app-id", value_name = "app-id")]
        app_ids: Vec<String>,
        #[arg(long = "filter-beta-group-id", value_name = "group-id")]
        beta_group_ids: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        limit_apps: Option<u32>,
        #[arg(long)]
        limit_beta_groups: Option<u32>,
    },
    /// Remove a beta tester's ability to test all apps
    Delete {
        #[arg(long, required_unless_present = "email")]
        id: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

pub async fn run(cmd: BetaTestersCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        BetaTestersCommands::Read {
            id,
            email,
            include,
            limit_apps,
            limit_beta_groups,
            limit_builds,
        } => {
            let mut relationships = vec![
                BetaTesterRelationship::BetaGroups,
                BetaTesterRelationship::Apps,
            ];
            if limit_builds.is_some() || include.contains(&BetaTesterRelationship::Builds) {
                relationships.push(BetaTesterRelationship::Builds);
            }

            let output = GetBetaTesterOperation::new(GetBetaTesterOptions {
                id,
                email,
                include: relationships,
                limits: BetaTesterLimits {
                    apps: limit_apps,
                    builds: limit_builds,
                    beta_groups: limit_beta_groups,
                },
            })
            .execute(&client)
            .await?;

            let tester = BetaTester::from(&output);
            print_one(&tester, global.output)?;
            if global.output == OutputFormat::Table && !tester.builds.is_empty() {
                print_many(&tester.builds, global.output)?;
            }
            Ok(())
        }
        BetaTestersCommands::List {
            email,
            first_name,
            last_name,
            invite_type,
            app_ids,
            beta_group_ids,
            sort,
            limit,
            limit_apps,
            limit_beta_groups,
        } => {
            let testers = ListBetaTestersOperation {
                options: ListBetaTestersOptions {
                    email,
                    first_name,
                    last_name,
                    invite_type,
                    app_ids,
                    beta_group_ids,
                    sort,
                    limit,
                    limit_apps,
                    limit_beta_groups,
                },
            }
            .execute(&client)
            .await?;
            print_many(&testers, global.output)
        }
        BetaTestersCommands::Delete { id, email } => {
            let deleted = DeleteBetaTesterOperation::new(id, email)
                .execute(&client)
                .await?;
            notice(&format!("Deleted beta tester {deleted}"), global.output);
            Ok(())
        }
    }
}
