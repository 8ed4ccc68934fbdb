use anyhow::Result;
use clap::Subcommand;

use crate::commands::GlobalOptions;
use crate::operations::builds::{ListBuildsOperation, ListBuildsOptions};
use crate::render::print_many;

#[derive(Subcommand, Debug)]
pub enum BuildsCommands {
    /// Find and list builds for all apps
    List {
        /// Filter by app bundle identifier, e.g. com.example.App
        #[arg(long = "filter-bundle-id", value_name = "bundle-id")]
        bundle_ids: Vec<String>,
        /// Leave out expired builds
        #[arg(long)]
        no_expired: bool,
        /// Filter by the prerelease version number, e.g. 1.2.0
        #[arg(long = "filter-pre-release-version", value_name = "version")]
        pre_release_versions: Vec<String>,
        /// Filter by build number
        #[arg(long = "filter-build-number", value_name = "build-number")]
        build_numbers: Vec<String>,
        /// PROCESSING, FAILED, INVALID or VALID
        #[arg(long = "filter-processing-state", value_name = "state")]
        processing_states: Vec<String>,
        /// WAITING_FOR_REVIEW, IN_REVIEW, REJECTED or APPROVED
        #[arg(long = "filter-beta-review-state", value_name = "state")]
        beta_review_states: Vec<String>,
        #[arg(long = "filter-beta-group-id", value_name = "group-id")]
        beta_group_ids: Vec<String>,
        /// Limit the number of individual testers and beta build localizations
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run(cmd: BuildsCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        BuildsCommands::List {
            bundle_ids,
            no_expired,
            pre_release_versions,
            build_numbers,
            processing_states,
            beta_review_states,
            beta_group_ids,
            limit,
        } => {
            let builds = ListBuildsOperation {
                options: ListBuildsOptions {
                    bundle_ids,
                    expired: no_expired.then_some(false),
                    pre_release_versions,
                    build_numbers,
                    processing_states,
                    beta_review_states,
                    beta_group_ids,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            print_many(&builds, global.output)
        }
    }
}
