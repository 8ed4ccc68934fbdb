use anyhow::Result;
use clap::Subcommand;

use crate::api::BundleIdPlatform;
use crate::model::Device;
use crate::operations::devices::{
    ListDevicesOperation, ListDevicesOptions, ReadDeviceOperation, RegisterDeviceOperation,
};
use crate::render::{print_many, print_one};

use super::GlobalOptions;

#[derive(Subcommand, Debug)]
pub enum DevicesCommands {
    /// Find and list devices registered to your team
    List {
        #[arg(long = "filter-name", value_name = "name")]
        names: Vec<String>,
        #[arg(long = "filter-platform", value_enum, value_name = "platform")]
        platforms: Vec<BundleIdPlatform>,
        /// ENABLED or DISABLED
        #[arg(long = "filter-status", value_name = "status")]
        statuses: Vec<String>,
        #[arg(long = "filter-udid", value_name = "udid")]
        udids: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get information about one device
    Read {
        #[arg(long, conflicts_with = "udid")]
        id: Option<String>,
        #[arg(long)]
        udid: Option<String>,
    },
    /// Register a new device for app development
    Register {
        /// Name of the device
        name: String,
        /// UDID of the device
        udid: String,
        #[arg(long, value_enum, default_value_t = BundleIdPlatform::Ios)]
        platform: BundleIdPlatform,
    },
}

pub async fn run(cmd: DevicesCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        DevicesCommands::List {
            names,
            platforms,
            statuses,
            udids,
            sort,
            limit,
        } => {
            let devices = ListDevicesOperation {
                options: ListDevicesOptions {
                    names,
                    platforms,
                    statuses,
                    udids,
                    sort,
                    limit,
                },
            }
            .execute(&client)
            .await?;
            let rows: Vec<Device> = devices.iter().map(Device::from).collect();
            print_many(&rows, global.output)
        }
        DevicesCommands::Read { id, udid } => {
            let device = ReadDeviceOperation::new(id, udid).execute(&client).await?;
            print_one(&Device::from(&device), global.output)
        }
        DevicesCommands::Register {
            name,
            udid,
            platform,
        } => {
            let device = RegisterDeviceOperation {
                name,
                platform,
                udid,
            }
            .execute(&client)
            .await?;
            print_one(&Device::from(&device), global.output)
        }
    }
}
