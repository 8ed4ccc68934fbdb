use serde::Serialize;

use crate::api;
use crate::render::{opt, opt_date, TableInfo};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub added_date: Option<String>,
    pub name: Option<String>,
    pub device_class: Option<String>,
    pub model: Option<String>,
    pub udid: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
}

impl From<&api::Device> for Device {
    fn from(device: &api::Device) -> Self {
        let attributes = &device.attributes;
        Device {
            id: device.id.clone(),
            added_date: attributes.added_date.clone(),
            name: attributes.name.clone(),
            device_class: attributes.device_class.clone(),
            model: attributes.model.clone(),
            udid: attributes.udid.clone(),
            platform: attributes.platform.clone(),
            status: attributes.status.clone(),
        }
    }
}

impl TableInfo for Device {
    fn table_columns() -> &'static [&'static str] {
        &[
            "ID",
            "Date Added",
            "Name",
            "Device Class",
            "Model",
            "UDID",
            "Platform",
            "Status",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt_date(&self.added_date),
            opt(&self.name),
            opt(&self.device_class),
            opt(&self.model),
            opt(&self.udid),
            opt(&self.platform),
            opt(&self.status),
        ]
    }
}
