use serde::Serialize;

use crate::api;
use crate::render::{opt, opt_bool, opt_date, TableInfo};

/// A TestFlight group, with the app it belongs to when that was side-loaded.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroup {
    pub id: String,
    pub app_bundle_id: Option<String>,
    pub app_name: Option<String>,
    pub group_name: Option<String>,
    pub is_internal: Option<bool>,
    pub public_link: Option<String>,
    pub public_link_enabled: Option<bool>,
    pub public_link_limit: Option<u32>,
    pub public_link_limit_enabled: Option<bool>,
    pub creation_date: Option<String>,
}

impl BetaGroup {
    pub fn new(group: &api::BetaGroup, app: Option<&api::App>) -> Self {
        let attributes = &group.attributes;
        BetaGroup {
            id: group.id.clone(),
            app_bundle_id: app.and_then(|a| a.attributes.bundle_id.clone()),
            app_name: app.and_then(|a| a.attributes.name.clone()),
            group_name: attributes.name.clone(),
            is_internal: attributes.is_internal_group,
            public_link: attributes.public_link.clone(),
            public_link_enabled: attributes.public_link_enabled,
            public_link_limit: attributes.public_link_limit,
            public_link_limit_enabled: attributes.public_link_limit_enabled,
            creation_date: attributes.created_date.clone(),
        }
    }
}

impl TableInfo for BetaGroup {
    fn table_columns() -> &'static [&'static str] {
        &[
            "ID",
            "App Bundle ID",
            "App Name",
            "Group Name",
            "Is Internal",
            "Public Link",
            "Public Link Enabled",
            "Public Link Limit",
            "Public Link Limit Enabled",
            "Creation Date",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.app_bundle_id),
            opt(&self.app_name),
            opt(&self.group_name),
            opt_bool(self.is_internal),
            opt(&self.public_link),
            opt_bool(self.public_link_enabled),
            self.public_link_limit
                .map(|l| l.to_string())
                .unwrap_or_default(),
            opt_bool(self.public_link_limit_enabled),
            opt_date(&self.creation_date),
        ]
    }
}
