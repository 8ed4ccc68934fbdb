use serde::Serialize;

use crate::api;
use crate::render::{opt, TableInfo};

use super::Build;

/// A beta tester together with the names of the groups and the bundle IDs of
/// the apps they were side-loaded with. Side-loaded builds are only
/// serialized when there are some; the table shows them separately.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetaTester {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub invite_type: Option<String>,
    pub beta_groups: Vec<String>,
    pub apps: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub builds: Vec<Build>,
}

impl BetaTester {
    pub fn new(tester: &api::BetaTester, groups: &[api::BetaGroup], apps: &[api::App]) -> Self {
        let attributes = &tester.attributes;
        BetaTester {
            id: tester.id.clone(),
            email: attributes.email.clone(),
            first_name: attributes.first_name.clone(),
            last_name: attributes.last_name.clone(),
            invite_type: attributes.invite_type.clone(),
            beta_groups: groups
                .iter()
                .filter_map(|g| g.attributes.name.clone())
                .collect(),
            apps: apps
                .iter()
                .filter_map(|a| a.attributes.bundle_id.clone())
                .collect(),
            builds: Vec::new(),
        }
    }
}

impl TableInfo for BetaTester {
    fn table_columns() -> &'static [&'static str] {
        &[
            "ID",
            "Email",
            "First Name",
            "Last Name",
            "Invite Type",
            "Beta Groups",
            "Apps",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.email),
            opt(&self.first_name),
            opt(&self.last_name),
            opt(&self.invite_type),
            self.beta_groups.join(", "),
            self.apps.join(", "),
        ]
    }
}
