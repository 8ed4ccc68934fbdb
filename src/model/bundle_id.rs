use serde::Serialize;

use crate::api;
use crate::render::{opt, TableInfo};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleId {
    pub id: String,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub seed_id: Option<String>,
}

impl From<&api::BundleId> for BundleId {
    fn from(bundle_id: &api::BundleId) -> Self {
        let attributes = &bundle_id.attributes;
        BundleId {
            id: bundle_id.id.clone(),
            identifier: attributes.identifier.clone(),
            name: attributes.name.clone(),
            platform: attributes.platform.clone(),
            seed_id: attributes.seed_id.clone(),
        }
    }
}

impl TableInfo for BundleId {
    fn table_columns() -> &'static [&'static str] {
        &["ID", "Identifier", "Name", "Platform", "Seed ID"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.identifier),
            opt(&self.name),
            opt(&self.platform),
            opt(&self.seed_id),
        ]
    }
}
