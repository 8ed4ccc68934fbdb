use serde::Serialize;

use crate::api;
use crate::render::{opt, TableInfo};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreReleaseVersion {
    pub id: String,
    pub app_bundle_id: Option<String>,
    pub app_name: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    /// Build numbers uploaded for this version
    pub builds: Vec<String>,
}

impl PreReleaseVersion {
    pub fn new(
        version: &api::PreReleaseVersion,
        app: Option<&api::App>,
        builds: &[api::Build],
    ) -> Self {
        PreReleaseVersion {
            id: version.id.clone(),
            app_bundle_id: app.and_then(|a| a.attributes.bundle_id.clone()),
            app_name: app.and_then(|a| a.attributes.name.clone()),
            version: version.attributes.version.clone(),
            platform: version.attributes.platform.clone(),
            builds: builds
                .iter()
                .filter_map(|b| b.attributes.version.clone())
                .collect(),
        }
    }
}

impl TableInfo for PreReleaseVersion {
    fn table_columns() -> &'static [&'static str] {
        &[
            "ID",
            "App Bundle ID",
            "App Name",
            "Version",
            "Platform",
            "Builds",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.app_bundle_id),
            opt(&self.app_name),
            opt(&self.version),
            opt(&self.platform),
            self.builds.join(", "),
        ]
    }
}
