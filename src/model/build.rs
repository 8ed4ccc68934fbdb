use serde::Serialize;

use crate::api;
use crate::render::{opt, opt_bool, opt_date, TableInfo};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub app_bundle_id: Option<String>,
    pub app_name: Option<String>,
    pub short_version: Option<String>,
    pub version: Option<String>,
    pub uploaded_date: Option<String>,
    pub expiration_date: Option<String>,
    pub expired: Option<bool>,
    pub min_os_version: Option<String>,
    pub processing_state: Option<String>,
    pub uses_non_exempt_encryption: Option<bool>,
}

impl Build {
    pub fn new(
        build: &api::Build,
        app: Option<&api::App>,
        pre_release_version: Option<&api::PreReleaseVersion>,
    ) -> Self {
        let attributes = &build.attributes;
        Build {
            app_bundle_id: app.and_then(|a| a.attributes.bundle_id.clone()),
            app_name: app.and_then(|a| a.attributes.name.clone()),
            short_version: pre_release_version.and_then(|p| p.attributes.version.clone()),
            version: attributes.version.clone(),
            uploaded_date: attributes.uploaded_date.clone(),
            expiration_date: attributes.expiration_date.clone(),
            expired: attributes.expired,
            min_os_version: attributes.min_os_version.clone(),
            processing_state: attributes.processing_state.clone(),
            uses_non_exempt_encryption: attributes.uses_non_exempt_encryption,
        }
    }
}

impl TableInfo for Build {
    fn table_columns() -> &'static [&'static str] {
        &[
            "App Bundle ID",
            "App Name",
            "Short Version",
            "Build Number",
            "Uploaded Date",
            "Expiration Date",
            "Expired",
            "Min OS Version",
            "Processing State",
            "Non-exempt Encryption",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            opt(&self.app_bundle_id),
            opt(&self.app_name),
            opt(&self.short_version),
            opt(&self.version),
            opt_date(&self.uploaded_date),
            opt_date(&self.expiration_date),
            opt_bool(self.expired),
            opt(&self.min_os_version),
            opt(&self.processing_state),
            opt_bool(self.uses_non_exempt_encryption),
        ]
    }
}
