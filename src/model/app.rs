use serde::Serialize;

use crate::api;
use crate::render::{opt, TableInfo};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub bundle_id: Option<String>,
    pub name: Option<String>,
    pub primary_locale: Option<String>,
    pub sku: Option<String>,
}

impl From<&api::App> for App {
    fn from(app: &api::App) -> Self {
        let attributes = &app.attributes;
        App {
            id: app.id.clone(),
            bundle_id: attributes.bundle_id.clone(),
            name: attributes.name.clone(),
            primary_locale: attributes.primary_locale.clone(),
            sku: attributes.sku.clone(),
        }
    }
}

impl TableInfo for App {
    fn table_columns() -> &'static [&'static str] {
        &["App ID", "App Bundle ID", "App Name", "Primary Locale", "SKU"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.bundle_id),
            opt(&self.name),
            opt(&self.primary_locale),
            opt(&self.sku),
        ]
    }
}
