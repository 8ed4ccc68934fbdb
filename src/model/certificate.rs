use serde::Serialize;

use crate::api;
use crate::render::{opt, opt_date, TableInfo};

/// A signing certificate. `content` is the base64 DER payload, kept out of
/// the table but present in JSON and YAML output.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub name: Option<String>,
    pub certificate_type: Option<String>,
    pub display_name: Option<String>,
    pub serial_number: Option<String>,
    pub platform: Option<String>,
    pub expiration_date: Option<String>,
    pub content: Option<String>,
}

impl From<&api::Certificate> for Certificate {
    fn from(certificate: &api::Certificate) -> Self {
        let attributes = &certificate.attributes;
        Certificate {
            id: certificate.id.clone(),
            name: attributes.name.clone(),
            certificate_type: attributes.certificate_type.clone(),
            display_name: attributes.display_name.clone(),
            serial_number: attributes.serial_number.clone(),
            platform: attributes.platform.clone(),
            expiration_date: attributes.expiration_date.clone(),
            content: attributes.certificate_content.clone(),
        }
    }
}

impl TableInfo for Certificate {
    fn table_columns() -> &'static [&'static str] {
        &[
            "ID",
            "Name",
            "Type",
            "Display Name",
            "Serial Number",
            "Platform",
            "Expiration Date",
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.name),
            opt(&self.certificate_type),
            opt(&self.display_name),
            opt(&self.serial_number),
            opt(&self.platform),
            opt_date(&self.expiration_date),
        ]
    }
}
