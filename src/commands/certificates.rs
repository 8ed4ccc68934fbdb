use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::model::Certificate;
use crate::operations::certificates::{
    save_certificate, save_certificates, ListCertificatesOperation, ListCertificatesOptions,
    ReadCertificateOperation,
};
use crate::render::{notice, print_many, print_one};

use super::GlobalOptions;

#[derive(Subcommand, Debug)]
pub enum CertificatesCommands {
    /// Find and list certificates, optionally downloading them
    List {
        /// Filter by certificate type, e.g. IOS_DISTRIBUTION
        #[arg(long = "filter-type", value_name = "certificate-type")]
        certificate_types: Vec<String>,
        #[arg(long = "filter-display-name", value_name = "display-name")]
        display_names: Vec<String>,
        #[arg(long = "filter-serial", value_name = "serial")]
        serial_numbers: Vec<String>,
        /// Sort field, prefixed with '-' for descending, e.g. -serialNumber
        #[arg(long)]
        sort: Option<String>,
        /// Limit the number of certificates returned (max 200)
        #[arg(long)]
        limit: Option<u32>,
        /// Directory to save every listed certificate into as <serial>.cer
        #[arg(long, value_name = "dir")]
        download_path: Option<PathBuf>,
    },
    /// Get information about a certificate and download its data
    Read {
        /// Serial number, e.g. 1A23BCDEF4G5D6C7
        serial: String,
        /// File to write the DER certificate to, e.g. ./file.cer
        #[arg(long, value_name = "path")]
        certificate_output: Option<PathBuf>,
    },
}

pub async fn run(cmd: CertificatesCommands, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    match cmd {
        CertificatesCommands::List {
            certificate_types,
            display_names,
            serial_numbers,
            sort,
            limit,
            download_path,
        } => {
            let certificates = ListCertificatesOperation {
                options: ListCertificatesOptions {
                    certificate_types,
                    display_names,
                    serial_numbers,
                    sort,
                    limit,
                },
            }
            .execute(&client)
            .await?;

            if let Some(dir) = download_path {
                let saved = save_certificates(&certificates, &dir)?;
                notice(
                    &format!("Downloaded {} certificate(s) to {}", saved.len(), dir.display()),
                    global.output,
                );
            }
            let rows: Vec<Certificate> = certificates.iter().map(Certificate::from).collect();
            print_many(&rows, global.output)
        }
        CertificatesCommands::Read {
            serial,
            certificate_output,
        } => {
            let certificate = ReadCertificateOperation { serial }.execute(&client).await?;
            if let Some(path) = certificate_output {
                save_certificate(&certificate, &path)?;
                let name = certificate.attributes.name.as_deref().unwrap_or_default();
                notice(
                    &format!("Certificate '{name}' downloaded to: {}", path.display()),
                    global.output,
                );
            }
            print_one(&Certificate::from(&certificate), global.output)
        }
    }
}
