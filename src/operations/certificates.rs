use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use thiserror::Error;
use tracing::info;

use crate::api::{self, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

use super::expect_one;

#[derive(Debug, Error)]
pub enum ReadCertificateError {
    #[error("Couldn't find certificate with input '{0}'")]
    NotFound(String),
    #[error("Certificate with serial '{0}' not unique")]
    NotUnique(String),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum CertificateContentError {
    #[error("Certificate '{0}' has no content to download")]
    InvalidContent(String),
    #[error("Certificate '{0}' content is not valid base64")]
    InvalidEncoding(String, #[source] base64::DecodeError),
}

/// Find the single certificate with a serial number.
pub struct ReadCertificateOperation {
    pub serial: String,
}

impl ReadCertificateOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<api::Certificate, ReadCertificateError> {
        let endpoint = Endpoint::get("/v1/certificates").filter("serialNumber", [&self.serial]);
        let response: Document<Vec<api::Certificate>> = requestor.request(&endpoint).await?;
        expect_one(
            response.data,
            &self.serial,
            ReadCertificateError::NotFound,
            ReadCertificateError::NotUnique,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListCertificatesOptions {
    pub certificate_types: Vec<String>,
    pub display_names: Vec<String>,
    pub serial_numbers: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

pub struct ListCertificatesOperation {
    pub options: ListCertificatesOptions,
}

impl ListCertificatesOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<api::Certificate>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/certificates")
            .filter("certificateType", &o.certificate_types)
            .filter("displayName", &o.display_names)
            .filter("serialNumber", &o.serial_numbers)
            .sort(o.sort.as_deref())
            .limit(o.limit);
        let response: Document<Vec<api::Certificate>> = requestor.request(&endpoint).await?;
        Ok(response.data)
    }
}

/// DER bytes of a certificate.
pub fn decode_content(certificate: &api::Certificate) -> Result<Vec<u8>, CertificateContentError> {
    let name = certificate
        .attributes
        .serial_number
        .clone()
        .unwrap_or_else(|| certificate.id.clone());
    let content = certificate
        .attributes
        .certificate_content
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| CertificateContentError::InvalidContent(name.clone()))?;
    base64::decode(content).map_err(|e| CertificateContentError::InvalidEncoding(name, e))
}

/// Write a certificate's DER bytes to `path`, creating parent directories.
pub fn save_certificate(certificate: &api::Certificate, path: &Path) -> Result<()> {
    let der = decode_content(certificate)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, der).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "downloaded certificate");
    Ok(())
}

/// Save every certificate into `dir` as `<serial>.cer`. Returns the written paths.
///
/// Serials that are not a plain file name are rejected before anything is written.
pub fn save_certificates(certificates: &[api::Certificate], dir: &Path) -> Result<Vec<PathBuf>> {
    let paths = certificates
        .iter()
        .map(|certificate| {
            let stem = certificate
                .attributes
                .serial_number
                .as_deref()
                .unwrap_or(&certificate.id);
            if !is_plain_file_stem(stem) {
                bail!("certificate serial '{stem}' is not a valid file name");
            }
            Ok(dir.join(format!("{stem}.cer")))
        })
        .collect::<Result<Vec<_>>>()?;

    for (certificate, path) in certificates.iter().zip(&paths) {
        save_certificate(certificate, path)?;
    }
    Ok(paths)
}

fn is_plain_file_stem(stem: &str) -> bool {
    !stem.is_empty() && stem != "." && stem != ".." && !stem.contains(['/', '\\', '\0'])
}
