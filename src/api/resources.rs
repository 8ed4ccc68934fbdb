use serde::Deserialize;

use super::Resource;

pub type App = Resource<AppAttributes>;
pub type BetaGroup = Resource<BetaGroupAttributes>;
pub type BetaTester = Resource<BetaTesterAttributes>;
pub type Build = Resource<BuildAttributes>;
pub type BundleId = Resource<BundleIdAttributes>;
pub type Certificate = Resource<CertificateAttributes>;
pub type Device = Resource<DeviceAttributes>;
pub type PreReleaseVersion = Resource<PreReleaseVersionAttributes>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    pub bundle_id: Option<String>,
    pub name: Option<String>,
    pub primary_locale: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroupAttributes {
    pub name: Option<String>,
    pub created_date: Option<String>,
    pub is_internal_group: Option<bool>,
    pub public_link_enabled: Option<bool>,
    pub public_link_id: Option<String>,
    pub public_link_limit_enabled: Option<bool>,
    pub public_link_limit: Option<u32>,
    pub public_link: Option<String>,
    pub feedback_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaTesterAttributes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub invite_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAttributes {
    /// The build number, e.g. `42`
    pub version: Option<String>,
    pub uploaded_date: Option<String>,
    pub expiration_date: Option<String>,
    pub expired: Option<bool>,
    pub min_os_version: Option<String>,
    pub processing_state: Option<String>,
    pub uses_non_exempt_encryption: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleIdAttributes {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub seed_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    /// Base64 encoded DER certificate
    pub certificate_content: Option<String>,
    pub display_name: Option<String>,
    pub expiration_date: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub serial_number: Option<String>,
    pub certificate_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAttributes {
    pub device_class: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
    pub udid: Option<String>,
    pub added_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreReleaseVersionAttributes {
    /// Marketing version, e.g. `1.2.0`
    pub version: Option<String>,
    pub platform: Option<String>,
}

/// Resources side-loaded with a beta tester.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BetaTesterIncluded {
    #[serde(rename = "apps")]
    App(App),
    #[serde(rename = "betaGroups")]
    BetaGroup(BetaGroup),
    #[serde(rename = "builds")]
    Build(Build),
    #[serde(other)]
    Other,
}

/// Resources side-loaded with a build.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BuildIncluded {
    #[serde(rename = "apps")]
    App(App),
    #[serde(rename = "preReleaseVersions")]
    PreReleaseVersion(PreReleaseVersion),
    #[serde(other)]
    Other,
}

/// Resources side-loaded with a beta group or a prerelease version.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AppBuildsIncluded {
    #[serde(rename = "apps")]
    App(App),
    #[serde(rename = "builds")]
    Build(Build),
    #[serde(other)]
    Other,
}

/// Platform a bundle ID or device is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BundleIdPlatform {
    Ios,
    MacOs,
    Universal,
}

impl BundleIdPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleIdPlatform::Ios => "IOS",
            BundleIdPlatform::MacOs => "MAC_OS",
            BundleIdPlatform::Universal => "UNIVERSAL",
        }
    }
}

/// Platform of a prerelease version. Builds are never universal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PreReleaseVersionPlatform {
    Ios,
    MacOs,
    TvOs,
}

impl PreReleaseVersionPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreReleaseVersionPlatform::Ios => "IOS",
            PreReleaseVersionPlatform::MacOs => "MAC_OS",
            PreReleaseVersionPlatform::TvOs => "TV_OS",
        }
    }
}
