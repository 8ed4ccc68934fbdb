use serde::de::IgnoredAny;
use serde_json::json;
use thiserror::Error;

use crate::api::{self, BundleIdPlatform, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

use super::{expect_one, fetch_by_id, Lookup};

#[derive(Debug, Error)]
pub enum ReadDeviceError {
    #[error("Device with id or UDID '{0}' doesn't exist.")]
    NotFound(String),
    #[error("Device with UDID '{0}' not unique")]
    NotUnique(String),
    #[error("Invalid input, either a device id or a UDID is required.")]
    InvalidInput,
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Fetch one device by id, or find it by UDID.
pub struct ReadDeviceOperation {
    lookup: Option<Lookup>,
}

impl ReadDeviceOperation {
    pub fn new(id: Option<String>, udid: Option<String>) -> Self {
        ReadDeviceOperation {
            lookup: Lookup::from_parts(id, udid),
        }
    }

    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<api::Device, ReadDeviceError> {
        match self.lookup.as_ref().ok_or(ReadDeviceError::InvalidInput)? {
            Lookup::ById(id) => {
                let endpoint = Endpoint::get(format!("/v1/devices/{id}"));
                fetch_by_id::<_, api::Device, IgnoredAny>(requestor, &endpoint)
                    .await?
                    .map(|(resource, _)| resource)
                    .ok_or_else(|| ReadDeviceError::NotFound(id.clone()))
            }
            Lookup::ByKey(udid) => {
                let endpoint = Endpoint::get("/v1/devices").filter("udid", [udid]);
                let response: Document<Vec<api::Device>> = requestor.request(&endpoint).await?;
                expect_one(
                    response.data,
                    udid,
                    ReadDeviceError::NotFound,
                    ReadDeviceError::NotUnique,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListDevicesOptions {
    pub names: Vec<String>,
    pub platforms: Vec<BundleIdPlatform>,
    pub statuses: Vec<String>,
    pub udids: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

pub struct ListDevicesOperation {
    pub options: ListDevicesOptions,
}

impl ListDevicesOperation {
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<Vec<api::Device>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/devices")
            .filter("name", &o.names)
            .filter("platform", o.platforms.iter().map(BundleIdPlatform::as_str))
            .filter("status", &o.statuses)
            .filter("udid", &o.udids)
            .sort(o.sort.as_deref())
            .limit(o.limit);
        let response: Document<Vec<api::Device>> = requestor.request(&endpoint).await?;
        Ok(response.data)
    }
}

pub struct RegisterDeviceOperation {
    pub name: String,
    pub platform: BundleIdPlatform,
    pub udid: String,
}

impl RegisterDeviceOperation {
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<api::Device, ApiError> {
        let body = json!({
            "data": {
                "type": "devices",
                "attributes": {
                    "name": self.name,
                    "platform": self.platform.as_str(),
                    "udid": self.udid,
                }
            }
        });
        let response: Document<api::Device> =
            requestor.request(&Endpoint::post("/v1/devices", body)).await?;
        Ok(response.data)
    }
}
