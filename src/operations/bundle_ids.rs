use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::api::{self, BundleIdPlatform, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

use super::expect_one;

#[derive(Debug, Error)]
pub enum ReadBundleIdError {
    #[error("Bundle ID with identifier '{0}' not found.")]
    NotFound(String),
    #[error("Bundle ID with identifier '{0}' not unique.")]
    NotUnique(String),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

pub struct RegisterBundleIdOperation {
    pub identifier: String,
    pub name: String,
    pub platform: BundleIdPlatform,
}

impl RegisterBundleIdOperation {
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<api::BundleId, ApiError> {
        let body = json!({
            "data": {
                "type": "bundleIds",
                "attributes": {
                    "identifier": self.identifier,
                    "name": self.name,
                    "platform": self.platform.as_str(),
                }
            }
        });
        let response: Document<api::BundleId> =
            requestor.request(&Endpoint::post("/v1/bundleIds", body)).await?;
        Ok(response.data)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBundleIdsOptions {
    pub identifiers: Vec<String>,
    pub names: Vec<String>,
    pub platforms: Vec<BundleIdPlatform>,
    pub seed_ids: Vec<String>,
    pub limit: Option<u32>,
}

pub struct ListBundleIdsOperation {
    pub options: ListBundleIdsOptions,
}

impl ListBundleIdsOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<api::BundleId>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/bundleIds")
            .filter("identifier", &o.identifiers)
            .filter("name", &o.names)
            .filter("platform", o.platforms.iter().map(BundleIdPlatform::as_str))
            .filter("seedId", &o.seed_ids)
            .limit(o.limit);
        let response: Document<Vec<api::BundleId>> = requestor.request(&endpoint).await?;
        Ok(response.data)
    }
}

/// Find the single bundle ID registered with an identifier.
pub struct ReadBundleIdOperation {
    pub identifier: String,
}

impl ReadBundleIdOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<api::BundleId, ReadBundleIdError> {
        let endpoint = Endpoint::get("/v1/bundleIds").filter("identifier", [&self.identifier]);
        let response: Document<Vec<api::BundleId>> = requestor.request(&endpoint).await?;
        // The API matches identifiers by prefix.
        let exact = response
            .data
            .into_iter()
            .filter(|b| b.attributes.identifier.as_deref() == Some(self.identifier.as_str()))
            .collect();
        expect_one(
            exact,
            &self.identifier,
            ReadBundleIdError::NotFound,
            ReadBundleIdError::NotUnique,
        )
    }
}

pub struct DeleteBundleIdOperation {
    pub identifier: String,
}

impl DeleteBundleIdOperation {
    /// Returns the id of the deleted bundle ID.
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<String, ReadBundleIdError> {
        let bundle_id = ReadBundleIdOperation {
            identifier: self.identifier.clone(),
        }
        .execute(requestor)
        .await?;

        requestor
            .execute(&Endpoint::delete(format!("/v1/bundleIds/{}", bundle_id.id)))
            .await?;
        info!(id = %bundle_id.id, identifier = %self.identifier, "deleted bundle ID");
        Ok(bundle_id.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::FixtureRequestor;
    use serde_json::Value;

    fn bundle_id(id: &str, identifier: &str) -> Value {
        json!({
            "type": "bundleIds",
            "id": id,
            "attributes": {
                "identifier": identifier,
                "name": "Example",
                "platform": "IOS",
                "seedId": "ABCDE12345"
            }
        })
    }

    #[tokio::test]
    async fn test_register_posts_attributes() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": bundle_id("B1", "com.example") }));
        let created = RegisterBundleIdOperation {
            identifier: "com.example".into(),
            name: "Example".into(),
            platform: BundleIdPlatform::MacOs,
        }
        .execute(&requestor)
        .await
        .unwrap();
        assert_eq!(created.id, "B1");

        let request = &requestor.requests()[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.path, "/v1/bundleIds");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["data"]["type"], "bundleIds");
        assert_eq!(body["data"]["attributes"]["platform"], "MAC_OS");
    }

    #[tokio::test]
    async fn test_read_ignores_prefix_matches() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [bundle_id("B1", "com.example"), bundle_id("B2", "com.example.widget")]
        }));
        let found = ReadBundleIdOperation {
            identifier: "com.example".into(),
        }
        .execute(&requestor)
        .await
        .unwrap();
        assert_eq!(found.id, "B1");
    }

    #[tokio::test]
    async fn test_read_missing() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        let result = ReadBundleIdOperation {
            identifier: "com.example".into(),
        }
        .execute(&requestor)
        .await;
        assert!(matches!(result, Err(ReadBundleIdError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_reads_then_deletes() {
        let requestor = FixtureRequestor::new()
            .respond(json!({ "data": [bundle_id("B1", "com.example")] }))
            .no_content();
        let id = DeleteBundleIdOperation {
            identifier: "com.example".into(),
        }
        .execute(&requestor)
        .await
        .unwrap();
        assert_eq!(id, "B1");

        let requests = requestor.requests();
        assert_eq!(requests[1].method, reqwest::Method::DELETE);
        assert_eq!(requests[1].path, "/v1/bundleIds/B1");
    }

    #[tokio::test]
    async fn test_list_platform_filter() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        ListBundleIdsOperation {
            options: ListBundleIdsOptions {
                platforms: vec![BundleIdPlatform::Ios, BundleIdPlatform::Universal],
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();
        assert_eq!(
            requestor.requests()[0].query_value("filter[platform]"),
            Some("IOS,UNIVERSAL")
        );
    }
}
