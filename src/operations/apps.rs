use serde::de::IgnoredAny;
use thiserror::Error;

use crate::api::{self, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

use super::{expect_one, fetch_by_id, Lookup};

#[derive(Debug, Error)]
pub enum ReadAppError {
    #[error("No app was found with id or bundle ID '{0}'")]
    NotFound(String),
    #[error("App with bundle ID '{0}' not unique")]
    NotUnique(String),
    #[error("Invalid input, either an app id or a bundle ID is required.")]
    InvalidInput,
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Fetch one app by id, or find it by bundle identifier.
pub struct ReadAppOperation {
    lookup: Option<Lookup>,
}

impl ReadAppOperation {
    pub fn new(id: Option<String>, bundle_id: Option<String>) -> Self {
        ReadAppOperation {
            lookup: Lookup::from_parts(id, bundle_id),
        }
    }

    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<api::App, ReadAppError> {
        match self.lookup.as_ref().ok_or(ReadAppError::InvalidInput)? {
            Lookup::ById(id) => {
                let endpoint = Endpoint::get(format!("/v1/apps/{id}"));
                fetch_by_id::<_, api::App, IgnoredAny>(requestor, &endpoint)
                    .await?
                    .map(|(resource, _)| resource)
                    .ok_or_else(|| ReadAppError::NotFound(id.clone()))
            }
            Lookup::ByKey(bundle_id) => {
                let endpoint = Endpoint::get("/v1/apps").filter("bundleId", [bundle_id]);
                let response: Document<Vec<api::App>> = requestor.request(&endpoint).await?;
                expect_one(
                    response.data,
                    bundle_id,
                    ReadAppError::NotFound,
                    ReadAppError::NotUnique,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListAppsOptions {
    pub bundle_ids: Vec<String>,
    pub names: Vec<String>,
    pub skus: Vec<String>,
    pub limit: Option<u32>,
}

pub struct ListAppsOperation {
    pub options: ListAppsOptions,
}

impl ListAppsOperation {
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<Vec<api::App>, ApiError> {
        let endpoint = Endpoint::get("/v1/apps")
            .filter("bundleId", &self.options.bundle_ids)
            .filter("name", &self.options.names)
            .filter("sku", &self.options.skus)
            .limit(self.options.limit);
        let response: Document<Vec<api::App>> = requestor.request(&endpoint).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::{status, FixtureRequestor};
    use serde_json::json;

    fn app(id: &str, bundle_id: &str) -> serde_json::Value {
        json!({
            "type": "apps",
            "id": id,
            "attributes": { "bundleId": bundle_id, "name": "Example", "sku": "EX1" }
        })
    }

    #[tokio::test]
    async fn test_read_by_bundle_id() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [app("1", "com.example")] }));
        let found = ReadAppOperation::new(None, Some("com.example".into()))
            .execute(&requestor)
            .await
            .unwrap();
        assert_eq!(found.id, "1");
        assert_eq!(
            requestor.requests()[0].query_value("filter[bundleId]"),
            Some("com.example")
        );
    }

    #[tokio::test]
    async fn test_read_by_bundle_id_duplicate() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [app("1", "com.example"), app("2", "com.example")]
        }));
        let result = ReadAppOperation::new(None, Some("com.example".into()))
            .execute(&requestor)
            .await;
        assert!(matches!(result, Err(ReadAppError::NotUnique(ref k)) if k == "com.example"));
    }

    #[tokio::test]
    async fn test_read_by_missing_id() {
        let requestor = FixtureRequestor::new().fail(status(404));
        let result = ReadAppOperation::new(Some("42".into()), None)
            .execute(&requestor)
            .await;
        assert!(matches!(result, Err(ReadAppError::NotFound(ref k)) if k == "42"));
        assert_eq!(requestor.requests()[0].path, "/v1/apps/42");
    }

    #[tokio::test]
    async fn test_read_by_id_empty_response() {
        let empty = [
            FixtureRequestor::new().respond(json!({ "data": null })),
            FixtureRequestor::new().respond(json!({})),
            FixtureRequestor::new().no_content(),
        ];
        for requestor in empty {
            let result = ReadAppOperation::new(Some("42".into()), None)
                .execute(&requestor)
                .await;
            assert!(matches!(result, Err(ReadAppError::NotFound(ref k)) if k == "42"));
        }
    }

    #[tokio::test]
    async fn test_read_by_id_malformed_body() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": "not a resource" }));
        let result = ReadAppOperation::new(Some("42".into()), None)
            .execute(&requestor)
            .await;
        assert!(matches!(result, Err(ReadAppError::Upstream(ApiError::Decode(_)))));
    }

    #[tokio::test]
    async fn test_read_without_input() {
        let requestor = FixtureRequestor::new();
        let result = ReadAppOperation::new(None, None).execute(&requestor).await;
        assert!(matches!(result, Err(ReadAppError::InvalidInput)));
        assert!(requestor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [app("1", "com.a"), app("2", "com.b")]
        }));
        let apps = ListAppsOperation {
            options: ListAppsOptions {
                bundle_ids: vec!["com.a".into(), "com.b".into()],
                limit: Some(2),
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();

        assert_eq!(apps.len(), 2);
        let request = &requestor.requests()[0];
        assert_eq!(request.query_value("filter[bundleId]"), Some("com.a,com.b"));
        assert_eq!(request.query_value("filter[name]"), None);
        assert_eq!(request.query_value("limit"), Some("2"));
    }
}
