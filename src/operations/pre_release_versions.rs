use thiserror::Error;

use crate::api::{self, AppBuildsIncluded, Document, PreReleaseVersionPlatform};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model;

use super::apps::{ReadAppError, ReadAppOperation};
use super::{expect_one, find_included, partition};

/// How the app of a prerelease version is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIdentifier {
    AppId(String),
    BundleId(String),
}

impl AppIdentifier {
    /// A numeric argument is an App Store app id, anything else a bundle identifier.
    pub fn parse(argument: &str) -> Self {
        if !argument.is_empty() && argument.bytes().all(|b| b.is_ascii_digit()) {
            AppIdentifier::AppId(argument.to_string())
        } else {
            AppIdentifier::BundleId(argument.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadPreReleaseVersionError {
    #[error("No prerelease version '{version}' found for app '{app}'")]
    NotFound { app: String, version: String },
    #[error("Prerelease version '{version}' of app '{app}' not unique")]
    NotUnique { app: String, version: String },
    #[error(transparent)]
    App(#[from] ReadAppError),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Find the prerelease version with a version string for one app.
pub struct ReadPreReleaseVersionOperation {
    pub app: AppIdentifier,
    pub version: String,
}

impl ReadPreReleaseVersionOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<model::PreReleaseVersion, ReadPreReleaseVersionError> {
        let app_id = match &self.app {
            AppIdentifier::AppId(id) => id.clone(),
            AppIdentifier::BundleId(bundle_id) => {
                ReadAppOperation::new(None, Some(bundle_id.clone()))
                    .execute(requestor)
                    .await?
                    .id
            }
        };

        let endpoint = Endpoint::get("/v1/preReleaseVersions")
            .filter("app", [&app_id])
            .filter("version", [&self.version])
            .include(["app", "builds"]);
        let response: Document<Vec<api::PreReleaseVersion>, AppBuildsIncluded> =
            requestor.request(&endpoint).await?;

        let app = match &self.app {
            AppIdentifier::AppId(id) | AppIdentifier::BundleId(id) => id,
        };
        let version = expect_one(
            response.data,
            &self.version,
            |v| ReadPreReleaseVersionError::NotFound {
                app: app.clone(),
                version: v,
            },
            |v| ReadPreReleaseVersionError::NotUnique {
                app: app.clone(),
                version: v,
            },
        )?;

        let included = response.included.unwrap_or_default();
        let app = partition(&included, |i| match i {
            AppBuildsIncluded::App(a) => Some(a),
            _ => None,
        });
        let builds = partition(&included, |i| match i {
            AppBuildsIncluded::Build(b) => Some(b),
            _ => None,
        });
        Ok(model::PreReleaseVersion::new(&version, app.first(), &builds))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPreReleaseVersionsOptions {
    pub app_ids: Vec<String>,
    pub platforms: Vec<PreReleaseVersionPlatform>,
    pub versions: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

pub struct ListPreReleaseVersionsOperation {
    pub options: ListPreReleaseVersionsOptions,
}

impl ListPreReleaseVersionsOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<model::PreReleaseVersion>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/preReleaseVersions")
            .filter("app", &o.app_ids)
            .filter("platform", o.platforms.iter().map(PreReleaseVersionPlatform::as_str))
            .filter("version", &o.versions)
            .include(["app", "builds"])
            .sort(o.sort.as_deref())
            .limit(o.limit);

        let response: Document<Vec<api::PreReleaseVersion>, AppBuildsIncluded> =
            requestor.request(&endpoint).await?;
        let included = response.included.unwrap_or_default();

        Ok(response
            .data
            .iter()
            .map(|version| {
                let app = version.related_id("app").and_then(|id| {
                    find_included(&included, id, |i| match i {
                        AppBuildsIncluded::App(a) => Some(a),
                        _ => None,
                    })
                });
                let builds: Vec<api::Build> = version
                    .related_ids("builds")
                    .into_iter()
                    .filter_map(|id| {
                        find_included(&included, id, |i| match i {
                            AppBuildsIncluded::Build(b) => Some(b),
                            _ => None,
                        })
                    })
                    .cloned()
                    .collect();
                model::PreReleaseVersion::new(version, app, &builds)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::FixtureRequestor;
    use serde_json::{json, Value};

    fn version(id: &str, app: &str, builds: &[&str]) -> Value {
        let builds: Vec<Value> = builds
            .iter()
            .map(|b| json!({ "type": "builds", "id": b }))
            .collect();
        json!({
            "type": "preReleaseVersions",
            "id": id,
            "attributes": { "version": "1.0", "platform": "IOS" },
            "relationships": {
                "app": { "data": { "type": "apps", "id": app } },
                "builds": { "data": builds }
            }
        })
    }

    fn included() -> Value {
        json!([
            { "type": "apps", "id": "123", "attributes": { "bundleId": "com.example", "name": "Example" } },
            { "type": "builds", "id": "B1", "attributes": { "version": "7" } },
            { "type": "builds", "id": "B2", "attributes": { "version": "8" } }
        ])
    }

    #[test]
    fn test_app_identifier_parse() {
        assert_eq!(AppIdentifier::parse("432156789"), AppIdentifier::AppId("432156789".into()));
        assert_eq!(
            AppIdentifier::parse("com.example.App"),
            AppIdentifier::BundleId("com.example.App".into())
        );
        assert_eq!(AppIdentifier::parse(""), AppIdentifier::BundleId("".into()));
    }

    #[tokio::test]
    async fn test_read_by_app_id() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [version("V1", "123", &["B1", "B2"])],
            "included": included()
        }));
        let found = ReadPreReleaseVersionOperation {
            app: AppIdentifier::AppId("123".into()),
            version: "1.0".into(),
        }
        .execute(&requestor)
        .await
        .unwrap();

        assert_eq!(found.id, "V1");
        assert_eq!(found.app_bundle_id.as_deref(), Some("com.example"));
        assert_eq!(found.builds, vec!["7", "8"]);

        let requests = requestor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("filter[app]"), Some("123"));
        assert_eq!(requests[0].query_value("filter[version]"), Some("1.0"));
    }

    #[tokio::test]
    async fn test_read_by_bundle_id_resolves_app_first() {
        let requestor = FixtureRequestor::new()
            .respond(json!({
                "data": [{ "type": "apps", "id": "123", "attributes": { "bundleId": "com.example" } }]
            }))
            .respond(json!({ "data": [version("V1", "123", &[])] }));
        ReadPreReleaseVersionOperation {
            app: AppIdentifier::BundleId("com.example".into()),
            version: "1.0".into(),
        }
        .execute(&requestor)
        .await
        .unwrap();

        let requests = requestor.requests();
        assert_eq!(requests[0].query_value("filter[bundleId]"), Some("com.example"));
        assert_eq!(requests[1].query_value("filter[app]"), Some("123"));
    }

    #[tokio::test]
    async fn test_read_unknown_bundle_id() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        let result = ReadPreReleaseVersionOperation {
            app: AppIdentifier::BundleId("com.missing".into()),
            version: "1.0".into(),
        }
        .execute(&requestor)
        .await;
        assert!(matches!(
            result,
            Err(ReadPreReleaseVersionError::App(ReadAppError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_read_missing_version() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        let err = ReadPreReleaseVersionOperation {
            app: AppIdentifier::AppId("123".into()),
            version: "9.9".into(),
        }
        .execute(&requestor)
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "No prerelease version '9.9' found for app '123'");
    }

    #[tokio::test]
    async fn test_list_joins_builds() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [version("V1", "123", &["B2"])],
            "included": included()
        }));
        let versions = ListPreReleaseVersionsOperation {
            options: ListPreReleaseVersionsOptions {
                platforms: vec![PreReleaseVersionPlatform::Ios, PreReleaseVersionPlatform::TvOs],
                sort: Some("-version".into()),
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();

        assert_eq!(versions[0].builds, vec!["8"]);
        assert_eq!(versions[0].app_name.as_deref(), Some("Example"));
        let request = &requestor.requests()[0];
        assert_eq!(request.query_value("filter[platform]"), Some("IOS,TV_OS"));
        assert_eq!(request.query_value("sort"), Some("-version"));
    }
}
