use tracing::debug;

use crate::api::{self, BuildIncluded, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model;

use super::apps::{ListAppsOperation, ListAppsOptions};
use super::find_included;

#[derive(Debug, Clone, Default)]
pub struct ListBuildsOptions {
    /// Bundle identifiers, resolved to app ids before listing.
    pub bundle_ids: Vec<String>,
    /// `Some(false)` hides expired builds.
    pub expired: Option<bool>,
    pub pre_release_versions: Vec<String>,
    pub build_numbers: Vec<String>,
    pub processing_states: Vec<String>,
    pub beta_review_states: Vec<String>,
    pub beta_group_ids: Vec<String>,
    /// Side-load limit for individual testers and beta build localizations.
    pub limit: Option<u32>,
}

pub struct ListBuildsOperation {
    pub options: ListBuildsOptions,
}

impl ListBuildsOperation {
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<Vec<model::Build>, ApiError> {
        let o = &self.options;

        let mut app_ids = Vec::new();
        if !o.bundle_ids.is_empty() {
            let apps = ListAppsOperation {
                options: ListAppsOptions {
                    bundle_ids: o.bundle_ids.clone(),
                    ..Default::default()
                },
            }
            .execute(requestor)
            .await?;
            if apps.is_empty() {
                debug!(bundle_ids = ?o.bundle_ids, "no apps match the bundle IDs");
                return Ok(Vec::new());
            }
            app_ids = apps.into_iter().map(|a| a.id).collect();
        }

        let endpoint = Endpoint::get("/v1/builds")
            .filter("app", &app_ids)
            .filter("expired", o.expired.map(|b| b.to_string()))
            .filter("preReleaseVersion.version", &o.pre_release_versions)
            .filter("version", &o.build_numbers)
            .filter("processingState", &o.processing_states)
            .filter("betaAppReviewSubmission.betaReviewState", &o.beta_review_states)
            .filter("betaGroups", &o.beta_group_ids)
            .include(["app", "preReleaseVersion"])
            .limit_related("individualTesters", o.limit)
            .limit_related("betaBuildLocalizations", o.limit);

        let response: Document<Vec<api::Build>, BuildIncluded> =
            requestor.request(&endpoint).await?;
        let included = response.included.unwrap_or_default();

        Ok(response
            .data
            .iter()
            .map(|build| {
                let app = build.related_id("app").and_then(|id| {
                    find_included(&included, id, |i| match i {
                        BuildIncluded::App(a) => Some(a),
                        _ => None,
                    })
                });
                let version = build.related_id("preReleaseVersion").and_then(|id| {
                    find_included(&included, id, |i| match i {
                        BuildIncluded::PreReleaseVersion(v) => Some(v),
                        _ => None,
                    })
                });
                model::Build::new(build, app, version)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::FixtureRequestor;
    use serde_json::{json, Value};

    fn build(id: &str, number: &str, app: &str, version: &str) -> Value {
        json!({
            "type": "builds",
            "id": id,
            "attributes": {
                "version": number,
                "expired": false,
                "processingState": "VALID",
                "uploadedDate": "2020-04-08T05:50:26.000+0000"
            },
            "relationships": {
                "app": { "data": { "type": "apps", "id": app } },
                "preReleaseVersion": { "data": { "type": "preReleaseVersions", "id": version } }
            }
        })
    }

    #[tokio::test]
    async fn test_resolves_bundle_ids_then_joins() {
        let requestor = FixtureRequestor::new()
            .respond(json!({
                "data": [{ "type": "apps", "id": "A1", "attributes": { "bundleId": "com.example" } }]
            }))
            .respond(json!({
                "data": [build("B1", "42", "A1", "V1"), build("B2", "43", "A1", "V2")],
                "included": [
                    { "type": "apps", "id": "A1", "attributes": { "bundleId": "com.example", "name": "Example" } },
                    { "type": "preReleaseVersions", "id": "V1", "attributes": { "version": "1.0", "platform": "IOS" } },
                    { "type": "buildBetaDetails", "id": "X" }
                ]
            }));

        let builds = ListBuildsOperation {
            options: ListBuildsOptions {
                bundle_ids: vec!["com.example".into()],
                expired: Some(false),
                limit: Some(3),
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();

        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].app_bundle_id.as_deref(), Some("com.example"));
        assert_eq!(builds[0].short_version.as_deref(), Some("1.0"));
        assert_eq!(builds[0].version.as_deref(), Some("42"));
        assert_eq!(builds[1].short_version, None);

        let requests = requestor.requests();
        assert_eq!(requests[0].path, "/v1/apps");
        assert_eq!(requests[0].query_value("filter[bundleId]"), Some("com.example"));
        assert_eq!(requests[1].path, "/v1/builds");
        assert_eq!(requests[1].query_value("filter[app]"), Some("A1"));
        assert_eq!(requests[1].query_value("filter[expired]"), Some("false"));
        assert_eq!(requests[1].query_value("include"), Some("app,preReleaseVersion"));
        assert_eq!(requests[1].query_value("limit[individualTesters]"), Some("3"));
        assert_eq!(requests[1].query_value("limit[betaBuildLocalizations]"), Some("3"));
    }

    #[tokio::test]
    async fn test_unknown_bundle_id_lists_nothing() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        let builds = ListBuildsOperation {
            options: ListBuildsOptions {
                bundle_ids: vec!["com.missing".into()],
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();
        assert!(builds.is_empty());
        assert_eq!(requestor.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_without_bundle_ids_lists_directly() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        ListBuildsOperation {
            options: ListBuildsOptions {
                build_numbers: vec!["42".into(), "43".into()],
                ..Default::default()
            },
        }
        .execute(&requestor)
        .await
        .unwrap();

        let requests = requestor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("filter[version]"), Some("42,43"));
        assert_eq!(requests[0].query_value("filter[app]"), None);
        assert_eq!(requests[0].query_value("filter[expired]"), None);
    }
}
