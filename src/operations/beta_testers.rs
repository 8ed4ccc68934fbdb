use thiserror::Error;
use tracing::info;

use crate::api::{self, BetaTesterIncluded, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model;

use super::{expect_one, fetch_by_id, find_included, optional, partition, Lookup};

/// Related resources that can be side-loaded with a beta tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BetaTesterRelationship {
    Apps,
    BetaGroups,
    Builds,
}

impl BetaTesterRelationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetaTesterRelationship::Apps => "apps",
            BetaTesterRelationship::BetaGroups => "betaGroups",
            BetaTesterRelationship::Builds => "builds",
        }
    }
}

/// Maximum number of related resources side-loaded per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetaTesterLimits {
    pub apps: Option<u32>,
    pub builds: Option<u32>,
    pub beta_groups: Option<u32>,
}

#[derive(Debug, Error)]
pub enum GetBetaTesterError {
    #[error("Beta tester with provided email or id '{0}' doesn't exist.")]
    NotFound(String),
    #[error("Beta tester with email address '{0}' not unique")]
    NotUnique(String),
    #[error("Invalid input, either email or id is required.")]
    InvalidInput,
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// A beta tester and, per requested relationship, the resources side-loaded with it.
/// Relationships that were not requested are `None`.
#[derive(Debug, Clone)]
pub struct BetaTesterOutput {
    pub beta_tester: api::BetaTester,
    pub beta_groups: Option<Vec<api::BetaGroup>>,
    pub apps: Option<Vec<api::App>>,
    pub builds: Option<Vec<api::Build>>,
}

impl BetaTesterOutput {
    fn new(
        beta_tester: api::BetaTester,
        included: Option<Vec<BetaTesterIncluded>>,
        requested: &[BetaTesterRelationship],
    ) -> Self {
        let included = included.unwrap_or_default();
        let wanted = |kind| requested.contains(&kind);

        BetaTesterOutput {
            beta_tester,
            beta_groups: wanted(BetaTesterRelationship::BetaGroups).then(|| {
                partition(&included, |i| match i {
                    BetaTesterIncluded::BetaGroup(g) => Some(g),
                    _ => None,
                })
            }),
            apps: wanted(BetaTesterRelationship::Apps).then(|| {
                partition(&included, |i| match i {
                    BetaTesterIncluded::App(a) => Some(a),
                    _ => None,
                })
            }),
            builds: wanted(BetaTesterRelationship::Builds).then(|| {
                partition(&included, |i| match i {
                    BetaTesterIncluded::Build(b) => Some(b),
                    _ => None,
                })
            }),
        }
    }
}

impl From<&BetaTesterOutput> for model::BetaTester {
    fn from(output: &BetaTesterOutput) -> Self {
        let mut tester = model::BetaTester::new(
            &output.beta_tester,
            output.beta_groups.as_deref().unwrap_or_default(),
            output.apps.as_deref().unwrap_or_default(),
        );
        tester.builds = output
            .builds
            .iter()
            .flatten()
            .map(|b| model::Build::new(b, None, None))
            .collect();
        tester
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetBetaTesterOptions {
    pub id: Option<String>,
    pub email: Option<String>,
    pub include: Vec<BetaTesterRelationship>,
    pub limits: BetaTesterLimits,
}

/// Fetch one beta tester by id, or find the single tester with a given email.
pub struct GetBetaTesterOperation {
    lookup: Option<Lookup>,
    include: Vec<BetaTesterRelationship>,
    limits: BetaTesterLimits,
}

impl GetBetaTesterOperation {
    pub fn new(options: GetBetaTesterOptions) -> Self {
        GetBetaTesterOperation {
            lookup: Lookup::from_parts(options.id, options.email),
            include: options.include,
            limits: options.limits,
        }
    }

    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<BetaTesterOutput, GetBetaTesterError> {
        let lookup = self.lookup.as_ref().ok_or(GetBetaTesterError::InvalidInput)?;
        let include = self.include.iter().map(BetaTesterRelationship::as_str);

        match lookup {
            Lookup::ById(id) => {
                let endpoint = Endpoint::get(format!("/v1/betaTesters/{id}")).include(include);
                match fetch_by_id::<_, api::BetaTester, BetaTesterIncluded>(requestor, &endpoint)
                    .await?
                {
                    Some((tester, included)) => {
                        Ok(BetaTesterOutput::new(tester, included, &self.include))
                    }
                    None => Err(GetBetaTesterError::NotFound(id.clone())),
                }
            }
            Lookup::ByKey(email) => {
                let endpoint = Endpoint::get("/v1/betaTesters")
                    .filter("email", [email])
                    .include(include)
                    .limit_related("apps", self.limits.apps)
                    .limit_related("builds", self.limits.builds)
                    .limit_related("betaGroups", self.limits.beta_groups);
                let response: Document<Vec<api::BetaTester>, BetaTesterIncluded> =
                    requestor.request(&endpoint).await?;
                let tester = expect_one(
                    response.data,
                    email,
                    GetBetaTesterError::NotFound,
                    GetBetaTesterError::NotUnique,
                )?;
                Ok(BetaTesterOutput::new(tester, response.included, &self.include))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBetaTestersOptions {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub invite_type: Option<String>,
    pub app_ids: Vec<String>,
    pub beta_group_ids: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
    pub limit_apps: Option<u32>,
    pub limit_beta_groups: Option<u32>,
}

pub struct ListBetaTestersOperation {
    pub options: ListBetaTestersOptions,
}

impl ListBetaTestersOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<model::BetaTester>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/betaTesters")
            .filter("email", &o.email)
            .filter("firstName", &o.first_name)
            .filter("lastName", &o.last_name)
            .filter("inviteType", &o.invite_type)
            .filter("apps", &o.app_ids)
            .filter("betaGroups", &o.beta_group_ids)
            .include(["apps", "betaGroups"])
            .limit_related("apps", o.limit_apps)
            .limit_related("betaGroups", o.limit_beta_groups)
            .sort(o.sort.as_deref())
            .limit(o.limit);

        let response: Document<Vec<api::BetaTester>, BetaTesterIncluded> =
            requestor.request(&endpoint).await?;
        let included = response.included.unwrap_or_default();

        Ok(response
            .data
            .iter()
            .map(|tester| {
                let groups: Vec<api::BetaGroup> = tester
                    .related_ids("betaGroups")
                    .into_iter()
                    .filter_map(|id| {
                        find_included(&included, id, |i| match i {
                            BetaTesterIncluded::BetaGroup(g) => Some(g),
                            _ => None,
                        })
                    })
                    .cloned()
                    .collect();
                let apps: Vec<api::App> = tester
                    .related_ids("apps")
                    .into_iter()
                    .filter_map(|id| {
                        find_included(&included, id, |i| match i {
                            BetaTesterIncluded::App(a) => Some(a),
                            _ => None,
                        })
                    })
                    .cloned()
                    .collect();
                model::BetaTester::new(tester, &groups, &apps)
            })
            .collect())
    }
}

/// Remove a beta tester, looking it up by email first when no id is given.
pub struct DeleteBetaTesterOperation {
    lookup: Option<Lookup>,
}

impl DeleteBetaTesterOperation {
    pub fn new(id: Option<String>, email: Option<String>) -> Self {
        DeleteBetaTesterOperation {
            lookup: Lookup::from_parts(id, email),
        }
    }

    /// Returns the id of the deleted tester.
    pub async fn execute<R: Requestor>(&self, requestor: &R) -> Result<String, GetBetaTesterError> {
        let id = match self.lookup.as_ref().ok_or(GetBetaTesterError::InvalidInput)? {
            Lookup::ById(id) => id.clone(),
            Lookup::ByKey(email) => {
                let found = GetBetaTesterOperation::new(GetBetaTesterOptions {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .execute(requestor)
                .await?;
                found.beta_tester.id
            }
        };

        let endpoint = Endpoint::delete(format!("/v1/betaTesters/{id}"));
        match optional(requestor.execute(&endpoint).await)? {
            Some(_) => {
                info!(%id, "deleted beta tester");
                Ok(id)
            }
            None => Err(GetBetaTesterError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::{status, FixtureRequestor};
    use serde_json::{json, Value};

    fn tester(id: &str, email: &str) -> Value {
        json!({
            "type": "betaTesters",
            "id": id,
            "attributes": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": email,
                "inviteType": "EMAIL"
            },
            "relationships": {
                "apps": { "data": [{ "type": "apps", "id": "app-1" }] },
                "betaGroups": { "data": [
                    { "type": "betaGroups", "id": "group-1" },
                    { "type": "betaGroups", "id": "group-2" }
                ] }
            }
        })
    }

    fn included() -> Value {
        json!([
            { "type": "betaGroups", "id": "group-1", "attributes": { "name": "Internal" } },
            { "type": "apps", "id": "app-1", "attributes": { "bundleId": "com.example.app", "name": "Example" } },
            { "type": "betaGroups", "id": "group-2", "attributes": { "name": "External" } },
            { "type": "bundleIds", "id": "unrelated" }
        ])
    }

    fn by_email(email: &str) -> GetBetaTesterOperation {
        GetBetaTesterOperation::new(GetBetaTesterOptions {
            email: Some(email.into()),
            include: vec![
                BetaTesterRelationship::BetaGroups,
                BetaTesterRelationship::Apps,
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_by_email_single_match_partitions_includes() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [tester("t-1", "a@b.com")],
            "included": included()
        }));

        let output = by_email("a@b.com").execute(&requestor).await.unwrap();

        assert_eq!(output.beta_tester.id, "t-1");
        let groups: Vec<&str> = output
            .beta_groups
            .as_ref()
            .unwrap()
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(groups, vec!["group-1", "group-2"]);
        assert_eq!(output.apps.as_ref().unwrap().len(), 1);
        assert!(output.builds.is_none());

        let shown = model::BetaTester::from(&output);
        assert_eq!(shown.beta_groups, vec!["Internal", "External"]);
        assert_eq!(shown.apps, vec!["com.example.app"]);

        let requests = requestor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/v1/betaTesters");
        assert_eq!(requests[0].query_value("filter[email]"), Some("a@b.com"));
        assert_eq!(requests[0].query_value("include"), Some("betaGroups,apps"));
    }

    #[tokio::test]
    async fn test_by_email_without_matches_is_not_found() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [] }));
        let result = by_email("a@b.com").execute(&requestor).await;
        assert!(matches!(result, Err(GetBetaTesterError::NotFound(ref k)) if k == "a@b.com"));
    }

    #[tokio::test]
    async fn test_by_email_with_two_matches_is_not_unique() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [tester("t-1", "a@b.com"), tester("t-2", "a@b.com")]
        }));
        let result = by_email("a@b.com").execute(&requestor).await;
        match result {
            Err(e @ GetBetaTesterError::NotUnique(_)) => {
                assert_eq!(e.to_string(), "Beta tester with email address 'a@b.com' not unique");
            }
            other => panic!("expected NotUnique, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_by_email_sends_related_limits() {
        let requestor = FixtureRequestor::new().respond(json!({ "data": [tester("t-1", "a@b.com")] }));
        let operation = GetBetaTesterOperation::new(GetBetaTesterOptions {
            email: Some("a@b.com".into()),
            include: vec![BetaTesterRelationship::Builds],
            limits: BetaTesterLimits {
                apps: Some(3),
                builds: Some(10),
                beta_groups: None,
            },
            ..Default::default()
        });

        let output = operation.execute(&requestor).await.unwrap();
        assert_eq!(output.builds.as_deref().map(<[_]>::len), Some(0));
        assert!(output.beta_groups.is_none());

        let request = &requestor.requests()[0];
        assert_eq!(request.query_value("limit[apps]"), Some("3"));
        assert_eq!(request.query_value("limit[builds]"), Some("10"));
        assert_eq!(request.query_value("limit[betaGroups]"), None);
    }

    #[tokio::test]
    async fn test_builds_are_part_of_the_shown_tester() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": tester("123", "a@b.com"),
            "included": [
                { "type": "builds", "id": "b-1", "attributes": { "version": "42", "expired": false } }
            ]
        }));
        let operation = GetBetaTesterOperation::new(GetBetaTesterOptions {
            id: Some("123".into()),
            include: vec![BetaTesterRelationship::Builds],
            ..Default::default()
        });

        let output = operation.execute(&requestor).await.unwrap();
        let shown = model::BetaTester::from(&output);
        assert_eq!(shown.builds.len(), 1);
        assert_eq!(shown.builds[0].version.as_deref(), Some("42"));

        let value = serde_json::to_value(&shown).unwrap();
        assert_eq!(value["builds"][0]["version"], "42");
        assert_eq!(value["email"], "a@b.com");
    }

    #[test]
    fn test_tester_without_builds_omits_them() {
        let tester: api::BetaTester = serde_json::from_value(tester("123", "a@b.com")).unwrap();
        let shown = model::BetaTester::new(&tester, &[], &[]);
        let value = serde_json::to_value(&shown).unwrap();
        assert!(value.get("builds").is_none());
    }

    #[tokio::test]
    async fn test_by_id_fetches_directly() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": tester("123", "a@b.com"),
            "included": included()
        }));
        let operation = GetBetaTesterOperation::new(GetBetaTesterOptions {
            id: Some("123".into()),
            email: Some("ignored@b.com".into()),
            include: vec![BetaTesterRelationship::Apps],
            ..Default::default()
        });

        let output = operation.execute(&requestor).await.unwrap();
        assert_eq!(output.beta_tester.id, "123");
        assert!(output.beta_groups.is_none());

        let requests = requestor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/v1/betaTesters/123");
        assert_eq!(requests[0].query_value("filter[email]"), None);
    }

    #[tokio::test]
    async fn test_by_id_empty_response_is_not_found() {
        let empty = [
            FixtureRequestor::new().respond(json!({ "data": null })),
            FixtureRequestor::new().respond(json!({})),
            FixtureRequestor::new().no_content(),
        ];
        for requestor in empty {
            let operation = GetBetaTesterOperation::new(GetBetaTesterOptions {
                id: Some("123".into()),
                ..Default::default()
            });
            let result = operation.execute(&requestor).await;
            assert!(matches!(result, Err(GetBetaTesterError::NotFound(ref k)) if k == "123"));
        }
    }

    #[tokio::test]
    async fn test_by_id_404_is_not_found() {
        let requestor = FixtureRequestor::new().fail(status(404));
        let operation = GetBetaTesterOperation::new(GetBetaTesterOptions {
            id: Some("123".into()),
            ..Default::default()
        });
        let result = operation.execute(&requestor).await;
        assert!(matches!(result, Err(GetBetaTesterError::NotFound(ref k)) if k == "123"));
    }

    #[tokio::test]
    async fn test_neither_id_nor_email_is_invalid_input() {
        let requestor = FixtureRequestor::new();
        let result = GetBetaTesterOperation::new(GetBetaTesterOptions::default())
            .execute(&requestor)
            .await;
        assert!(matches!(result, Err(GetBetaTesterError::InvalidInput)));
        assert!(requestor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_errors_pass_through() {
        let requestor = FixtureRequestor::new().fail(status(500));
        let result = by_email("a@b.com").execute(&requestor).await;
        assert!(matches!(
            result,
            Err(GetBetaTesterError::Upstream(ApiError::Status { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_list_joins_relationships() {
        let requestor = FixtureRequestor::new().respond(json!({
            "data": [tester("t-1", "a@b.com")],
            "included": included()
        }));
        let operation = ListBetaTestersOperation {
            options: ListBetaTestersOptions {
                first_name: Some("Ada".into()),
                app_ids: vec!["app-1".into()],
                limit: Some(5),
                ..Default::default()
            },
        };

        let testers = operation.execute(&requestor).await.unwrap();
        assert_eq!(testers.len(), 1);
        assert_eq!(testers[0].beta_groups, vec!["Internal", "External"]);
        assert_eq!(testers[0].apps, vec!["com.example.app"]);

        let request = &requestor.requests()[0];
        assert_eq!(request.query_value("filter[firstName]"), Some("Ada"));
        assert_eq!(request.query_value("filter[apps]"), Some("app-1"));
        assert_eq!(request.query_value("filter[email]"), None);
        assert_eq!(request.query_value("limit"), Some("5"));
    }

    #[tokio::test]
    async fn test_delete_by_email_looks_up_then_deletes() {
        let requestor = FixtureRequestor::new()
            .respond(json!({ "data": [tester("t-9", "a@b.com")] }))
            .no_content();

        let id = DeleteBetaTesterOperation::new(None, Some("a@b.com".into()))
            .execute(&requestor)
            .await
            .unwrap();
        assert_eq!(id, "t-9");

        let requests = requestor.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, reqwest::Method::DELETE);
        assert_eq!(requests[1].path, "/v1/betaTesters/t-9");
    }
}
