use crate::api::{self, AppBuildsIncluded, Document};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model;

use super::find_included;

#[derive(Debug, Clone, Default)]
pub struct ListBetaGroupsOptions {
    pub app_ids: Vec<String>,
    pub names: Vec<String>,
    pub is_internal: Option<bool>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

/// List beta groups, each joined with the app it belongs to.
pub struct ListBetaGroupsOperation {
    pub options: ListBetaGroupsOptions,
}

impl ListBetaGroupsOperation {
    pub async fn execute<R: Requestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<model::BetaGroup>, ApiError> {
        let o = &self.options;
        let endpoint = Endpoint::get("/v1/betaGroups")
            .filter("app", &o.app_ids)
            .filter("name", &o.names)
            .filter("isInternalGroup", o.is_internal.map(|b| b.to_string()))
            .include(["app"])
            .sort(o.sort.as_deref())
            .limit(o.limit);

        let response: Document<Vec<api::BetaGroup>, AppBuildsIncluded> =
            requestor.request(&endpoint).await?;
        let included = response.included.unwrap_or_default();

        Ok(response
            .data
            .iter()
            .map(|group| {
                let app = group.related_id("app").and_then(|id| {
                    find_included(&included, id, |i| match i {
                        AppBuildsIncluded::App(a) => Some(a),
                        _ => None,
                    })
                });
                model::BetaGroup::new(group, app)
            })
            .collect())
    }
}
