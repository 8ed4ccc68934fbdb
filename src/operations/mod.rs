//! One operation per API use case.
//!
//! An operation builds the endpoint for its request, sends it through a
//! [`Requestor`](crate::client::Requestor), checks what came back and maps it
//! to its output. Nothing here retries or caches.

use serde::de::DeserializeOwned;

use crate::api::{Document, Resource};
use crate::client::Requestor;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

pub mod apps;
pub mod beta_groups;
pub mod beta_testers;
pub mod builds;
pub mod bundle_ids;
pub mod certificates;
pub mod devices;
pub mod pre_release_versions;

/// How a single resource is identified: by its opaque id, or by a secondary
/// key (email, UDID, bundle identifier) that is unique in practice but not
/// guaranteed to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(String),
    ByKey(String),
}

impl Lookup {
    /// The id wins when both are given. `None` when neither is.
    pub fn from_parts(id: Option<String>, key: Option<String>) -> Option<Self> {
        match (id, key) {
            (Some(id), _) => Some(Lookup::ById(id)),
            (None, Some(key)) => Some(Lookup::ByKey(key)),
            (None, None) => None,
        }
    }
}

/// The only item of `items`, or the matching cardinality error.
pub(crate) fn expect_one<T, E>(
    items: Vec<T>,
    key: &str,
    not_found: impl FnOnce(String) -> E,
    not_unique: impl FnOnce(String) -> E,
) -> Result<T, E> {
    let mut items = items.into_iter();
    match (items.next(), items.next()) {
        (None, _) => Err(not_found(key.to_string())),
        (Some(only), None) => Ok(only),
        (Some(_), Some(_)) => Err(not_unique(key.to_string())),
    }
}

/// Turn a 404 into `Ok(None)`.
pub(crate) fn optional<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Primary data and side-loaded resources of a fetch-by-id request.
///
/// A 404, an empty body and a document without (or with null) `data` all
/// come back as `None`.
pub(crate) async fn fetch_by_id<R, T, I>(
    requestor: &R,
    endpoint: &Endpoint,
) -> Result<Option<(T, Option<Vec<I>>)>, ApiError>
where
    R: Requestor,
    T: DeserializeOwned,
    I: DeserializeOwned,
{
    let body = optional(requestor.execute(endpoint).await)?.flatten();
    let Some(body) = body.filter(|b| b.get("data").is_some_and(|d| !d.is_null())) else {
        return Ok(None);
    };
    let document: Document<T, I> = serde_json::from_value(body)?;
    Ok(Some((document.data, document.included)))
}

/// Every resource of one kind from a side-loaded `included` array, in response order.
pub(crate) fn partition<I, T, F>(included: &[I], pick: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&I) -> Option<&T>,
{
    included.iter().filter_map(pick).cloned().collect()
}

/// The side-loaded resource of one kind with the given id.
pub(crate) fn find_included<'a, I, A, F>(
    included: &'a [I],
    id: &str,
    pick: F,
) -> Option<&'a Resource<A>>
where
    F: Fn(&'a I) -> Option<&'a Resource<A>>,
{
    included.iter().filter_map(pick).find(|r| r.id == id)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::client::Requestor;
    use crate::endpoint::Endpoint;
    use crate::error::ApiError;

    /// Answers requests with queued fixtures, in order, and records what was asked.
    #[derive(Default)]
    pub struct FixtureRequestor {
        responses: Mutex<VecDeque<Result<Option<Value>, ApiError>>>,
        requests: Mutex<Vec<Endpoint>>,
    }

    impl FixtureRequestor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, body: Value) -> Self {
            self.push(Ok(Some(body)))
        }

        pub fn no_content(self) -> Self {
            self.push(Ok(None))
        }

        pub fn fail(self, error: ApiError) -> Self {
            self.push(Err(error))
        }

        pub fn requests(&self) -> Vec<Endpoint> {
            self.requests.lock().unwrap().clone()
        }

        fn push(self, response: Result<Option<Value>, ApiError>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }
    }

    #[async_trait]
    impl Requestor for FixtureRequestor {
        async fn execute(&self, endpoint: &Endpoint) -> Result<Option<Value>, ApiError> {
            self.requests.lock().unwrap().push(endpoint.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request to {}", endpoint.path))
        }
    }

    pub fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            errors: vec![],
        }
    }
}
