//! Wire models of the App Store Connect API.
//!
//! Responses follow JSON:API: a `data` member holding one resource or a list,
//! and an optional flat `included` array of side-loaded related resources.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

mod resources;

pub use resources::*;

/// Response envelope. `I` is the tagged union of resources that may appear in `included`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned, I: DeserializeOwned"))]
pub struct Document<D, I = IgnoredAny> {
    pub data: D,
    #[serde(default)]
    pub included: Option<Vec<I>>,
    #[serde(default)]
    pub links: Option<DocumentLinks>,
    #[serde(default)]
    pub meta: Option<PagingMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentLinks {
    #[serde(rename = "self")]
    pub this: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingMeta {
    pub paging: Paging,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    pub total: u64,
    pub limit: u64,
}

/// One resource object. Its `type` member is not kept: the surrounding
/// document or tagged union already fixes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A> {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: A,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl<A> Resource<A> {
    /// Id of the resource a to-one relationship points at.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            Linkage::One(identifier) => Some(identifier.id.as_str()),
            Linkage::Many(_) => None,
        }
    }

    /// Ids of the resources a to-many relationship points at.
    pub fn related_ids(&self, name: &str) -> Vec<&str> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(identifiers)) => {
                identifiers.iter().map(|i| i.id.as_str()).collect()
            }
            Some(Linkage::One(identifier)) => vec![identifier.id.as_str()],
            None => Vec::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relationship_linkage() {
        let build: Build = serde_json::from_value(json!({
            "type": "builds",
            "id": "b1",
            "attributes": { "version": "42" },
            "relationships": {
                "app": { "data": { "type": "apps", "id": "a1" } },
                "betaGroups": { "data": [
                    { "type": "betaGroups", "id": "g1" },
                    { "type": "betaGroups", "id": "g2" }
                ] },
                "preReleaseVersion": { "links": { "self": "https://example.com" } }
            }
        }))
        .unwrap();

        assert_eq!(build.attributes.version.as_deref(), Some("42"));
        assert_eq!(build.related_id("app"), Some("a1"));
        assert_eq!(build.related_ids("betaGroups"), vec!["g1", "g2"]);
        assert_eq!(build.related_id("preReleaseVersion"), None);
        assert_eq!(build.related_id("missing"), None);
    }

    #[test]
    fn test_document_without_included() {
        let doc: Document<Vec<App>> = serde_json::from_value(json!({
            "data": [{ "type": "apps", "id": "1", "attributes": null }],
            "links": { "self": "https://api.appstoreconnect.apple.com/v1/apps" },
            "meta": { "paging": { "total": 1, "limit": 50 } }
        }))
        .unwrap();
        assert_eq!(doc.data.len(), 1);
        assert!(doc.data[0].attributes.name.is_none());
        assert!(doc.included.is_none());
        assert_eq!(doc.meta.unwrap().paging.total, 1);
    }
}
