//! Request descriptors.
//!
//! An [`Endpoint`] fully describes one API call: method, path, query and body.
//! Operations build them; a [`Requestor`](crate::client::Requestor) sends them.

use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Endpoint {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Endpoint {
            body: Some(body),
            ..Self::new(Method::POST, path)
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Endpoint {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `filter[<field>]=a,b,c`. Empty value lists are dropped.
    pub fn filter<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_param(format!("filter[{field}]"), values)
    }

    /// `include=a,b`. An empty include set adds nothing.
    pub fn include<I, S>(self, relationships: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_param("include".to_string(), relationships)
    }

    /// Page size of the primary data.
    pub fn limit(self, limit: Option<u32>) -> Self {
        match limit {
            Some(n) => self.param("limit".to_string(), n.to_string()),
            None => self,
        }
    }

    /// `limit[<relationship>]=n`, the number of related resources side-loaded per item.
    pub fn limit_related(self, relationship: &str, limit: Option<u32>) -> Self {
        match limit {
            Some(n) => self.param(format!("limit[{relationship}]"), n.to_string()),
            None => self,
        }
    }

    pub fn sort(self, sort: Option<&str>) -> Self {
        match sort {
            Some(s) => self.param("sort".to_string(), s.to_string()),
            None => self,
        }
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn list_param<I, S>(self, name: String, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        if joined.is_empty() {
            self
        } else {
            self.param(name, joined)
        }
    }

    fn param(mut self, name: String, value: String) -> Self {
        self.query.push((name, value));
        self
    }
}
