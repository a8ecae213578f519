// ABOUTME: Request descriptors for the API pipeline
// ABOUTME: Method, ordered query parameters and body, built per call and consumed by fetching

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Methods accepted by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(ClientError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// One `name=value` query pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Request body. The variant decides how the pipeline encodes it.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(Value),
    /// Sent as `multipart/form-data` text fields
    Multipart(Vec<(String, String)>),
    /// Sent as-is without a content type
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub params: Vec<QueryParam>,
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push(QueryParam::new(name, value));
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = QueryParam>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn json(mut self, data: Value) -> Self {
        self.body = Some(RequestBody::Json(data));
        self
    }

    pub fn multipart<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.body = Some(RequestBody::Multipart(fields));
        self
    }

    pub fn raw(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(data.into()));
        self
    }

    /// Target URL with the query string appended in list order.
    ///
    /// Names and values are interpolated verbatim; callers must pass values
    /// that are already safe to place in a URL.
    pub fn target_url(&self) -> String {
        let mut url = self.url.clone();
        for (i, param) in self.params.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            url.push(separator);
            url.push_str(&param.name);
            url.push('=');
            url.push_str(&param.value);
        }
        url
    }
}
