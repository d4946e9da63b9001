//! Request intent types supplied by the caller.
//!
//! # Design
//! `RequestOptions` is never mutated once handed to a `Client`. Each redirect
//! hop derives a new value through [`next_hop`](crate::next_hop), so a hop is a
//! pure function of the previous options and the redirect response.

use serde::{Deserialize, Serialize};

use crate::http::HttpMethod;

/// Where to send a request and, optionally, Basic-auth credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Absolute `http` or `https` URI.
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl RequestOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Same credentials, different endpoint.
    pub fn with_endpoint(&self, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// The verb operation a call chain performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Post,
    Put,
    Delete,
    Exists,
    Download,
    Upload,
}

impl Operation {
    pub fn method(self) -> HttpMethod {
        match self {
            Operation::Get | Operation::Download => HttpMethod::Get,
            Operation::Post | Operation::Upload => HttpMethod::Post,
            Operation::Put => HttpMethod::Put,
            Operation::Delete => HttpMethod::Delete,
            Operation::Exists => HttpMethod::Head,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Post => "post",
            Operation::Put => "put",
            Operation::Delete => "del",
            Operation::Exists => "exists",
            Operation::Download => "download",
            Operation::Upload => "upload",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_deserialize_without_credentials() {
        let options: RequestOptions =
            serde_json::from_str(r#"{"endpoint":"http://localhost:3000/hello"}"#).unwrap();
        assert_eq!(options, RequestOptions::new("http://localhost:3000/hello"));
    }

    #[test]
    fn with_endpoint_keeps_credentials() {
        let options = RequestOptions::new("http://a.example/x").with_credentials("user", "pass");
        let next = options.with_endpoint("http://b.example/y");
        assert_eq!(next.endpoint, "http://b.example/y");
        assert_eq!(next.username.as_deref(), Some("user"));
        assert_eq!(next.password.as_deref(), Some("pass"));
    }

    #[test]
    fn operations_map_to_methods() {
        assert_eq!(Operation::Exists.method(), HttpMethod::Head);
        assert_eq!(Operation::Download.method(), HttpMethod::Get);
        assert_eq!(Operation::Upload.method(), HttpMethod::Post);
        assert_eq!(Operation::Delete.method(), HttpMethod::Delete);
    }
}
