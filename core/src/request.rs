//! Request builder: options + operation to a transport-ready descriptor.
//!
//! # Design
//! Building is pure. The upload body is a file stream and is attached by the
//! client after building, so no file is opened here.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::endpoint::Endpoint;
use crate::error::RoiError;
use crate::http::{Body, HttpRequest};
use crate::types::{Operation, RequestOptions};

pub const ACCEPT: &str = "application/json,text/plain";
pub const CONTENT_TYPE: &str = "application/json";

/// `Authorization` header value: `Basic base64(username:password)` when a
/// username is set, otherwise the empty string.
pub fn basic_auth(options: &RequestOptions) -> String {
    match options.username.as_deref() {
        Some(username) if !username.is_empty() => {
            let password = options.password.as_deref().unwrap_or("");
            format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
        }
        _ => String::new(),
    }
}

/// Builds the `HttpRequest` for one hop of a call chain.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    options: &'a RequestOptions,
    operation: Operation,
    payload: Option<Bytes>,
    upload_path: Option<&'a Path>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(options: &'a RequestOptions, operation: Operation) -> Self {
        Self {
            options,
            operation,
            payload: None,
            upload_path: None,
        }
    }

    /// JSON-encoded body for `post` and `put`.
    pub fn payload(mut self, payload: Bytes) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Local file announced in the `filename` header of an upload.
    pub fn upload_path(mut self, path: &'a Path) -> Self {
        self.upload_path = Some(path);
        self
    }

    pub fn build(self) -> Result<HttpRequest, RoiError> {
        let endpoint = Endpoint::parse(&self.options.endpoint)?;
        let mut headers = vec![
            ("Accept".to_string(), ACCEPT.to_string()),
            ("Content-type".to_string(), CONTENT_TYPE.to_string()),
            ("Authorization".to_string(), basic_auth(self.options)),
        ];

        let body = match self.operation {
            Operation::Post | Operation::Put => {
                let payload = self.payload.unwrap_or_default();
                headers.push(("Content-Length".to_string(), payload.len().to_string()));
                Body::Bytes(payload)
            }
            Operation::Upload => {
                if let Some(path) = self.upload_path {
                    headers.push(("filename".to_string(), path.display().to_string()));
                }
                Body::Empty
            }
            Operation::Get | Operation::Delete | Operation::Exists | Operation::Download => Body::Empty,
        };

        Ok(HttpRequest {
            method: self.operation.method(),
            endpoint,
            headers,
            body,
        })
    }
}
