//! HTTP wire types exchanged with the transport.
//!
//! # Design
//! Requests and responses are plain data plus a byte stream for the body.
//! The core builds `HttpRequest` values and consumes `HttpResponse` values;
//! the [`Transport`](crate::Transport) implementation executes the actual
//! network I/O between the two. Headers are kept as an ordered list of owned
//! pairs so that the exact request sent can be inspected in tests.

use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures::{stream, Stream};

use crate::classify::{classify, Classification};
use crate::endpoint::Endpoint;

/// Body byte stream of a request or response.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body handed to the transport.
pub enum Body {
    Empty,
    Bytes(Bytes),
    Stream(ByteStream),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Body::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A transport-ready request descriptor.
///
/// Built by [`RequestBuilder`](crate::RequestBuilder) for a single hop.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as produced by the transport, body not yet consumed.
pub struct HttpResponse {
    pub status: u16,
    pub status_message: String,
    pub headers: Vec<(String, String)>,
    pub body: ByteStream,
}

impl HttpResponse {
    /// Response with the whole body available up front.
    pub fn from_bytes(
        status: u16,
        status_message: impl Into<String>,
        headers: Vec<(String, String)>,
        body: impl Into<Bytes>,
    ) -> Self {
        let body = body.into();
        let body: ByteStream = if body.is_empty() {
            Box::pin(stream::empty())
        } else {
            Box::pin(stream::once(async move { Ok(body) }))
        };
        Self {
            status,
            status_message: status_message.into(),
            headers,
            body,
        }
    }

    pub fn into_parts(self) -> (ResponseHead, ByteStream) {
        let head = ResponseHead {
            status: self.status,
            status_message: self.status_message,
            headers: self.headers,
        };
        (head, self.body)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("status_message", &self.status_message)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Status line and headers of a response whose body has been consumed.
///
/// This is what `post`, `put`, `del`, `exists` and `download` resolve with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub status_message: String,
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn classify(&self) -> Classification {
        classify(self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
