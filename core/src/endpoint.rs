//! Endpoint resolution: absolute URI string to transport parameters.

use std::fmt;

use url::Url;

use crate::error::RoiError;

/// URI scheme, which also selects plain or TLS transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// A parsed endpoint.
///
/// `path` includes the query string, so it can be written to the request line
/// as is. The port falls back to the scheme default when the URI omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Endpoint {
    pub fn parse(uri: &str) -> Result<Self, RoiError> {
        let url = Url::parse(uri).map_err(|e| RoiError::InvalidEndpoint(format!("{uri}: {e}")))?;
        Self::from_url(url)
    }

    /// Resolve a redirect `Location` against this endpoint. Absolute locations
    /// replace the endpoint entirely.
    pub fn join(&self, location: &str) -> Result<Self, RoiError> {
        let url = self
            .url
            .join(location)
            .map_err(|e| RoiError::InvalidEndpoint(format!("{location}: {e}")))?;
        Self::from_url(url)
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    fn from_url(url: Url) -> Result<Self, RoiError> {
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(RoiError::UnsupportedScheme(other.to_string())),
        };
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(RoiError::InvalidEndpoint(format!("{url}: missing host"))),
        };
        let port = url.port().unwrap_or_else(|| scheme.default_port());
        let path = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        Ok(Self {
            url,
            scheme,
            host,
            port,
            path,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
