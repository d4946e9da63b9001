//! Verb operations sharing one redirect-following request loop.
//!
//! # Design
//! `Client` holds only the transport and its configuration and carries no
//! mutable state between calls. Every operation runs the same loop in
//! [`Client::execute`]: build the request for the current options, send it,
//! classify the response, and either finish, fail, or derive the next hop.
//! The redirect budget is a local `RedirectGuard`, fresh for every call
//! chain.

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::body::{collect_text, drain, write_file};
use crate::classify::{classify, failure, Classification};
use crate::error::RoiError;
use crate::http::{Body, HttpRequest, HttpResponse, ResponseHead};
use crate::redirect::{next_hop, RedirectGuard, DEFAULT_MAX_REDIRECTS};
use crate::request::RequestBuilder;
use crate::transport::Transport;
use crate::types::{Operation, RequestOptions};

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Redirects followed per call chain before giving up. Default `3`.
    pub max_redirects: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Body sent on every hop of a call chain.
#[derive(Debug)]
enum Payload<'a> {
    None,
    Json(Bytes),
    File(&'a Path),
}

/// Redirect-following HTTP client over a [`Transport`].
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET the endpoint and collect the body as ordered text chunks.
    pub async fn get(&self, options: &RequestOptions) -> Result<Vec<String>, RoiError> {
        let response = self.execute(options, Operation::Get, &Payload::None).await?;
        collect_text(response.body).await
    }

    /// POST `payload` as JSON.
    pub async fn post<P>(&self, options: &RequestOptions, payload: &P) -> Result<ResponseHead, RoiError>
    where
        P: Serialize + ?Sized,
    {
        let json = Bytes::from(serde_json::to_vec(payload)?);
        let response = self.execute(options, Operation::Post, &Payload::Json(json)).await?;
        finish_drained(response).await
    }

    /// PUT `payload` as JSON.
    pub async fn put<P>(&self, options: &RequestOptions, payload: &P) -> Result<ResponseHead, RoiError>
    where
        P: Serialize + ?Sized,
    {
        let json = Bytes::from(serde_json::to_vec(payload)?);
        let response = self.execute(options, Operation::Put, &Payload::Json(json)).await?;
        finish_drained(response).await
    }

    pub async fn del(&self, options: &RequestOptions) -> Result<ResponseHead, RoiError> {
        let response = self.execute(options, Operation::Delete, &Payload::None).await?;
        finish_drained(response).await
    }

    /// HEAD the endpoint. Any non-failure status resolves.
    pub async fn exists(&self, options: &RequestOptions) -> Result<ResponseHead, RoiError> {
        let response = self.execute(options, Operation::Exists, &Payload::None).await?;
        finish_drained(response).await
    }

    /// GET the endpoint and write the body to `path`.
    ///
    /// The file is created only once a success response arrives, so a failed
    /// call leaves an existing file untouched.
    pub async fn download(
        &self,
        options: &RequestOptions,
        path: impl AsRef<Path>,
    ) -> Result<ResponseHead, RoiError> {
        let path = path.as_ref();
        let response = self.execute(options, Operation::Download, &Payload::None).await?;
        let (head, body) = response.into_parts();
        let written = write_file(path, body).await?;
        debug!(path = %path.display(), bytes = written, "download complete");
        Ok(head)
    }

    /// POST the file at `path` as the request body and return the response
    /// text. The file is reopened for every hop.
    pub async fn upload(&self, options: &RequestOptions, path: impl AsRef<Path>) -> Result<String, RoiError> {
        let path = path.as_ref();
        let response = self.execute(options, Operation::Upload, &Payload::File(path)).await?;
        let chunks = collect_text(response.body).await?;
        Ok(chunks.concat())
    }

    /// Run one call chain until it succeeds, fails, or runs out of redirects.
    async fn execute(
        &self,
        options: &RequestOptions,
        operation: Operation,
        payload: &Payload<'_>,
    ) -> Result<HttpResponse, RoiError> {
        let mut guard = RedirectGuard::new(self.config.max_redirects);
        let mut current = options.clone();
        loop {
            let request = prepare(&current, operation, payload).await?;
            debug!(
                operation = operation.name(),
                method = %request.method,
                endpoint = %request.endpoint,
                "sending request"
            );
            let response = self.transport.send(request).await.map_err(RoiError::Transport)?;

            match classify(response.status) {
                Classification::Success => {
                    debug!(status = response.status, "request succeeded");
                    return Ok(response);
                }
                Classification::Redirect => {
                    let (head, _body) = response.into_parts();
                    if let Err(err) = guard.check_and_consume() {
                        warn!(
                            operation = operation.name(),
                            endpoint = %current.endpoint,
                            max = guard.max_hops(),
                            "maximum redirects reached"
                        );
                        return Err(err);
                    }
                    current = next_hop(&current, &head)?;
                    debug!(
                        status = head.status,
                        location = %current.endpoint,
                        hop = guard.hops(),
                        "following redirect"
                    );
                }
                Classification::Failure => {
                    let (head, _body) = response.into_parts();
                    debug!(status = head.status, "request failed");
                    return Err(failure(&head));
                }
            }
        }
    }
}

/// Build the request for one hop and attach its body.
async fn prepare(
    options: &RequestOptions,
    operation: Operation,
    payload: &Payload<'_>,
) -> Result<HttpRequest, RoiError> {
    let builder = RequestBuilder::new(options, operation);
    match payload {
        Payload::None => builder.build(),
        Payload::Json(json) => builder.payload(json.clone()).build(),
        Payload::File(path) => {
            let mut request = builder.upload_path(path).build()?;
            let file = File::open(path).await?;
            request.body = Body::Stream(Box::pin(ReaderStream::new(file)));
            Ok(request)
        }
    }
}

async fn finish_drained(response: HttpResponse) -> Result<ResponseHead, RoiError> {
    let (head, body) = response.into_parts();
    drain(body).await?;
    Ok(head)
}
