//! Redirect-following HTTP request helper.
//!
//! # Overview
//! Performs GET/POST/PUT/DELETE/HEAD requests against an endpoint, follows
//! redirects up to a bounded number of hops, and resolves with the final
//! response head or its collected body. `download` and `upload` stream a
//! local file from or to the endpoint.
//!
//! # Design
//! - The network is behind the [`Transport`] trait; [`ReqwestTransport`] is
//!   the shipped implementation and tests plug in scripted ones.
//! - Each piece of a hop is usable on its own: [`Endpoint`] parsing,
//!   [`RequestBuilder`], [`classify`], [`RedirectGuard`] and [`next_hop`].
//! - [`Client`] is stateless; the redirect budget lives in each call chain.

mod body;
pub mod classify;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod redirect;
pub mod request;
pub mod transport;
pub mod types;

pub use classify::{classify, Classification};
pub use client::{Client, ClientConfig};
pub use endpoint::{Endpoint, Scheme};
pub use error::{RoiError, TransportError};
pub use http::{Body, ByteStream, HttpMethod, HttpRequest, HttpResponse, ResponseHead};
pub use redirect::{next_hop, RedirectGuard, DEFAULT_MAX_REDIRECTS};
pub use request::{basic_auth, RequestBuilder};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Operation, RequestOptions};
