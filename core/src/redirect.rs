//! Redirect budget and next-hop derivation.
//!
//! # Design
//! A `RedirectGuard` is created per call chain and lives on the stack of the
//! verb operation, so concurrent calls never share a counter.

use crate::endpoint::Endpoint;
use crate::error::RoiError;
use crate::http::ResponseHead;
use crate::types::RequestOptions;

pub const DEFAULT_MAX_REDIRECTS: u32 = 3;

/// Counts redirect hops for one call chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectGuard {
    max_hops: u32,
    hops: u32,
}

impl RedirectGuard {
    pub fn new(max_hops: u32) -> Self {
        Self { max_hops, hops: 0 }
    }

    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn max_hops(&self) -> u32 {
        self.max_hops
    }

    /// Account for one more redirect. Once the budget is spent the counter is
    /// reset and `RedirectExhausted` is returned.
    pub fn check_and_consume(&mut self) -> Result<(), RoiError> {
        if self.hops >= self.max_hops {
            self.hops = 0;
            return Err(RoiError::RedirectExhausted { max: self.max_hops });
        }
        self.hops += 1;
        Ok(())
    }
}

impl Default for RedirectGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REDIRECTS)
    }
}

/// Derive the options for the next hop from a redirect response.
pub fn next_hop(options: &RequestOptions, head: &ResponseHead) -> Result<RequestOptions, RoiError> {
    let location = head
        .header("location")
        .ok_or(RoiError::MissingLocation { status: head.status })?;
    let next = Endpoint::parse(&options.endpoint)?.join(location)?;
    Ok(options.with_endpoint(next.as_str()))
}
