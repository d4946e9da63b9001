//! Response classification by status code.

use crate::error::RoiError;
use crate::http::ResponseHead;

/// Outcome of a single hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Redirect,
    Failure,
}

/// Classify a status code: 3xx is a redirect, 400 and above a failure,
/// anything else a success.
pub fn classify(status: u16) -> Classification {
    match status {
        300..=399 => Classification::Redirect,
        400.. => Classification::Failure,
        _ => Classification::Success,
    }
}

/// Error reported for a response classified as [`Classification::Failure`].
pub fn failure(head: &ResponseHead) -> RoiError {
    RoiError::Http {
        status: head.status,
        status_message: head.status_message.clone(),
    }
}
