//! Tagged result of a decoded NVP call.
//!
//! A failed call still produces a [`Response`]: a remote failure has every
//! promoted field populated, and a decode failure at least records the
//! environment. [`Outcome`] keeps both halves together so the failure cannot
//! be dropped by accident while the response is used.

use crate::error::ResponseError;
use crate::response::Response;

/// The result of decoding one NVP response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The call succeeded.
    Success(Response),
    /// The call failed; `response` holds whatever was decoded.
    Failure {
        /// Why the call failed.
        error: ResponseError,
        /// The (possibly partial) response.
        response: Response,
    },
}

impl Outcome {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the response, whichever variant this is.
    #[must_use]
    pub const fn response(&self) -> &Response {
        match self {
            Self::Success(response) | Self::Failure { response, .. } => response,
        }
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ResponseError> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Consumes the outcome and returns the response, discarding any error.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Self::Success(response) | Self::Failure { response, .. } => response,
        }
    }

    /// Converts into a `Result`, for callers that want `?`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseFailure`] for [`Outcome::Failure`]. The response is
    /// still reachable through it.
    pub fn into_result(self) -> Result<Response, ResponseFailure> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failure { error, response } => Err(ResponseFailure {
                error,
                response: Box::new(response),
            }),
        }
    }
}

/// A failed [`Outcome`] as an error value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ResponseFailure {
    /// Why the call failed.
    pub error: ResponseError,
    /// The (possibly partial) response.
    pub response: Box<Response>,
}

impl ResponseFailure {
    /// Returns the response that came with the failure.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }
}
