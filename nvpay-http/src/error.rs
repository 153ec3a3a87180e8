//! Error types for the HTTP transport layer.
//!
//! Only failures to *exchange* bytes with PayPal live here. A reply that
//! arrived but signals failure is an [`Outcome::Failure`](nvpay::Outcome).

/// Errors that can occur while talking to the NVP endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connect, DNS, TLS, timeout).
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to read response body.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => {
                source.is_timeout()
            }
        }
    }
}
