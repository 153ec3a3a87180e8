//! Error types for NVP response handling.
//!
//! - [`RemoteError`] - PayPal answered, and the answer was a failure
//! - [`DecodeError`] - The body was not a valid `key=value&...` string
//! - [`ResponseError`] - Either of the above, as carried by an
//!   [`Outcome`](crate::Outcome)
//! - [`CheckoutUrlError`] - A checkout redirect could not be built

use std::fmt;

/// Message shown when PayPal failed without saying anything useful.
pub const MAINTENANCE_MESSAGE: &str = "PayPal is undergoing maintenance.\nPlease try again later.";

/// One entry of the indexed `L_ERRORCODE{n}` / `L_SHORTMESSAGE{n}` / ... list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Numeric error code, as sent.
    pub code: String,
    /// Short message.
    pub short_message: String,
    /// Long message.
    pub long_message: String,
    /// Severity (`Error`, `Warning`, ...).
    pub severity_code: String,
}

/// The remote endpoint signalled failure.
///
/// Built from the acknowledgement and the first indexed error entry. Further
/// entries are only collected into [`RemoteError::additional`] when the
/// response was decoded with
/// [`ErrorDecoding::All`](crate::response::ErrorDecoding::All).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteError {
    /// Raw `ACK` value.
    pub ack: String,
    /// `L_ERRORCODE0`.
    pub code: String,
    /// `L_SHORTMESSAGE0`.
    pub short_message: String,
    /// `L_LONGMESSAGE0`.
    pub long_message: String,
    /// `L_SEVERITYCODE0`.
    pub severity_code: String,
    /// Entries at index 1 and above.
    pub additional: Vec<ErrorDetail>,
}

impl RemoteError {
    /// Creates an error carrying only an acknowledgement value.
    #[must_use]
    pub fn new(ack: impl Into<String>) -> Self {
        Self {
            ack: ack.into(),
            ..Self::default()
        }
    }

    /// Sets the first error entry.
    #[must_use]
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.code = detail.code;
        self.short_message = detail.short_message;
        self.long_message = detail.long_message;
        self.severity_code = detail.severity_code;
        self
    }

    /// Sets the entries after the first.
    #[must_use]
    pub fn with_additional(mut self, additional: Vec<ErrorDetail>) -> Self {
        self.additional = additional;
        self
    }

    /// Returns the first error entry.
    #[must_use]
    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code.clone(),
            short_message: self.short_message.clone(),
            long_message: self.long_message.clone(),
            severity_code: self.severity_code.clone(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.code.is_empty() && !self.short_message.is_empty() {
            write!(f, "PayPal Error {}: {}", self.code, self.short_message)
        } else if !self.ack.is_empty() {
            f.write_str(&self.ack)
        } else {
            f.write_str(MAINTENANCE_MESSAGE)
        }
    }
}

impl std::error::Error for RemoteError {}

/// The response body is not valid flat `key=value&key=value` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("invalid percent escape at byte {position}")]
    InvalidEscape {
        /// Byte offset of the `%`.
        position: usize,
    },
    /// A `;` appeared in a key or value.
    #[error("invalid semicolon separator at byte {position}")]
    InvalidSeparator {
        /// Byte offset of the `;`.
        position: usize,
    },
}

/// Why a decoded response is not a success.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The body could not be decoded.
    #[error("malformed NVP response: {0}")]
    Decode(#[from] DecodeError),

    /// PayPal reported a failure.
    #[error("{0}")]
    Remote(#[from] RemoteError),
}

impl ResponseError {
    /// Returns the remote error, if this is one.
    #[must_use]
    pub const fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            Self::Decode(_) => None,
        }
    }
}

/// A checkout redirect URL could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutUrlError {
    /// The response has no `TOKEN` field.
    #[error("response has no TOKEN to build a checkout URL from")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_code_and_short_message() {
        let err = RemoteError::new("Failure").with_detail(ErrorDetail {
            code: "10001".into(),
            short_message: "Oops".into(),
            ..ErrorDetail::default()
        });
        assert_eq!(err.to_string(), "PayPal Error 10001: Oops");
    }

    #[test]
    fn test_display_falls_back_to_ack() {
        let err = RemoteError::new("Failure");
        assert_eq!(err.to_string(), "Failure");
    }

    #[test]
    fn test_display_code_without_short_message_falls_back_to_ack() {
        let err = RemoteError::new("FailureWithWarning").with_detail(ErrorDetail {
            code: "10413".into(),
            ..ErrorDetail::default()
        });
        assert_eq!(err.to_string(), "FailureWithWarning");
    }

    #[test]
    fn test_detail_returns_first_entry() {
        let detail = ErrorDetail {
            code: "10410".into(),
            short_message: "Invalid token".into(),
            long_message: "Invalid token.".into(),
            severity_code: "Error".into(),
        };
        let err = RemoteError::new("Failure").with_detail(detail.clone());
        assert_eq!(err.detail(), detail);
        assert_eq!(RemoteError::new("Failure").detail(), ErrorDetail::default());
    }

    #[test]
    fn test_display_maintenance_message() {
        let err = RemoteError::default();
        assert_eq!(
            err.to_string(),
            "PayPal is undergoing maintenance.\nPlease try again later."
        );
    }

    #[test]
    fn test_response_error_wraps_remote_display() {
        let err = ResponseError::from(RemoteError::new("Failure"));
        assert_eq!(err.to_string(), "Failure");
        assert!(err.as_remote().is_some());

        let err = ResponseError::from(DecodeError::InvalidEscape { position: 4 });
        assert_eq!(
            err.to_string(),
            "malformed NVP response: invalid percent escape at byte 4"
        );
        assert!(err.as_remote().is_none());
    }
}
