//! NVP response decoding and error classification.
//!
//! Decoding is a single pass with two ordered steps: the body is parsed into
//! an [`NvpValues`] map, then the map is classified. Classification looks at
//! `ACK` and at the first indexed error entry only:
//!
//! - `L_ERRORCODE0` is non-empty, or
//! - `ACK` is `Failure` or `FailureWithWarning` (any letter case)
//!
//! Either condition turns the [`Outcome`] into a failure carrying a
//! [`RemoteError`]. The fully populated [`Response`] travels with it.

use url::{Url, form_urlencoded};

use crate::constants::{EXPRESS_CHECKOUT_CMD, FAILURE_ACKS, field};
use crate::environment::{Endpoints, Environment};
use crate::error::{CheckoutUrlError, DecodeError, ErrorDetail, RemoteError, ResponseError};
use crate::outcome::Outcome;

/// How much of the indexed error list a [`RemoteError`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorDecoding {
    /// Only entry 0 (`L_ERRORCODE0`, ...).
    #[default]
    FirstOnly,
    /// Entry 0 plus every following entry, in
    /// [`RemoteError::additional`].
    All,
}

/// Ordered multimap of decoded response fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvpValues {
    fields: Vec<(String, String)>,
}

impl NvpValues {
    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`, in body order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` appears at least once.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Number of fields, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the body had no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(key, value)` pairs in body order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_owned()
    }

    fn parse(body: &[u8]) -> Result<Self, DecodeError> {
        validate(body)?;
        let fields = form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Ok(Self { fields })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NvpValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A decoded NVP response.
///
/// Promoted fields are empty strings when the body did not carry them.
/// Everything else is available through [`Response::values`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// `ACK`.
    pub ack: String,
    /// `CORRELATIONID`.
    pub correlation_id: String,
    /// `TIMESTAMP`.
    pub timestamp: String,
    /// `VERSION`.
    pub version: String,
    /// `BUILD`.
    pub build: String,
    /// `PAYMENTREQUEST_0_INVNUM`.
    pub invoice_number: String,
    /// `PAYMENTREQUEST_0_TRANSACTIONID`.
    pub transaction_id: String,
    /// Every decoded field.
    pub values: NvpValues,
    environment: Environment,
}

impl Response {
    fn empty(environment: Environment) -> Self {
        Self {
            ack: String::new(),
            correlation_id: String::new(),
            timestamp: String::new(),
            version: String::new(),
            build: String::new(),
            invoice_number: String::new(),
            transaction_id: String::new(),
            values: NvpValues::default(),
            environment,
        }
    }

    fn from_values(values: NvpValues, environment: Environment) -> Self {
        Self {
            ack: values.get_or_empty(field::ACK),
            correlation_id: values.get_or_empty(field::CORRELATION_ID),
            timestamp: values.get_or_empty(field::TIMESTAMP),
            version: values.get_or_empty(field::VERSION),
            build: values.get_or_empty(field::BUILD),
            invoice_number: values.get_or_empty(field::PAYMENT_INVNUM),
            transaction_id: values.get_or_empty(field::PAYMENT_TRANSACTION_ID),
            values,
            environment,
        }
    }

    /// The environment of the client that produced this response.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the `TOKEN` field, if present. A present but empty token is
    /// returned as `Some("")`.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.values.get(field::TOKEN)
    }

    /// Returns the indexed error entry at `index`, or `None` if the body has
    /// none of its four fields.
    #[must_use]
    pub fn error_detail(&self, index: usize) -> Option<ErrorDetail> {
        let lookup = |prefix: &str| self.values.get(&format!("{prefix}{index}")).map(str::to_owned);
        let code = lookup(field::ERROR_CODE_PREFIX);
        let short_message = lookup(field::SHORT_MESSAGE_PREFIX);
        let long_message = lookup(field::LONG_MESSAGE_PREFIX);
        let severity_code = lookup(field::SEVERITY_CODE_PREFIX);

        if code.is_none()
            && short_message.is_none()
            && long_message.is_none()
            && severity_code.is_none()
        {
            return None;
        }

        Some(ErrorDetail {
            code: code.unwrap_or_default(),
            short_message: short_message.unwrap_or_default(),
            long_message: long_message.unwrap_or_default(),
            severity_code: severity_code.unwrap_or_default(),
        })
    }

    /// Decodes the whole indexed error list, stopping at the first gap.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorDetail> {
        (0..).map_while(|i| self.error_detail(i)).collect()
    }

    /// Builds the checkout redirect for this response's environment, using the
    /// built-in PayPal hosts.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutUrlError::MissingToken`] if the response has no
    /// `TOKEN`.
    pub fn checkout_url(&self) -> Result<Url, CheckoutUrlError> {
        self.checkout_url_with(&Endpoints::for_environment(self.environment))
    }

    /// Builds the checkout redirect against `endpoints.checkout()`.
    ///
    /// ```rust
    /// use nvpay::{Endpoints, Environment, response::{decode, ErrorDecoding}};
    ///
    /// let outcome = decode(b"ACK=Success&TOKEN=EC-1", Environment::Sandbox, ErrorDecoding::FirstOnly);
    /// let endpoints = Endpoints::for_environment(Environment::Sandbox);
    /// let url = outcome.response().checkout_url_with(&endpoints).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-1"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutUrlError::MissingToken`] if the response has no
    /// `TOKEN`.
    pub fn checkout_url_with(&self, endpoints: &Endpoints) -> Result<Url, CheckoutUrlError> {
        let token = self.token().ok_or(CheckoutUrlError::MissingToken)?;
        let mut url = endpoints.checkout().clone();
        url.query_pairs_mut()
            .append_pair("cmd", EXPRESS_CHECKOUT_CMD)
            .append_pair("token", token);
        Ok(url)
    }

    fn classify(&self, decoding: ErrorDecoding) -> Option<RemoteError> {
        let first = self.error_detail(0).unwrap_or_default();
        let ack = self.ack.to_lowercase();
        if first.code.is_empty() && !FAILURE_ACKS.contains(&ack.as_str()) {
            return None;
        }

        let error = RemoteError::new(&self.ack).with_detail(first);
        Some(match decoding {
            ErrorDecoding::FirstOnly => error,
            ErrorDecoding::All => {
                error.with_additional(self.errors().into_iter().skip(1).collect())
            }
        })
    }
}

/// Decodes a response body produced for a client bound to `environment`.
///
/// A body that is not valid `key=value&...` syntax yields a failure with a
/// [`DecodeError`] and a response that has nothing but its environment.
pub fn decode(body: &[u8], environment: Environment, decoding: ErrorDecoding) -> Outcome {
    let values = match NvpValues::parse(body) {
        Ok(values) => values,
        Err(err) => {
            return Outcome::Failure {
                error: ResponseError::Decode(err),
                response: Response::empty(environment),
            };
        }
    };

    let response = Response::from_values(values, environment);
    match response.classify(decoding) {
        Some(err) => Outcome::Failure {
            error: ResponseError::Remote(err),
            response,
        },
        None => Outcome::Success(response),
    }
}

/// Rejects bodies the form decoder would otherwise accept leniently:
/// malformed `%` escapes and `;` separators.
fn validate(body: &[u8]) -> Result<(), DecodeError> {
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            b';' => return Err(DecodeError::InvalidSeparator { position: i }),
            b'%' => {
                let valid = body
                    .get(i + 1..i + 3)
                    .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
                if !valid {
                    return Err(DecodeError::InvalidEscape { position: i });
                }
                i += 3;
            }
            _ => i += 1,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_sandbox(body: &str) -> Outcome {
        decode(body.as_bytes(), Environment::Sandbox, ErrorDecoding::FirstOnly)
    }

    #[test]
    fn test_success_populates_promoted_fields() {
        let outcome = decode_sandbox(
            "ACK=Success&CORRELATIONID=9b81bd1f79546&TIMESTAMP=2021-06-14T07%3A34%3A08Z\
             &VERSION=84&BUILD=55698494&PAYMENTREQUEST_0_INVNUM=INV-1\
             &PAYMENTREQUEST_0_TRANSACTIONID=8WB29409YN938500U&TOKEN=EC-3A590955NS779441R",
        );
        assert!(outcome.is_success());
        let response = outcome.response();
        assert_eq!(response.ack, "Success");
        assert_eq!(response.correlation_id, "9b81bd1f79546");
        assert_eq!(response.timestamp, "2021-06-14T07:34:08Z");
        assert_eq!(response.version, "84");
        assert_eq!(response.build, "55698494");
        assert_eq!(response.invoice_number, "INV-1");
        assert_eq!(response.transaction_id, "8WB29409YN938500U");
        assert_eq!(response.token(), Some("EC-3A590955NS779441R"));
        assert_eq!(response.values.len(), 8);
        assert_eq!(response.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_unpromoted_fields_stay_in_values() {
        let outcome = decode_sandbox("ACK=Success&PAYERID=H97ABK6WNY7NU&EMAIL=a%40b.example");
        let response = outcome.response();
        assert_eq!(response.values.get("PAYERID"), Some("H97ABK6WNY7NU"));
        assert_eq!(response.values.get("EMAIL"), Some("a@b.example"));
        assert!(response.values.contains_key("ACK"));
        assert_eq!(response.transaction_id, "");
    }

    #[test]
    fn test_ack_failure_any_case_is_remote_error() {
        for ack in ["Failure", "FAILURE", "failure", "FailureWithWarning", "failurewithwarning"] {
            let outcome = decode_sandbox(&format!("ACK={ack}"));
            let err = outcome.error().and_then(ResponseError::as_remote).unwrap();
            assert_eq!(err.ack, ack);
            assert_eq!(err.to_string(), ack);
        }
    }

    #[test]
    fn test_warning_ack_without_error_code_is_success() {
        assert!(decode_sandbox("ACK=SuccessWithWarning").is_success());
        assert!(decode_sandbox("ACK=Success&L_ERRORCODE0=").is_success());
    }

    #[test]
    fn test_error_code_triggers_remote_error_even_on_success_ack() {
        let outcome = decode_sandbox("ACK=Success&L_ERRORCODE0=10001&L_SHORTMESSAGE0=Oops");
        let err = outcome.error().and_then(ResponseError::as_remote).unwrap();
        assert_eq!(err.to_string(), "PayPal Error 10001: Oops");
        assert_eq!(err.ack, "Success");
        // The response stays fully populated.
        assert_eq!(outcome.response().ack, "Success");
    }

    #[test]
    fn test_error_captures_first_entry() {
        let outcome = decode_sandbox(
            "ACK=Failure&L_ERRORCODE0=10410&L_SHORTMESSAGE0=Invalid%20token\
             &L_LONGMESSAGE0=Invalid+token.&L_SEVERITYCODE0=Error\
             &L_ERRORCODE1=10411&L_SHORTMESSAGE1=Expired",
        );
        let err = outcome.error().and_then(ResponseError::as_remote).unwrap();
        assert_eq!(err.ack, "Failure");
        assert_eq!(err.code, "10410");
        assert_eq!(err.short_message, "Invalid token");
        assert_eq!(err.long_message, "Invalid token.");
        assert_eq!(err.severity_code, "Error");
        assert!(err.additional.is_empty());
    }

    #[test]
    fn test_error_decoding_all_collects_additional_entries() {
        let outcome = decode(
            b"ACK=Failure&L_ERRORCODE0=1&L_SHORTMESSAGE0=a&L_ERRORCODE1=2&L_SHORTMESSAGE1=b\
              &L_ERRORCODE2=3&L_ERRORCODE4=5",
            Environment::Production,
            ErrorDecoding::All,
        );
        let err = outcome.error().and_then(ResponseError::as_remote).unwrap();
        assert_eq!(err.code, "1");
        let codes: Vec<_> = err.additional.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["2", "3"]);
        assert_eq!(outcome.response().errors().len(), 3);
    }

    #[test]
    fn test_malformed_escape_is_decode_error() {
        let outcome = decode_sandbox("ACK=Success&TOKEN=%zz");
        assert_eq!(
            outcome.error(),
            Some(&ResponseError::Decode(DecodeError::InvalidEscape { position: 18 }))
        );
        let response = outcome.response();
        assert_eq!(response.ack, "");
        assert!(response.values.is_empty());
        assert_eq!(response.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_truncated_escape_is_decode_error() {
        let outcome = decode_sandbox("ACK=Success%4");
        assert!(matches!(
            outcome.error(),
            Some(ResponseError::Decode(DecodeError::InvalidEscape { position: 11 }))
        ));
    }

    #[test]
    fn test_semicolon_is_decode_error() {
        let outcome = decode_sandbox("ACK=Success;TOKEN=EC-1");
        assert!(matches!(
            outcome.error(),
            Some(ResponseError::Decode(DecodeError::InvalidSeparator { position: 11 }))
        ));
    }

    #[test]
    fn test_empty_body_is_success_with_no_fields() {
        let outcome = decode_sandbox("");
        assert!(outcome.is_success());
        assert!(outcome.response().values.is_empty());
    }

    #[test]
    fn test_values_from_iterator() {
        let values: NvpValues = [("ACK", "Success"), ("L_ERRORCODE0", "1"), ("ACK", "Failure")]
            .into_iter()
            .collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values.get("ACK"), Some("Success"));
        assert_eq!(values.get_all("ACK").collect::<Vec<_>>(), vec!["Success", "Failure"]);
        assert!(values.contains_key("L_ERRORCODE0"));
        assert!(!values.contains_key("TOKEN"));
    }

    #[test]
    fn test_checkout_url_sandbox_and_production() {
        let sandbox = decode(b"ACK=Success&TOKEN=EC-1", Environment::Sandbox, ErrorDecoding::FirstOnly);
        assert_eq!(
            sandbox.response().checkout_url().unwrap().as_str(),
            "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-1"
        );

        let production =
            decode(b"ACK=Success&TOKEN=EC-1", Environment::Production, ErrorDecoding::FirstOnly);
        assert_eq!(
            production.response().checkout_url().unwrap().as_str(),
            "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-1"
        );
    }

    #[test]
    fn test_checkout_url_custom_endpoints() {
        let endpoints = Endpoints::parse("http://127.0.0.1:9/nvp", "http://127.0.0.1:9/webscr").unwrap();
        let outcome = decode_sandbox("ACK=Success&TOKEN=EC-7");
        assert_eq!(
            outcome.response().checkout_url_with(&endpoints).unwrap().as_str(),
            "http://127.0.0.1:9/webscr?cmd=_express-checkout&token=EC-7"
        );
    }

    #[test]
    fn test_checkout_url_missing_token() {
        let outcome = decode_sandbox("ACK=Success");
        assert_eq!(
            outcome.response().checkout_url(),
            Err(CheckoutUrlError::MissingToken)
        );
    }

    #[test]
    fn test_checkout_url_empty_token_is_kept() {
        let outcome = decode_sandbox("ACK=Success&TOKEN=");
        assert_eq!(outcome.response().token(), Some(""));
        assert_eq!(
            outcome.response().checkout_url().unwrap().as_str(),
            "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token="
        );
    }
}
