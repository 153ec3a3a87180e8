//! Client configuration.

use std::time::Duration;

use nvpay::constants::NVP_VERSION;
use nvpay::{Credentials, Endpoints, Environment, ErrorDecoding};

/// Configuration for [`NvpClient`](crate::NvpClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use nvpay::{Credentials, Environment};
/// use nvpay_http::{ClientConfig, NvpClient};
///
/// let config = ClientConfig::new(
///     Credentials::new("user", "password", "signature"),
///     Environment::Sandbox,
/// )
/// .with_timeout(Duration::from_secs(30));
/// let client = NvpClient::from_config(config);
/// assert_eq!(client.environment(), Environment::Sandbox);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials.
    pub credentials: Credentials,

    /// Sandbox or production.
    pub environment: Environment,

    /// Endpoint override. `None` uses the built-in pair for `environment`.
    pub endpoints: Option<Endpoints>,

    /// Value of the `VERSION` field.
    pub version: String,

    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,

    /// Optional pre-configured reqwest client. If `None`, a default client is
    /// created.
    pub http_client: Option<reqwest::Client>,

    /// How much of the indexed error list to decode.
    pub error_decoding: ErrorDecoding,
}

impl ClientConfig {
    /// Creates a config with the built-in endpoints and protocol version.
    #[must_use]
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            endpoints: None,
            version: NVP_VERSION.to_owned(),
            timeout: None,
            http_client: None,
            error_decoding: ErrorDecoding::default(),
        }
    }

    /// Overrides the endpoint pair.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Overrides the protocol version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets how much of the indexed error list to decode.
    #[must_use]
    pub const fn with_error_decoding(mut self, decoding: ErrorDecoding) -> Self {
        self.error_decoding = decoding;
        self
    }
}
