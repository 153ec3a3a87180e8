//! The NVP transport client.
//!
//! [`NvpClient`] exposes one primitive, [`NvpClient::submit`], and the Express
//! Checkout operations built on it:
//!
//! - [`NvpClient::set_express_checkout_digital_goods`]
//! - [`NvpClient::get_express_checkout_details`]
//! - [`NvpClient::do_express_checkout_payment`]
//! - [`NvpClient::do_express_checkout_sale`]
//!
//! ## Error Handling
//!
//! Transport failures (connect, DNS, TLS, timeout, body read) are returned as
//! [`ClientError`] and are not retried. Once a body has been read, the call
//! always yields an [`Outcome`], which is a failure when the body could not be
//! decoded or PayPal reported an error.

use std::time::Duration;

use nvpay::constants::FORM_CONTENT_TYPE;
use nvpay::response::decode;
use nvpay::{
    CheckoutDetails, CheckoutUrlError, Credentials, DigitalGoodsCheckout, Endpoints, Environment,
    ErrorDecoding, ExpressCheckoutPayment, Outcome, ParameterSet, Response,
};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// A client for the PayPal NVP API.
///
/// Cheap to clone; clones share the underlying connection pool. Safe to use
/// from many tasks at once because `reqwest::Client` is.
#[derive(Clone, Debug)]
pub struct NvpClient {
    /// API credentials, merged into every request
    credentials: Credentials,
    /// Sandbox or production, recorded on every response
    environment: Environment,
    /// API and checkout redirect URLs
    endpoints: Endpoints,
    /// Value of the `VERSION` field
    version: String,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
    /// How much of the indexed error list to decode
    error_decoding: ErrorDecoding,
}

impl NvpClient {
    /// Creates a client with a default HTTP client and the built-in endpoints.
    #[must_use]
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self::from_config(ClientConfig::new(credentials, environment))
    }

    /// Creates a client on top of an existing HTTP client, for connection
    /// reuse or custom TLS/proxy/timeout settings.
    #[must_use]
    pub fn with_http_client(
        credentials: Credentials,
        environment: Environment,
        client: Client,
    ) -> Self {
        Self::from_config(ClientConfig::new(credentials, environment).with_http_client(client))
    }

    /// Creates a client from a full configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        let endpoints = config
            .endpoints
            .unwrap_or_else(|| Endpoints::for_environment(config.environment));
        Self {
            credentials: config.credentials,
            environment: config.environment,
            endpoints,
            version: config.version,
            client: config.http_client.unwrap_or_default(),
            timeout: config.timeout,
            error_decoding: config.error_decoding,
        }
    }

    /// Returns the environment this client is bound to.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the endpoint pair used by this client.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the `VERSION` value sent with each request.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Submits a parameter set.
    ///
    /// The credentials and `VERSION` are merged into a copy of `params`, so the
    /// same set can be submitted again.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request could not be sent or the body
    /// could not be read. A reply that arrived is never an `Err`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "nvpay.submit",
            skip_all,
            fields(
                method = params.method().unwrap_or_default(),
                environment = %self.environment,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn submit(&self, params: &ParameterSet) -> Result<Outcome, ClientError> {
        let result = self.post_form(params).await;
        record_outcome_on_span(&result);
        result
    }

    /// Starts a digital goods checkout (`SetExpressCheckout`).
    ///
    /// On success the response carries the `TOKEN`; send the buyer to
    /// [`NvpClient::checkout_url`] next.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn set_express_checkout_digital_goods(
        &self,
        checkout: &DigitalGoodsCheckout,
    ) -> Result<Outcome, ClientError> {
        self.submit(&checkout.to_params()).await
    }

    /// Completes a payment (`DoExpressCheckoutPayment`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn do_express_checkout_payment(
        &self,
        payment: &ExpressCheckoutPayment,
    ) -> Result<Outcome, ClientError> {
        self.submit(&payment.to_params()).await
    }

    /// Completes a payment as an immediate charge.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn do_express_checkout_sale(
        &self,
        token: &str,
        payer_id: &str,
        currency_code: &str,
        amount: f64,
    ) -> Result<Outcome, ClientError> {
        self.do_express_checkout_payment(&ExpressCheckoutPayment::sale(
            token,
            payer_id,
            currency_code,
            amount,
        ))
        .await
    }

    /// Fetches buyer and payment details (`GetExpressCheckoutDetails`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn get_express_checkout_details(&self, token: &str) -> Result<Outcome, ClientError> {
        self.submit(&CheckoutDetails::new(token).to_params()).await
    }

    /// Builds the buyer redirect for a response from this client, against this
    /// client's checkout endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutUrlError::MissingToken`] if the response has no
    /// `TOKEN`.
    pub fn checkout_url(&self, response: &Response) -> Result<Url, CheckoutUrlError> {
        response.checkout_url_with(&self.endpoints)
    }

    async fn post_form(&self, params: &ParameterSet) -> Result<Outcome, ClientError> {
        let context = "POST NVP endpoint";
        let body = params
            .with_credentials(&self.credentials, &self.version)
            .encode();

        let mut req = self
            .client
            .post(self.endpoints.api().clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| ClientError::Http { context, source: e })?;

        // PayPal reports failures in the body; the status is informational.
        #[cfg(feature = "telemetry")]
        if !http_response.status().is_success() {
            tracing::warn!(status = %http_response.status(), "NVP endpoint returned non-success status");
        }

        let bytes = http_response
            .bytes()
            .await
            .map_err(|e| ClientError::ResponseBodyRead { context, source: e })?;

        Ok(decode(&bytes, self.environment, self.error_decoding))
    }
}

/// Records the outcome of a call on the current span.
#[cfg(feature = "telemetry")]
fn record_outcome_on_span(result: &Result<Outcome, ClientError>) {
    let span = Span::current();
    match result {
        Ok(Outcome::Success(response)) => {
            span.record("otel.status_code", "OK");
            tracing::debug!(
                ack = %response.ack,
                correlation_id = %response.correlation_id,
                "NVP call succeeded"
            );
        }
        Ok(Outcome::Failure { error, response }) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(error));
            tracing::warn!(
                error = %error,
                correlation_id = %response.correlation_id,
                "NVP call failed"
            );
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to NVP endpoint failed");
        }
    }
}

/// Records the outcome of a call on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_outcome_on_span(_result: &Result<Outcome, ClientError>) {}
