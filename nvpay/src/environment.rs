//! Sandbox/production selection and endpoint configuration.
//!
//! - [`Environment`] - Which PayPal deployment a client talks to
//! - [`Endpoints`] - The API endpoint and checkout redirect endpoint pair

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    CHECKOUT_PRODUCTION_URL, CHECKOUT_SANDBOX_URL, NVP_PRODUCTION_URL, NVP_SANDBOX_URL,
};

/// The PayPal deployment a client is bound to.
///
/// Fixed when a client is constructed and recorded on every response it
/// produces, so the checkout redirect goes to the matching host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test deployment.
    #[default]
    Sandbox,
    /// Live deployment.
    Production,
}

impl Environment {
    /// Maps a "uses sandbox" flag to an environment.
    #[must_use]
    pub const fn from_sandbox_flag(uses_sandbox: bool) -> Self {
        if uses_sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Returns `true` for [`Environment::Sandbox`].
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Returns the built-in API endpoint for this environment.
    #[must_use]
    pub const fn api_url(self) -> &'static str {
        match self {
            Self::Sandbox => NVP_SANDBOX_URL,
            Self::Production => NVP_PRODUCTION_URL,
        }
    }

    /// Returns the built-in checkout redirect endpoint for this environment.
    #[must_use]
    pub const fn checkout_url(self) -> &'static str {
        match self {
            Self::Sandbox => CHECKOUT_SANDBOX_URL,
            Self::Production => CHECKOUT_PRODUCTION_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// The pair of URLs a client needs: where to POST API calls and where to
/// send the buyer for approval.
///
/// Defaults come from [`Endpoints::for_environment`]; tests and proxies can
/// inject their own with [`Endpoints::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    api: Url,
    checkout: Url,
}

impl Endpoints {
    /// Creates an endpoint pair from already parsed URLs.
    #[must_use]
    pub const fn new(api: Url, checkout: Url) -> Self {
        Self { api, checkout }
    }

    /// Parses an endpoint pair from strings.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if either URL is malformed.
    pub fn parse(api: &str, checkout: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api: Url::parse(api)?,
            checkout: Url::parse(checkout)?,
        })
    }

    /// Returns the built-in endpoint pair for an environment.
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in URLs are compile-time constants that
    /// always parse.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self::parse(environment.api_url(), environment.checkout_url())
            .expect("built-in endpoint URLs are valid")
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn api(&self) -> &Url {
        &self.api
    }

    /// Returns the checkout redirect endpoint.
    #[must_use]
    pub const fn checkout(&self) -> &Url {
        &self.checkout
    }
}
