//! API credentials.

use std::fmt;

use serde::Deserialize;

/// API username, password and signature for the NVP "3-token" scheme.
///
/// Immutable once built. The [`Debug`] output redacts the password and the
/// signature, and the type is deliberately not `Serialize` so it cannot be
/// echoed back into a config dump.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
    signature: String,
}

impl Credentials {
    /// Creates a credential set.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            signature: signature.into(),
        }
    }

    /// Returns the API username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the API signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("signature", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("merchant_api1.example.com", "hunter2", "A1b2C3sig");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("merchant_api1.example.com"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("A1b2C3sig"));
    }

    #[test]
    fn test_deserialize() {
        let creds: Credentials = serde_json::from_str(
            r#"{"username":"user","password":"pass","signature":"sig"}"#,
        )
        .unwrap();
        assert_eq!(creds.username(), "user");
        assert_eq!(creds.password(), "pass");
        assert_eq!(creds.signature(), "sig");
    }
}
