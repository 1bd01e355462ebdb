//! Venue API credentials.
//!
//! Uses the `secrecy` crate to prevent accidental logging of secret keys
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// API key and secret owned by one exchange instance.
///
/// The secret is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    /// Build credentials from values that may be missing.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` if either part is `None`.
    pub fn from_parts(
        api_key: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, AuthError> {
        match (api_key, secret_key) {
            (Some(api_key), Some(secret_key)) => Ok(Self::new(api_key, secret_key)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Looks for `<PREFIX>_API_KEY` and `<PREFIX>_API_SECRET`, reading a
    /// `.env` file first if one exists.
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` naming the first variable not set.
    pub fn from_env(prefix: &str) -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let key_var = format!("{}_API_KEY", prefix);
        let secret_var = format!("{}_API_SECRET", prefix);

        let api_key = std::env::var(&key_var).map_err(|_| AuthError::MissingEnvVar(key_var))?;
        let secret_key =
            std::env::var(&secret_var).map_err(|_| AuthError::MissingEnvVar(secret_var))?;

        Ok(Self::new(api_key, secret_key))
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        }
    }

    /// Get the API key (sent as a header by most venues).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
