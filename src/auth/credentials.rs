//! Credential management for Kraken API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::KrakenError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "KRAKEN_API_KEY";
/// Default environment variable holding the base64 API secret.
pub const API_SECRET_VAR: &str = "KRAKEN_API_SECRET";

/// API credentials containing the key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier), sent in the `API-Key` header
    pub api_key: String,
    /// The base64 API secret used for signing
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and base64 secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read credentials from the default environment variables.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    ///
    /// Fails with [`KrakenError::MissingCredentials`] if either variable is unset.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, KrakenError> {
        Self::try_from_env_vars(key_var, secret_var).ok_or(KrakenError::MissingCredentials)
    }

    /// Try to create credentials from default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok()?;
        let api_secret = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
