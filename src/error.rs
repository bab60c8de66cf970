//! Error types for the Kraken account client.

use thiserror::Error;

/// The main error type for all Kraken account client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Kraken API returned one or more errors in the response envelope
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// A currency or pair code has no known Kraken mapping
    #[error("Unsupported asset: {0}")]
    UnsupportedAsset(String),

    /// The credential material could not be used for signing
    #[error("Signing error: {0}")]
    Signing(String),

    /// Request parameters rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl KrakenError {
    /// The exchange-reported error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KrakenError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True for failures raised locally, before any request reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            KrakenError::UnsupportedAsset(_)
                | KrakenError::Signing(_)
                | KrakenError::InvalidRequest(_)
                | KrakenError::MissingCredentials
        )
    }
}

/// Errors reported by Kraken in the `error` array of a response.
///
/// The strings are kept exactly as Kraken sent them, in order
/// (e.g. `["EAPI:Invalid nonce"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Raw error strings in `ECategory:Message` form.
    pub errors: Vec<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

impl ApiError {
    /// Create an API error from Kraken's error array.
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Category of the first error (`"EAPI"` for `"EAPI:Invalid key"`).
    pub fn first_code(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|e| e.split_once(':').map_or(e.as_str(), |(code, _)| code))
    }

    /// Check whether any reported error equals `code` exactly.
    pub fn contains(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e == code)
    }

    fn any(&self, category: &str, needle: &str) -> bool {
        self.errors.iter().any(|e| {
            e.split_once(':')
                .is_some_and(|(c, m)| c == category && m.contains(needle))
        })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.any("EAPI", "Rate limit") || self.any("EOrder", "Rate limit")
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.any("EAPI", "Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.any("EAPI", "Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.any("EAPI", "Invalid signature")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.any("EGeneral", "Permission denied")
    }

    /// Check if this is a service unavailable error.
    pub fn is_service_unavailable(&self) -> bool {
        self.any("EService", "Unavailable") || self.any("EService", "Busy")
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";
    pub const INTERNAL_ERROR: &str = "EGeneral:Internal error";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";
    pub const FEATURE_DISABLED: &str = "EAPI:Feature disabled";

    /// Service errors
    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    /// Query errors
    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
    pub const UNKNOWN_ASSET: &str = "EQuery:Unknown asset";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_all_strings() {
        let errors = vec![
            error_codes::INVALID_NONCE.to_string(),
            "EGeneral:Invalid arguments:asset".to_string(),
        ];
        let error = ApiError::new(errors.clone());
        assert_eq!(error.errors, errors);
        assert_eq!(error.first_code(), Some("EAPI"));
        assert!(error.is_invalid_nonce());
        assert!(!error.is_invalid_key());
        assert!(error.contains("EGeneral:Invalid arguments:asset"));
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(vec!["EAPI:Invalid key".into(), "EService:Busy".into()]);
        assert_eq!(error.to_string(), "EAPI:Invalid key, EService:Busy");
        assert!(error.is_service_unavailable());
    }

    #[test]
    fn test_rate_limit_stays_api_error() {
        let err = KrakenError::Api(ApiError::new(vec![
            error_codes::RATE_LIMIT_EXCEEDED.to_string(),
        ]));
        assert!(err.api_error().is_some_and(ApiError::is_rate_limit));
        assert!(!err.is_local());
    }

    #[test]
    fn test_local_errors() {
        assert!(KrakenError::UnsupportedAsset("FOO".into()).is_local());
        assert!(KrakenError::Signing("bad".into()).is_local());
        assert!(KrakenError::MissingCredentials.is_local());
    }
}
