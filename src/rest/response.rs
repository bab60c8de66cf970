//! Kraken's `{ "error": [...], "result": ... }` response envelope.

use serde::Deserialize;

use crate::error::{ApiError, KrakenError};

/// Response envelope returned by every Kraken REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenResponse<T> {
    /// Error strings; empty on success.
    #[serde(default)]
    pub error: Vec<String>,
    /// Payload; present on success.
    pub result: Option<T>,
}

impl<T> KrakenResponse<T> {
    /// A successful envelope.
    pub fn success(result: T) -> Self {
        Self {
            error: Vec::new(),
            result: Some(result),
        }
    }

    /// A failed envelope.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            error: errors,
            result: None,
        }
    }
}

/// Unwrap an envelope into its payload.
///
/// A non-empty `error` array becomes [`KrakenError::Api`] carrying the
/// strings exactly as received, even when a `result` is also present.
/// An envelope with neither is an [`KrakenError::InvalidResponse`].
pub fn check_result<T>(response: KrakenResponse<T>) -> Result<T, KrakenError> {
    if !response.error.is_empty() {
        return Err(KrakenError::Api(ApiError::new(response.error)));
    }

    response
        .result
        .ok_or_else(|| KrakenError::InvalidResponse("Response missing 'result' field".to_string()))
}
