//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! `nonce` is the decimal string of the nonce and `POST_data` is the exact
//! form-encoded body, which itself contains `nonce=<nonce>`. The signature is
//! base64-encoded and sent in the `API-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::auth::Credentials;
use crate::error::KrakenError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a request for Kraken's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `url_path` - The API endpoint path (e.g., "/0/private/Balance")
/// * `nonce` - The nonce value for this request
/// * `post_data` - The URL-encoded POST body
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature. Fails only if the secret is not
/// valid base64.
///
/// # Example
///
/// ```rust
/// use kraken_account_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA=="); // base64 of "api_secret"
/// let signature = sign_request(
///     &credentials,
///     "/0/private/Balance",
///     1234567890,
///     "nonce=1234567890"
/// )?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    url_path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, KrakenError> {
    let secret_decoded = BASE64
        .decode(credentials.expose_secret())
        .map_err(|_| KrakenError::Signing("API secret must be valid base64".to_string()))?;

    // SHA256(nonce + POST_data)
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(nonce.to_string().as_bytes());
    sha256_hasher.update(post_data.as_bytes());
    let sha256_hash = sha256_hasher.finalize();

    // HMAC-SHA512(path + sha256_hash, decoded_secret)
    let mut hmac = HmacSha512::new_from_slice(&secret_decoded)
        .map_err(|e| KrakenError::Signing(format!("Invalid HMAC key: {e}")))?;
    hmac.update(url_path.as_bytes());
    hmac.update(&sha256_hash);

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}

/// A fully signed private request, ready to be sent.
///
/// The nonce, body and signature are bound together: a transport retry of the
/// same logical call re-sends this unit unchanged, while a new call builds a
/// new one with a fresh nonce.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Endpoint path, e.g. `/0/private/Ledgers`.
    pub path: String,
    /// Nonce embedded in `body`.
    pub nonce: u64,
    /// Form-encoded body starting with `nonce=`.
    pub body: String,
    /// Value of the `API-Key` header.
    pub api_key: String,
    /// Value of the `API-Sign` header.
    pub signature: String,
}

impl SignedRequest {
    /// Sign `body` (which must already contain the nonce) for `path`.
    pub fn new(
        credentials: &Credentials,
        path: impl Into<String>,
        nonce: u64,
        body: impl Into<String>,
    ) -> Result<Self, KrakenError> {
        let path = path.into();
        let body = body.into();
        let signature = sign_request(credentials, &path, nonce, &body)?;
        Ok(Self {
            path,
            nonce,
            body,
            api_key: credentials.api_key.clone(),
            signature,
        })
    }
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("path", &self.path)
            .field("nonce", &self.nonce)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
