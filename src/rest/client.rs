//! Kraken account REST client implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use rust_decimal::Decimal;
use tracing::debug;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, SignedRequest};
use crate::error::KrakenError;
use crate::rest::endpoints::KRAKEN_BASE_URL;
use crate::rest::params::ParamSet;
use crate::rest::private::{
    LedgerEntry, LedgersInfo, LedgersRequest, QueryLedgersRequest, TradeBalance,
    TradeBalanceRequest, TradeVolume, TradeVolumeRequest,
};
use crate::rest::response::{KrakenResponse, check_result};
use crate::rest::traits::KrakenAccount;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The Kraken account REST client.
///
/// Holds the HTTP transport, the credentials and one nonce stream. Cloning
/// the client shares all three, so clones never issue conflicting nonces.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_account_client::rest::AccountClient;
/// use kraken_account_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = AccountClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let balance = client.get_account_balance().await?;
///     println!("Balance: {:?}", balance);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AccountClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl AccountClient {
    /// Create a new client builder.
    pub fn builder() -> AccountClientBuilder {
        AccountClientBuilder::new()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stamp `params` with a fresh nonce and sign them for `endpoint`.
    ///
    /// Fails locally, before any I/O, when no credentials are configured or
    /// the secret is malformed.
    pub fn sign(&self, endpoint: &str, params: &ParamSet) -> Result<SignedRequest, KrakenError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(KrakenError::MissingCredentials)?;

        let nonce = self.nonce_provider.next_nonce();
        let body = params.encode(nonce)?;
        SignedRequest::new(credentials.get_credentials(), endpoint, nonce, body)
    }

    /// Send an already signed request and unwrap the response envelope.
    ///
    /// Transient transport failures are retried by the middleware with the
    /// same body and signature.
    pub async fn send_signed<T>(&self, request: &SignedRequest) -> Result<T, KrakenError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(path = %request.path, nonce = request.nonce, "sending private request");

        let url = format!("{}{}", self.base_url, request.path);
        let response = self
            .http_client
            .post(&url)
            .header("API-Key", &request.api_key)
            .header("API-Sign", &request.signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request.body.clone())
            .send()
            .await?;

        self.parse_response(response).await
    }

    /// Make an authenticated POST request.
    pub(crate) async fn private_post<T>(
        &self,
        endpoint: &str,
        params: &ParamSet,
    ) -> Result<T, KrakenError>
    where
        T: serde::de::DeserializeOwned,
    {
        let signed = self.sign(endpoint, params)?;
        self.send_signed(&signed).await
    }

    /// Parse a response from the Kraken API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, KrakenError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        // Kraken returns 200 for API errors too, so the envelope decides.
        let parsed: KrakenResponse<T> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                KrakenError::InvalidResponse(format!("Failed to parse response: {e}. Body: {body}"))
            } else {
                KrakenError::InvalidResponse(format!("HTTP {status}: {body}"))
            }
        })?;

        if !parsed.error.is_empty() {
            debug!(errors = ?parsed.error, "Kraken reported errors");
        }
        check_result(parsed)
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`AccountClient`].
pub struct AccountClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    max_retries: u32,
    timeout: Duration,
}

impl AccountClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            max_retries: 3,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Share one provider between clients that use the same API key.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> AccountClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-account-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kraken-account-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        AccountClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

impl Default for AccountClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KrakenAccount for AccountClient {
    async fn get_account_balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        AccountClient::get_account_balance(self).await
    }

    async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<TradeBalance, KrakenError> {
        AccountClient::get_trade_balance(self, request).await
    }

    async fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> Result<LedgersInfo, KrakenError> {
        AccountClient::get_ledgers(self, request).await
    }

    async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<HashMap<String, LedgerEntry>, KrakenError> {
        AccountClient::query_ledgers(self, request).await
    }

    async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<TradeVolume, KrakenError> {
        AccountClient::get_trade_volume(self, request).await
    }
}
