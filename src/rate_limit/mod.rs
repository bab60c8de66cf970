//! Rate limiting for Kraken private account endpoints.
//!
//! Kraken meters private REST calls per API key with a decaying call counter
//! whose ceiling and decay rate depend on the account's verification tier.
//! Ledger queries cost two points, every other account call one.
//!
//! The counter is modelled as a GCRA limiter (via `governor`): burst equals
//! the counter ceiling and one point is replenished every `1 / decay_rate`
//! seconds.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kraken_account_client::rest::AccountClient;
//! use kraken_account_client::rate_limit::{RateLimitedClient, RateLimitConfig};
//! use kraken_account_client::types::VerificationTier;
//!
//! let client = AccountClient::builder().credentials(credentials).build();
//! let rate_limited = RateLimitedClient::new(client, RateLimitConfig {
//!     tier: VerificationTier::Intermediate,
//!     enabled: true,
//! });
//!
//! // Waits for counter budget before each call
//! let ledgers = rate_limited.get_ledgers(None).await?;
//! ```

mod client;

pub use client::RateLimitedClient;

use crate::types::VerificationTier;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Verification tier (affects rate limits).
    pub tier: VerificationTier,
    /// Whether to enable rate limiting.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            tier: VerificationTier::Starter,
            enabled: true,
        }
    }
}

/// Call counter costs of the account endpoints.
pub mod costs {
    /// `Balance`, `TradeBalance`, `TradeVolume`.
    pub const DEFAULT: u32 = 1;
    /// `Ledgers` and `QueryLedgers`.
    pub const LEDGER: u32 = 2;
}
