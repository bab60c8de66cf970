//! Rate-limited client wrapper.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use rust_decimal::Decimal;
use tracing::trace;

use crate::error::KrakenError;
use crate::rate_limit::{RateLimitConfig, costs};
use crate::rest::KrakenAccount;
use crate::rest::private::{
    LedgerEntry, LedgersInfo, LedgersRequest, QueryLedgersRequest, TradeBalance,
    TradeBalanceRequest, TradeVolume, TradeVolumeRequest,
};
use crate::types::VerificationTier;

/// A rate-limited wrapper around any [`KrakenAccount`] implementation.
///
/// Each call waits until the tier's call counter has room for the
/// endpoint's cost, then forwards to the inner client. Clones share the
/// same budget.
pub struct RateLimitedClient<C> {
    inner: C,
    config: RateLimitConfig,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<C> RateLimitedClient<C> {
    /// Create a new rate-limited client wrapper.
    pub fn new(inner: C, config: RateLimitConfig) -> Self {
        let limiter = Arc::new(RateLimiter::direct(quota_for(config.tier)));
        Self {
            inner,
            config,
            limiter,
        }
    }

    /// Create a new rate-limited client with a specific verification tier.
    pub fn with_tier(inner: C, tier: VerificationTier) -> Self {
        Self::new(
            inner,
            RateLimitConfig {
                tier,
                enabled: true,
            },
        )
    }

    /// Get a reference to the inner client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Enable or disable rate limiting.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Wait until `cost` counter points are available.
    async fn acquire(&self, cost: u32) -> Result<(), KrakenError> {
        if !self.config.enabled {
            return Ok(());
        }

        let cost = NonZeroU32::new(cost).unwrap_or(NonZeroU32::MIN);
        trace!(cost = cost.get(), "waiting for rate limit budget");
        self.limiter
            .until_n_ready(cost)
            .await
            .map_err(|e| KrakenError::InvalidRequest(format!("Call cost exceeds rate limit: {e}")))
    }

    /// Take `cost` points without waiting; false if the budget is short.
    #[cfg(test)]
    fn try_acquire(&self, cost: u32) -> bool {
        let cost = NonZeroU32::new(cost).unwrap_or(NonZeroU32::MIN);
        matches!(self.limiter.check_n(cost), Ok(Ok(())))
    }
}

/// GCRA quota equivalent to the tier's decaying call counter.
fn quota_for(tier: VerificationTier) -> Quota {
    let (max_counter, decay_rate) = tier.rate_limit_params();
    let burst = NonZeroU32::new(max_counter).unwrap_or(NonZeroU32::MIN);

    Quota::with_period(Duration::from_secs_f64(1.0 / decay_rate))
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(burst)
}

impl<C: std::fmt::Debug> std::fmt::Debug for RateLimitedClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedClient")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish()
    }
}

impl<C: Clone> Clone for RateLimitedClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
            limiter: self.limiter.clone(),
        }
    }
}

impl<C: KrakenAccount> KrakenAccount for RateLimitedClient<C> {
    async fn get_account_balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        self.acquire(costs::DEFAULT).await?;
        self.inner.get_account_balance().await
    }

    async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<TradeBalance, KrakenError> {
        self.acquire(costs::DEFAULT).await?;
        self.inner.get_trade_balance(request).await
    }

    async fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> Result<LedgersInfo, KrakenError> {
        self.acquire(costs::LEDGER).await?;
        self.inner.get_ledgers(request).await
    }

    async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<HashMap<String, LedgerEntry>, KrakenError> {
        self.acquire(costs::LEDGER).await?;
        self.inner.query_ledgers(request).await
    }

    async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<TradeVolume, KrakenError> {
        self.acquire(costs::DEFAULT).await?;
        self.inner.get_trade_volume(request).await
    }
}
