//! Trait definitions for the Kraken account REST client.
//!
//! [`KrakenAccount`] abstracts the five account endpoints so that callers can
//! depend on it instead of the concrete [`AccountClient`](crate::rest::AccountClient).
//! This enables:
//! - Mock implementations for testing
//! - Decorators such as [`RateLimitedClient`](crate::rate_limit::RateLimitedClient)
//!
//! [`KrakenAccountExt`] layers argument-style conveniences on top of any
//! implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use kraken_account_client::rest::{KrakenAccount, KrakenAccountExt};
//!
//! async fn usd_equity<C: KrakenAccount>(client: &C) -> Result<(), kraken_account_client::KrakenError> {
//!     let balance = client.get_trade_balance_in(Some("USD")).await?;
//!     println!("Equity: {}", balance.equity);
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;

use rust_decimal::Decimal;

use crate::assets::{self, CurrencyPair};
use crate::error::KrakenError;
use crate::rest::private::{
    LedgerEntry, LedgersInfo, LedgersRequest, QueryLedgersRequest, TradeBalance,
    TradeBalanceRequest, TradeVolume, TradeVolumeRequest,
};
use crate::types::LedgerType;

/// Trait defining the Kraken private account operations.
///
/// All methods are async and return `Result<T, KrakenError>`.
pub trait KrakenAccount: Send + Sync {
    /// Get balances keyed by Kraken asset code.
    fn get_account_balance(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, Decimal>, KrakenError>> + Send;

    /// Get the trade (margin) balance.
    fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> impl Future<Output = Result<TradeBalance, KrakenError>> + Send;

    /// Get ledger entries matching the request filters.
    fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> impl Future<Output = Result<LedgersInfo, KrakenError>> + Send;

    /// Get specific ledger entries by id.
    fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> impl Future<Output = Result<HashMap<String, LedgerEntry>, KrakenError>> + Send;

    /// Get trade volume and fee tiers.
    fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> impl Future<Output = Result<TradeVolume, KrakenError>> + Send;
}

/// Argument-style conveniences over [`KrakenAccount`].
///
/// Implemented for every `KrakenAccount`.
pub trait KrakenAccountExt: KrakenAccount {
    /// Get balances keyed by generic currency code (`USD`, `BTC`).
    ///
    /// Kraken codes without a known mapping are kept as-is. Amounts of codes
    /// that map to the same currency are summed.
    fn get_balance_generic(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, Decimal>, KrakenError>> + Send {
        async move {
            let balances = self.get_account_balance().await?;

            let mut generic: HashMap<String, Decimal> = HashMap::with_capacity(balances.len());
            for (code, amount) in balances {
                let key = assets::to_generic_code(&code)
                    .map(str::to_string)
                    .unwrap_or(code);
                *generic.entry(key).or_default() += amount;
            }
            Ok(generic)
        }
    }

    /// Get the trade balance valued in a generic currency (`ZUSD` when `None`).
    fn get_trade_balance_in(
        &self,
        valuation: Option<&str>,
    ) -> impl Future<Output = Result<TradeBalance, KrakenError>> + Send {
        async move {
            let request = TradeBalanceRequest {
                asset: valuation.map(str::to_string),
            };
            self.get_trade_balance(Some(&request)).await
        }
    }

    /// Get ledger entries with positional filters.
    ///
    /// `None` filters are left out of the request; an empty `assets` slice
    /// means every asset.
    fn get_ledger_info(
        &self,
        ledger_type: Option<LedgerType>,
        start: Option<&str>,
        end: Option<&str>,
        offset: Option<&str>,
        assets: &[&str],
    ) -> impl Future<Output = Result<HashMap<String, LedgerEntry>, KrakenError>> + Send {
        async move {
            let request = LedgersRequest {
                assets: assets.iter().map(|a| a.to_string()).collect(),
                ledger_type,
                start: start.map(str::to_string),
                end: end.map(str::to_string),
                offset: offset.map(str::to_string),
                without_count: None,
            };
            Ok(self.get_ledgers(Some(&request)).await?.ledger)
        }
    }

    /// Get specific ledger entries by id.
    fn query_ledgers_by_id(
        &self,
        ids: &[&str],
    ) -> impl Future<Output = Result<HashMap<String, LedgerEntry>, KrakenError>> + Send {
        async move {
            let request = QueryLedgersRequest::new(ids.iter().copied());
            self.query_ledgers(&request).await
        }
    }

    /// Get trade volume, with fee tiers for `pairs` when any are given.
    fn get_trade_volume_for(
        &self,
        pairs: &[CurrencyPair],
    ) -> impl Future<Output = Result<TradeVolume, KrakenError>> + Send {
        async move {
            let request = TradeVolumeRequest::new(pairs.iter().cloned());
            self.get_trade_volume(Some(&request)).await
        }
    }
}

impl<T: KrakenAccount> KrakenAccountExt for T {}
