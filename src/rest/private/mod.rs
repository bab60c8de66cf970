//! Private account endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::KrakenError;
use crate::rest::AccountClient;
use crate::rest::endpoints::private;
use crate::rest::params::ParamSet;

impl AccountClient {
    /// Get account balance.
    ///
    /// Returns the balances of all assets in the account, keyed by Kraken
    /// asset code (e.g. `ZUSD`, `XXBT`).
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
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = AccountClient::builder().credentials(credentials).build();
    ///
    ///     let balances = client.get_account_balance().await?;
    ///     for (asset, balance) in balances {
    ///         println!("{}: {}", asset, balance);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn get_account_balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        self.private_post(private::BALANCE, &ParamSet::new()).await
    }

    /// Get trade balance.
    ///
    /// Returns margin account details including equity, margin, and P&L,
    /// valued in the request's asset (`ZUSD` when not given).
    #[instrument(skip(self))]
    pub async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<TradeBalance, KrakenError> {
        let params = match request {
            Some(req) => req.to_params()?,
            None => TradeBalanceRequest::default().to_params()?,
        };
        self.private_post(private::TRADE_BALANCE, &params).await
    }

    /// Get ledger entries.
    ///
    /// Without a request every asset and entry type is returned, 50 at a time.
    #[instrument(skip(self))]
    pub async fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> Result<LedgersInfo, KrakenError> {
        let params = match request {
            Some(req) => req.to_params()?,
            None => LedgersRequest::default().to_params()?,
        };
        self.private_post(private::LEDGERS, &params).await
    }

    /// Query specific ledger entries by id.
    #[instrument(skip(self))]
    pub async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<HashMap<String, LedgerEntry>, KrakenError> {
        let params = request.to_params()?;
        self.private_post(private::QUERY_LEDGERS, &params).await
    }

    /// Get 30-day trade volume and, for the requested pairs, fee tiers.
    #[instrument(skip(self))]
    pub async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<TradeVolume, KrakenError> {
        let params = match request {
            Some(req) => req.to_params()?,
            None => TradeVolumeRequest::default().to_params()?,
        };
        self.private_post(private::TRADE_VOLUME, &params).await
    }
}
