//! Types for private account endpoints.
//!
//! Request types hold typed, optional filters and turn them into a
//! [`ParamSet`] through `to_params`, translating generic currency codes to
//! Kraken asset codes on the way.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::assets::{self, CurrencyPair};
use crate::error::KrakenError;
use crate::rest::params::{ParamSet, or_all};
use crate::types::serde_helpers::{empty_string_as_none, string_or_number_decimal};
use crate::types::{AssetClass, LedgerType};

/// Request for trade balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeBalanceRequest {
    /// Generic code of the valuation asset. Kraken values in `ZUSD` when absent.
    pub asset: Option<String>,
}

impl TradeBalanceRequest {
    /// Value the balance in `asset` (a generic code such as `EUR`).
    pub fn valued_in(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
        }
    }

    /// Canonical form parameters.
    pub fn to_params(&self) -> Result<ParamSet, KrakenError> {
        let asset = self
            .asset
            .as_deref()
            .map(assets::to_exchange_code)
            .transpose()?;

        let mut params = ParamSet::new();
        params
            .push("aclass", AssetClass::Currency.as_str())
            .push_opt("asset", asset);
        Ok(params)
    }
}

/// Trade balance response.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance (combined balance of all currencies).
    #[serde(rename = "eb")]
    pub equivalent_balance: Decimal,
    /// Trade balance (combined balance of all equity currencies).
    #[serde(rename = "tb")]
    pub trade_balance: Decimal,
    /// Margin amount of open positions.
    #[serde(rename = "m", default)]
    pub margin: Decimal,
    /// Unrealized net profit/loss of open positions.
    #[serde(rename = "n", default)]
    pub unrealized_pnl: Decimal,
    /// Cost basis of open positions.
    #[serde(rename = "c", default)]
    pub cost_basis: Decimal,
    /// Current floating valuation of open positions.
    #[serde(rename = "v", default)]
    pub floating_valuation: Decimal,
    /// Equity = trade balance + unrealized net profit/loss.
    #[serde(rename = "e")]
    pub equity: Decimal,
    /// Free margin = equity - initial margin.
    #[serde(rename = "mf")]
    pub free_margin: Decimal,
    /// Margin level = (equity / initial margin) * 100.
    #[serde(rename = "ml", default)]
    pub margin_level: Option<Decimal>,
    /// Unexecuted value.
    #[serde(rename = "uv", default)]
    pub unexecuted_value: Option<Decimal>,
}

/// Request for ledger entries.
///
/// ```rust
/// use kraken_account_client::rest::private::LedgersRequest;
/// use kraken_account_client::types::LedgerType;
///
/// let params = LedgersRequest::new()
///     .ledger_type(LedgerType::Trade)
///     .assets(["USD", "BTC"])
///     .to_params()
///     .unwrap();
///
/// assert_eq!(params.get("aclass"), Some("currency"));
/// assert_eq!(params.get("asset"), Some("ZUSD,XXBT"));
/// assert_eq!(params.get("type"), Some("trade"));
/// assert!(!params.contains("start"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgersRequest {
    /// Generic codes of the assets to restrict to; empty means all.
    pub assets: Vec<String>,
    /// Entry type to restrict to; `None` means all.
    pub ledger_type: Option<LedgerType>,
    /// Starting unix timestamp or ledger id (exclusive).
    pub start: Option<String>,
    /// Ending unix timestamp or ledger id (inclusive).
    pub end: Option<String>,
    /// Result offset for pagination.
    pub offset: Option<String>,
    /// Skip the total count, which is faster on large ledgers.
    pub without_count: Option<bool>,
}

impl LedgersRequest {
    /// Request every ledger entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to these assets (generic codes), in this order.
    pub fn assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to one entry type.
    pub fn ledger_type(mut self, ledger_type: LedgerType) -> Self {
        self.ledger_type = Some(ledger_type);
        self
    }

    /// Set the start marker.
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the end marker.
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set the result offset.
    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Skip the total count.
    pub fn without_count(mut self, without_count: bool) -> Self {
        self.without_count = Some(without_count);
        self
    }

    /// Canonical form parameters.
    pub fn to_params(&self) -> Result<ParamSet, KrakenError> {
        let asset = or_all(assets::join_exchange_codes(&self.assets)?);
        let ledger_type = self.ledger_type.unwrap_or(LedgerType::All);

        let mut params = ParamSet::new();
        params
            .push("aclass", AssetClass::Currency.as_str())
            .push("asset", asset)
            .push("type", ledger_type.as_str())
            .push_opt("start", self.start.clone())
            .push_opt("end", self.end.clone())
            .push_opt("ofs", self.offset.clone())
            .push_opt("without_count", self.without_count.map(|b| b.to_string()));
        Ok(params)
    }
}

/// Ledgers info response.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgersInfo {
    /// Ledger entries keyed by ledger ID.
    pub ledger: HashMap<String, LedgerEntry>,
    /// Total count of matching entries (absent with `without_count`).
    #[serde(default)]
    pub count: Option<u32>,
}

/// Ledger entry details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerEntry {
    /// Reference ID of the trade, deposit or withdrawal behind the entry.
    pub refid: String,
    /// Unix timestamp.
    pub time: f64,
    /// Raw entry type as reported by Kraken.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Sub-type.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub subtype: Option<String>,
    /// Asset class.
    pub aclass: String,
    /// Kraken asset code.
    pub asset: String,
    /// Amount.
    pub amount: Decimal,
    /// Fee.
    pub fee: Decimal,
    /// Balance after the entry.
    pub balance: Decimal,
}

impl LedgerEntry {
    /// Entry type, if it is one this crate knows.
    pub fn ledger_type(&self) -> Option<LedgerType> {
        self.entry_type.parse().ok()
    }

    /// Generic code of the entry's asset, if known.
    pub fn generic_asset(&self) -> Option<&'static str> {
        assets::to_generic_code(&self.asset).ok()
    }
}

/// Request for specific ledger entries by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryLedgersRequest {
    /// Ledger ids to fetch. Kraken accepts up to 20 per call.
    pub ids: Vec<String>,
    /// Also return related trade info.
    pub trades: Option<bool>,
}

impl QueryLedgersRequest {
    /// Query these ledger ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            trades: None,
        }
    }

    /// Include related trade info.
    pub fn trades(mut self, trades: bool) -> Self {
        self.trades = Some(trades);
        self
    }

    /// Canonical form parameters.
    ///
    /// Ids are sent as given; Kraken validates them.
    pub fn to_params(&self) -> Result<ParamSet, KrakenError> {
        let mut params = ParamSet::new();
        params
            .push("id", self.ids.join(","))
            .push_opt("trades", self.trades.map(|b| b.to_string()));
        Ok(params)
    }
}

/// Request for trade volume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeVolumeRequest {
    /// Pairs to report fee tiers for; empty sends no `pair` field.
    pub pairs: Vec<CurrencyPair>,
    /// Whether to include fee info in the response.
    pub fee_info: Option<bool>,
}

impl TradeVolumeRequest {
    /// Report fees for these pairs.
    pub fn new(pairs: impl IntoIterator<Item = CurrencyPair>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
            fee_info: None,
        }
    }

    /// Ask for (or suppress) fee info.
    pub fn fee_info(mut self, fee_info: bool) -> Self {
        self.fee_info = Some(fee_info);
        self
    }

    /// Canonical form parameters.
    pub fn to_params(&self) -> Result<ParamSet, KrakenError> {
        let pairs = self
            .pairs
            .iter()
            .map(CurrencyPair::to_exchange_pair)
            .collect::<Result<Vec<_>, _>>()?;

        let mut params = ParamSet::new();
        params
            .push_opt("pair", (!pairs.is_empty()).then(|| pairs.join(",")))
            .push_opt("fee-info", self.fee_info.map(|b| b.to_string()));
        Ok(params)
    }
}

/// Trade volume response.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Currency the volume is expressed in.
    pub currency: String,
    /// Current 30-day volume.
    #[serde(deserialize_with = "string_or_number_decimal::deserialize")]
    pub volume: Decimal,
    /// Taker fee info by pair.
    #[serde(default)]
    pub fees: Option<HashMap<String, FeeInfo>>,
    /// Maker fee info by pair.
    #[serde(default)]
    pub fees_maker: Option<HashMap<String, FeeInfo>>,
}

/// Fee tier information for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeInfo {
    /// Current fee in percent.
    pub fee: Decimal,
    /// Minimum fee for the pair.
    #[serde(default)]
    pub minfee: Option<Decimal>,
    /// Maximum fee for the pair.
    #[serde(default)]
    pub maxfee: Option<Decimal>,
    /// Next tier's fee.
    #[serde(default)]
    pub nextfee: Option<Decimal>,
    /// Volume level of the next tier.
    #[serde(default)]
    pub nextvolume: Option<Decimal>,
    /// Volume level of the current tier.
    #[serde(default)]
    pub tiervolume: Option<Decimal>,
}
