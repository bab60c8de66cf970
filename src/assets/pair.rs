//! Currency pairs and their Kraken pair names.

use std::fmt;
use std::str::FromStr;

use super::lookup_generic;
use crate::error::KrakenError;

/// Kraken's listed names for pairs whose name is not `<base altname><quote altname>`.
static PAIR_NAMES: &[((&str, &str), &str)] = &[
    // Bitcoin
    (("BTC", "USD"), "XXBTZUSD"),
    (("BTC", "EUR"), "XXBTZEUR"),
    (("BTC", "GBP"), "XXBTZGBP"),
    (("BTC", "JPY"), "XXBTZJPY"),
    (("BTC", "CAD"), "XXBTZCAD"),
    // Ether
    (("ETH", "USD"), "XETHZUSD"),
    (("ETH", "EUR"), "XETHZEUR"),
    (("ETH", "GBP"), "XETHZGBP"),
    (("ETH", "JPY"), "XETHZJPY"),
    (("ETH", "CAD"), "XETHZCAD"),
    (("ETH", "BTC"), "XETHXXBT"),
    // Other legacy crypto
    (("LTC", "USD"), "XLTCZUSD"),
    (("LTC", "EUR"), "XLTCZEUR"),
    (("LTC", "BTC"), "XLTCXXBT"),
    (("XRP", "USD"), "XXRPZUSD"),
    (("XRP", "EUR"), "XXRPZEUR"),
    (("XRP", "BTC"), "XXRPXXBT"),
    (("XLM", "USD"), "XXLMZUSD"),
    (("XLM", "EUR"), "XXLMZEUR"),
    (("XLM", "BTC"), "XXLMXXBT"),
    (("XMR", "USD"), "XXMRZUSD"),
    (("XMR", "EUR"), "XXMRZEUR"),
    (("XMR", "BTC"), "XXMRXXBT"),
    (("ZEC", "USD"), "XZECZUSD"),
    (("ZEC", "EUR"), "XZECZEUR"),
    (("ZEC", "BTC"), "XZECXXBT"),
    (("ETC", "USD"), "XETCZUSD"),
    (("ETC", "EUR"), "XETCZEUR"),
    (("ETC", "BTC"), "XETCXXBT"),
    (("ETC", "ETH"), "XETCXETH"),
    (("REP", "USD"), "XREPZUSD"),
    (("REP", "EUR"), "XREPZEUR"),
    (("REP", "BTC"), "XREPXXBT"),
    (("MLN", "USD"), "XMLNZUSD"),
    (("MLN", "EUR"), "XMLNZEUR"),
    (("MLN", "BTC"), "XMLNXXBT"),
    (("MLN", "ETH"), "XMLNXETH"),
    // Stablecoins
    (("USDT", "USD"), "USDTZUSD"),
];

/// A pair of generic currency codes, e.g. `BTC/USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    /// Base currency.
    pub base: String,
    /// Quote (counter) currency.
    pub quote: String,
}

impl CurrencyPair {
    /// Create a new pair from generic codes.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Kraken's name for this pair.
    pub fn to_exchange_pair(&self) -> Result<String, KrakenError> {
        to_exchange_pair(&self.base, &self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = KrakenError;

    /// Parse `BASE/QUOTE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base.trim(), quote.trim()))
            }
            _ => Err(KrakenError::UnsupportedAsset(s.to_string())),
        }
    }
}

/// Map a generic base/quote pair to Kraken's pair name.
///
/// Pairs in Kraken's listing table use their listed name (`XXBTZUSD`).
/// Every other pair is named by its alternate names (`DOTUSD`, `XDGUSD`),
/// which Kraken accepts for all pairs.
///
/// ```rust
/// use kraken_account_client::assets::to_exchange_pair;
///
/// assert_eq!(to_exchange_pair("BTC", "USD").unwrap(), "XXBTZUSD");
/// assert_eq!(to_exchange_pair("DOT", "EUR").unwrap(), "DOTEUR");
/// assert_eq!(to_exchange_pair("DOGE", "USD").unwrap(), "XDGUSD");
/// ```
pub fn to_exchange_pair(base: &str, quote: &str) -> Result<String, KrakenError> {
    let base = lookup_generic(base)?;
    let quote = lookup_generic(quote)?;

    let listed = PAIR_NAMES
        .iter()
        .find(|((b, q), _)| *b == base.generic && *q == quote.generic)
        .map(|(_, name)| (*name).to_string());

    Ok(listed.unwrap_or_else(|| format!("{}{}", base.altname, quote.altname)))
}
