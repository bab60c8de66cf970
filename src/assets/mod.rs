//! Translation between generic currency codes and Kraken asset codes.
//!
//! Kraken's older assets carry a one-letter class prefix in their asset code:
//! `Z` for fiat (`ZUSD`) and `X` for crypto (`XXBT`, `XETH`). Assets listed
//! later have no prefix (`DOT`, `USDT`). Bitcoin is `XBT` on Kraken, and
//! Dogecoin `XDG`. Every mapping here comes from a static table; codes that
//! are not in it are rejected rather than guessed.

mod pair;

pub use pair::{CurrencyPair, to_exchange_pair};

use crate::error::KrakenError;

/// One row of the asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetMapping {
    /// Generic (ISO-like) code used by callers.
    pub generic: &'static str,
    /// Kraken asset code used on the wire and in balance keys.
    pub exchange: &'static str,
    /// Kraken alternate name, used in newer pair names.
    pub altname: &'static str,
}

const fn asset(
    generic: &'static str,
    exchange: &'static str,
    altname: &'static str,
) -> AssetMapping {
    AssetMapping {
        generic,
        exchange,
        altname,
    }
}

/// Supported assets.
pub static ASSETS: &[AssetMapping] = &[
    // Fiat
    asset("USD", "ZUSD", "USD"),
    asset("EUR", "ZEUR", "EUR"),
    asset("GBP", "ZGBP", "GBP"),
    asset("JPY", "ZJPY", "JPY"),
    asset("CAD", "ZCAD", "CAD"),
    asset("AUD", "ZAUD", "AUD"),
    asset("CHF", "CHF", "CHF"),
    // Legacy crypto
    asset("BTC", "XXBT", "XBT"),
    asset("ETH", "XETH", "ETH"),
    asset("LTC", "XLTC", "LTC"),
    asset("XRP", "XXRP", "XRP"),
    asset("XLM", "XXLM", "XLM"),
    asset("XMR", "XXMR", "XMR"),
    asset("ZEC", "XZEC", "ZEC"),
    asset("ETC", "XETC", "ETC"),
    asset("DOGE", "XXDG", "XDG"),
    asset("REP", "XREP", "REP"),
    asset("MLN", "XMLN", "MLN"),
    asset("NMC", "XNMC", "NMC"),
    // Unprefixed
    asset("USDT", "USDT", "USDT"),
    asset("USDC", "USDC", "USDC"),
    asset("DAI", "DAI", "DAI"),
    asset("DOT", "DOT", "DOT"),
    asset("ADA", "ADA", "ADA"),
    asset("SOL", "SOL", "SOL"),
    asset("LINK", "LINK", "LINK"),
    asset("ATOM", "ATOM", "ATOM"),
    asset("MATIC", "MATIC", "MATIC"),
];

/// Generic aliases accepted on input, resolved to their canonical generic code.
static GENERIC_ALIASES: &[(&str, &str)] = &[("XBT", "BTC"), ("XDG", "DOGE")];

/// Look up the table row for a generic code (case-insensitive, aliases allowed).
pub fn lookup_generic(code: &str) -> Result<&'static AssetMapping, KrakenError> {
    let canonical = GENERIC_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(code))
        .map_or(code, |(_, generic)| *generic);

    ASSETS
        .iter()
        .find(|a| a.generic.eq_ignore_ascii_case(canonical))
        .ok_or_else(|| KrakenError::UnsupportedAsset(code.to_string()))
}

/// Look up the table row for a Kraken asset code or alternate name.
pub fn lookup_exchange(code: &str) -> Result<&'static AssetMapping, KrakenError> {
    ASSETS
        .iter()
        .find(|a| a.exchange.eq_ignore_ascii_case(code))
        .or_else(|| ASSETS.iter().find(|a| a.altname.eq_ignore_ascii_case(code)))
        .ok_or_else(|| KrakenError::UnsupportedAsset(code.to_string()))
}

/// Map a generic currency code to its Kraken asset code.
///
/// ```rust
/// use kraken_account_client::assets::to_exchange_code;
///
/// assert_eq!(to_exchange_code("USD").unwrap(), "ZUSD");
/// assert_eq!(to_exchange_code("btc").unwrap(), "XXBT");
/// assert!(to_exchange_code("NOPE").is_err());
/// ```
pub fn to_exchange_code(generic: &str) -> Result<&'static str, KrakenError> {
    lookup_generic(generic).map(|a| a.exchange)
}

/// Map a Kraken asset code (or alternate name) to its generic currency code.
pub fn to_generic_code(exchange: &str) -> Result<&'static str, KrakenError> {
    lookup_exchange(exchange).map(|a| a.generic)
}

/// Translate generic codes and join them with `,`, preserving order.
///
/// Returns `None` for an empty list so callers can pick their own default.
pub(crate) fn join_exchange_codes<I, S>(codes: I) -> Result<Option<String>, KrakenError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let translated = codes
        .into_iter()
        .map(|c| to_exchange_code(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((!translated.is_empty()).then(|| translated.join(",")))
}
