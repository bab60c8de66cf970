//! Kraken REST API endpoint constants.

/// Base URL for the Kraken REST API.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Private account endpoints (authentication required).
pub mod private {
    /// Get account balance.
    pub const BALANCE: &str = "/0/private/Balance";
    /// Get trade balance.
    pub const TRADE_BALANCE: &str = "/0/private/TradeBalance";
    /// Get ledgers.
    pub const LEDGERS: &str = "/0/private/Ledgers";
    /// Query ledgers.
    pub const QUERY_LEDGERS: &str = "/0/private/QueryLedgers";
    /// Get trade volume.
    pub const TRADE_VOLUME: &str = "/0/private/TradeVolume";
}
