//! Common domain types for the Kraken account API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KrakenError;

/// Ledger entry type, used both as a `Ledgers` filter and on returned entries.
///
/// On the wire the type is the lower-cased variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerType {
    /// Every entry type (the filter default)
    All,
    /// Deposit
    Deposit,
    /// Withdrawal
    Withdrawal,
    /// Trade execution
    Trade,
    /// Margin trade
    Margin,
    /// Transfer between accounts or wallets
    Transfer,
    /// Adjustment
    Adjustment,
    /// Rollover
    Rollover,
    /// Credit
    Credit,
    /// Settled position
    Settled,
    /// Staking
    Staking,
    /// Dividend
    Dividend,
    /// Sale
    Sale,
}

impl LedgerType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerType::All => "all",
            LedgerType::Deposit => "deposit",
            LedgerType::Withdrawal => "withdrawal",
            LedgerType::Trade => "trade",
            LedgerType::Margin => "margin",
            LedgerType::Transfer => "transfer",
            LedgerType::Adjustment => "adjustment",
            LedgerType::Rollover => "rollover",
            LedgerType::Credit => "credit",
            LedgerType::Settled => "settled",
            LedgerType::Staking => "staking",
            LedgerType::Dividend => "dividend",
            LedgerType::Sale => "sale",
        }
    }
}

impl std::fmt::Display for LedgerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerType {
    type Err = KrakenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ledger_type = match s.to_ascii_lowercase().as_str() {
            "all" => LedgerType::All,
            "deposit" => LedgerType::Deposit,
            "withdrawal" => LedgerType::Withdrawal,
            "trade" => LedgerType::Trade,
            "margin" => LedgerType::Margin,
            "transfer" => LedgerType::Transfer,
            "adjustment" => LedgerType::Adjustment,
            "rollover" => LedgerType::Rollover,
            "credit" => LedgerType::Credit,
            "settled" => LedgerType::Settled,
            "staking" => LedgerType::Staking,
            "dividend" => LedgerType::Dividend,
            "sale" => LedgerType::Sale,
            other => {
                return Err(KrakenError::InvalidResponse(format!(
                    "Unknown ledger type: {other}"
                )));
            }
        };
        Ok(ledger_type)
    }
}

/// Asset class. Kraken's account endpoints only accept `currency`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Currency (fiat and crypto alike)
    #[default]
    Currency,
}

impl AssetClass {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Currency => "currency",
        }
    }
}

/// Verification tier for rate limiting purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VerificationTier {
    /// Starter tier (lowest limits)
    #[default]
    Starter,
    /// Intermediate tier
    Intermediate,
    /// Pro tier (highest limits)
    Pro,
}

impl VerificationTier {
    /// Get the rate limit parameters for this verification tier.
    ///
    /// Returns a tuple of (max_counter, decay_rate_per_sec).
    pub fn rate_limit_params(&self) -> (u32, f64) {
        match self {
            VerificationTier::Starter => (15, 0.33),
            VerificationTier::Intermediate => (20, 0.5),
            VerificationTier::Pro => (20, 1.0),
        }
    }
}
