//! # Kraken Account Client
//!
//! An async Rust client for the Kraken private account REST endpoints:
//! balances, trade balance, ledgers and trade volume.
//!
//! ## Features
//!
//! - Request signing and strictly increasing nonces
//! - Generic currency codes (`USD`, `BTC`) translated to Kraken codes (`ZUSD`, `XXBT`)
//! - Built-in rate limiting
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use kraken_account_client::auth::EnvCredentials;
//! use kraken_account_client::rest::{AccountClient, KrakenAccountExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AccountClient::builder()
//!         .credentials(Arc::new(EnvCredentials::from_env()?))
//!         .build();
//!
//!     let balances = client.get_balance_generic().await?;
//!     println!("Balances: {:?}", balances);
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use assets::CurrencyPair;
pub use error::{ApiError, KrakenError};
pub use rest::{AccountClient, KrakenAccount, KrakenAccountExt};
pub use types::common::LedgerType;

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
