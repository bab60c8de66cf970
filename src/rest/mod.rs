//! Kraken account REST API client.
//!
//! Provides typed access to Kraken's private account endpoints:
//! `Balance`, `TradeBalance`, `Ledgers`, `QueryLedgers` and `TradeVolume`.
//!
//! A private call flows through four steps: the request type builds an
//! ordered [`ParamSet`](params::ParamSet), the client stamps it with a nonce,
//! signs it into a [`SignedRequest`](crate::auth::SignedRequest), and the
//! response envelope is unwrapped by [`check_result`](response::check_result).

mod client;
pub mod endpoints;
pub mod params;
pub mod private;
pub mod response;
mod traits;

pub use client::{AccountClient, AccountClientBuilder, DEFAULT_TIMEOUT};
pub use endpoints::KRAKEN_BASE_URL;
pub use traits::{KrakenAccount, KrakenAccountExt};
