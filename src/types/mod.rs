//! Common types used across the Kraken account client.

pub mod common;
pub mod serde_helpers;

pub use common::*;
