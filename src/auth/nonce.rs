//! Nonce generation for Kraken API authentication.
//!
//! Kraken requires a strictly increasing nonce per API key for each
//! authenticated request to prevent replay attacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request made with the
/// same API key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses microseconds since UNIX epoch, with a compare-and-swap loop so that
/// two calls in the same microsecond, a clock that steps backwards, or
/// concurrent callers never observe equal or decreasing values.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a provider whose first nonce is strictly greater than `last`.
    ///
    /// Useful when a key's previous nonce stream is known to be ahead of the
    /// local clock.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    /// Current time in microseconds since UNIX epoch, or 0 if the clock reads
    /// before the epoch (the counter then carries monotonicity alone).
    fn current_time_micros() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_micros();

        let mut last = self.last_nonce.load(Ordering::SeqCst);
        loop {
            let next = time_nonce.max(last.saturating_add(1));
            match self.last_nonce.compare_exchange_weak(
                last,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                // Another thread issued a nonce in between.
                Err(current) => last = current,
            }
        }
    }
}
