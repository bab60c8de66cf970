//! Canonical form parameters for private requests.
//!
//! A [`ParamSet`] is the ordered list of form fields a request sends, before
//! the nonce is stamped on. Absent optional filters are simply not pushed;
//! an explicitly empty value is kept and sent as `name=`.

use crate::error::KrakenError;

/// Default token Kraken accepts for "no asset / type restriction".
pub const ALL: &str = "all";

/// Ordered form parameters of a private request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    params: Vec<(&'static str, String)>,
}

impl ParamSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.params.push((name, value.into()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt<V: Into<String>>(&mut self, name: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    /// Value of the first parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Form-encode the parameters with `nonce` as the leading field.
    ///
    /// This string is both the POST body and the data that gets signed.
    pub fn encode(&self, nonce: u64) -> Result<String, KrakenError> {
        let nonce = nonce.to_string();
        let fields: Vec<(&str, &str)> = std::iter::once(("nonce", nonce.as_str()))
            .chain(self.iter())
            .collect();
        serde_urlencoded::to_string(&fields).map_err(|e| KrakenError::InvalidRequest(e.to_string()))
    }
}

/// Resolve an optional comma-joined list to its value or the `all` default.
pub(crate) fn or_all(joined: Option<String>) -> String {
    joined.unwrap_or_else(|| ALL.to_string())
}
