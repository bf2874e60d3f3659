//! Memoized configuration parsing

use super::RelatedListConfig;
use crate::error::ConfigError;
use crate::memo::Memo;

/// Parses raw configuration blobs, memoized on the raw string.
///
/// Re-parsing is skipped whenever the raw blob is byte-identical to the last
/// parsed one. Malformed blobs fail soft: the condition is logged and an empty
/// configuration is substituted, so callers always receive a valid structure.
#[derive(Debug, Default)]
pub struct ConfigCache {
    memo: Memo<String, RelatedListConfig>,
    parses: usize,
}

impl ConfigCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed configuration for `raw`, reusing the previous parse
    /// when the raw blob is unchanged.
    pub fn get(&mut self, raw: &str) -> &RelatedListConfig {
        let parses = &mut self.parses;
        self.memo.get_or_compute(raw.to_string(), |raw| {
            *parses += 1;
            match parse_config(raw) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Malformed related list configuration, using empty: {err}");
                    RelatedListConfig::default()
                }
            }
        })
    }

    /// Returns how many times the parser has actually run.
    pub fn parse_count(&self) -> usize {
        self.parses
    }
}

/// Parses a raw configuration blob.
///
/// An empty or whitespace-only blob is treated as an intentionally empty
/// configuration, not an error.
fn parse_config(raw: &str) -> Result<RelatedListConfig, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(RelatedListConfig::default());
    }
    Ok(serde_json::from_str(raw)?)
}
