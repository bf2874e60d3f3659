//! Configuration error types

/// Errors raised while parsing a raw configuration blob.
///
/// These are never surfaced to the end user as fatal: the configuration cache
/// logs the condition and substitutes an empty configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The raw configuration is not valid JSON.
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
