//! Error types

mod config;
mod delete;
mod fetch;
mod field;

pub use config::*;
pub use delete::*;
pub use fetch::*;
pub use field::*;

/// Top-level error type aggregating all failure areas.
///
/// No variant is fatal to the controller: configuration errors fail soft to an
/// empty configuration, fetch errors degrade to an empty record set with an
/// error banner, and field/delete errors are recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration parse failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote fetch failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Per-record field access failure.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Record deletion failure.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}
