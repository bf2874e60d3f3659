//! Centralized configuration defaults
//!
//! Every defaulted accessor resolves through the constants here; defaults are
//! never applied ad hoc at call sites, so the values cannot drift between
//! components.

use std::time::Duration;

/// Number of records shown when a list first loads, and the increment applied
/// by each "load more".
pub const PAGE_SIZE: usize = 6;

/// Upper bound on the number of records fetched from the server per reload.
pub const MAX_RECORDS: usize = 50;

/// Debounce delay applied to infinite-scroll triggers.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(250);

/// Base path used to derive record navigation URLs when linking is enabled.
pub const RECORD_BASE_PATH: &str = "/record";
