//! Related-list data controller library
//!
//! A standalone engine for "related list" UI widgets: it owns a configuration
//! snapshot, a remote data source and a derived-view cache, and exposes the
//! observable state a host renders from. Change detection is signature-based
//! (data-relevant inputs trigger a refetch, display-relevant inputs a local
//! column rebuild), pagination and sorting operate client-side over the
//! already-fetched record set, and infinite scroll is debounced with true
//! cancellation semantics.
//!
//! The host supplies the remote side as a [`source::DataSource`]
//! implementation; rendering, navigation and the platform data model stay
//! outside this crate.

pub mod columns;
pub mod config;
pub mod error;
pub mod memo;
pub mod model;
pub mod paging;
pub mod scroll;
pub mod signature;
pub mod sort;
pub mod source;

mod controller;

pub use controller::*;
