//! Configuration schema, defaults and memoized parsing

mod cache;
pub mod defaults;
mod schema;

pub use cache::*;
pub use schema::*;
