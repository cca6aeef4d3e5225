//! Storage backends.
//!
//! Stores own keys and values; eviction order lives in the policies.

pub mod bounded;

pub use bounded::BoundedCache;
