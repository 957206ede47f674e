//! # Named Collection
//!
//! An ordered container whose slots can also carry unique string keys, so the
//! same data can be used as a list and as a dictionary.
//!
//! ## Key Features
//!
//! - **Hybrid access**: by position, key, list of indices, range or nested path
//! - **Trees**: values may be collections themselves and are traversed by
//!   path access, copy, merge and transform
//! - **Structural merge**: [`Collection::update`] merges collections without
//!   modifying the receiver
//! - **Transforms**: pipeline or per-key functions applied through
//!   [`Collection::apply`]
//! - **Plain export**: [`Collection::to_sequence`] and [`Collection::to_mapping`]
//!
//! ## Quick Start
//!
//! ```rust
//! use named_collection::{collection, path, Collection, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut settings = collection![
//!     "name" => "demo",
//!     "limits" => collection!["cpu" => 2, "memory" => 512],
//! ];
//!
//! settings.set("name", "prod")?;
//! settings.append("extra");
//!
//! let limits = settings.get(path!["limits", "cpu"])?;
//! assert_eq!(limits.to_string(), "{limits: {cpu: 2}}");
//!
//! let upgraded = settings.update_with(&collection!["limits" => collection!["cpu" => 4]])?;
//! assert_eq!(upgraded.get("limits")?.to_string(), "{cpu: 4, memory: 512}");
//! assert_eq!(settings.get("limits")?.to_string(), "{cpu: 2, memory: 512}");
//!
//! let from_pairs = Collection::from_interleaved(vec![Value::from("k"), Value::from(1)])?;
//! assert_eq!(from_pairs.to_mapping()["k"], Value::from(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and installs no logger. Failed
//! operations are reported at `error` level, merges and transforms at `debug`
//! level and index resolution at `trace` level.

pub mod collection;
pub mod common;
pub mod errors;

pub use collection::{Collection, Index, Query, Slot, Span, Transform};
pub use common::Value;
pub use errors::{CollectionError, CollectionResult, ErrorKind};

#[cfg(test)]
mod tests {
    use super::*;

    // Setup only one time throughout the crate's unit tests
    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    #[test]
    fn test_root_exports() {
        let c: Collection = collection!["a" => 1, 2];
        let err: CollectionError = c.get(5).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfBounds);
        assert_eq!(c.get(Query::from("a")).unwrap(), Value::from(1));
        assert_eq!(c.get(Index::Position(1)).unwrap(), Value::from(2));
    }
}
