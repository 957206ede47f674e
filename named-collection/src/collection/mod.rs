//! The named collection container and its index expressions.
//!
//! A [`Collection`] is an ordered sequence of slots. Each slot holds a
//! [`Value`](crate::common::Value) and, optionally, a key that is unique within
//! the collection. Slots are addressed by position, by key, by a list of
//! indices, by a range, or level by level through nested collections with a
//! path.
//!
//! ```rust
//! use named_collection::{collection, path};
//! use named_collection::collection::{Span, Transform};
//! use named_collection::common::Value;
//!
//! let c = collection!["a" => 1, "b" => collection!["c" => 2], 3];
//!
//! // Position, key and range access
//! assert_eq!(c.get(-1).unwrap(), Value::from(3));
//! assert_eq!(c.get("a").unwrap(), Value::from(1));
//! assert_eq!(c.get(Span::default().with_step(2)).unwrap().to_string(), "{a: 1, 3}");
//!
//! // Nested access
//! assert_eq!(c.get(path!["b", "c"]).unwrap().to_string(), "{b: {c: 2}}");
//!
//! // Merge and transform produce new collections
//! let merged = c.update_with(&collection!["a" => 10]).unwrap();
//! assert_eq!(merged.to_string(), "{a: 10, b: {c: 2}, 3}");
//! let negated = c.apply(&Transform::new().pipe(|v| Value::from(-v.as_i32().unwrap_or(0)))).unwrap();
//! assert_eq!(negated.to_string(), "{a: -1, b: {c: -2}, -3}");
//! ```

#[allow(clippy::module_inception)]
mod collection;
mod index;
mod merge;
mod slot;
mod transform;

pub use collection::*;
pub use index::*;
pub use slot::*;
pub use transform::*;
