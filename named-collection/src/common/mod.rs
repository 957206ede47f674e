//! Common types shared by the collection modules.
//!
//! - [`Value`] - the recursive value type stored in collection slots

mod value;

pub use value::*;
