use crate::collection::Collection;
use crate::common::Value;
use std::fmt::{Debug, Formatter};

/// One position of a [Collection]: an optional key and its value.
///
/// Slots without a key are reachable by position only. Keys are normalized to
/// their string form when the slot is created.
#[derive(Clone, PartialEq, Default)]
pub struct Slot {
    pub(super) key: Option<String>,
    pub(super) value: Value,
}

impl Slot {
    pub fn new(key: Option<String>, value: Value) -> Self {
        Slot { key, value }
    }

    /// Creates a slot without a key.
    pub fn bare<V: Into<Value>>(value: V) -> Self {
        Slot {
            key: None,
            value: value.into(),
        }
    }

    /// Creates a keyed slot; the key is normalized with [ToString].
    pub fn keyed<K: ToString, V: Into<Value>>(key: K, value: V) -> Self {
        Slot {
            key: Some(key.to_string()),
            value: value.into(),
        }
    }

    /// Creates a slot from a `(key, value)` pair.
    pub fn from_pair<K: ToString, V: Into<Value>>((key, value): (K, V)) -> Self {
        Slot::keyed(key, value)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_parts(self) -> (Option<String>, Value) {
        (self.key, self.value)
    }

    /// Returns a slot with the same key holding `value`.
    pub(super) fn with_value(&self, value: Value) -> Slot {
        Slot {
            key: self.key.clone(),
            value,
        }
    }
}

impl Debug for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}: {:?}", key, self.value),
            None => write!(f, "{:?}", self.value),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::bare(value)
    }
}

impl From<Collection> for Slot {
    fn from(value: Collection) -> Self {
        Slot::bare(value)
    }
}

impl<K: ToString, V: Into<Value>> From<(K, V)> for Slot {
    fn from(pair: (K, V)) -> Self {
        Slot::from_pair(pair)
    }
}

/// Creates a [Collection] from a list of slots.
///
/// Each entry is either `key => value` (key must be a literal) or a bare
/// value. Keys are normalized with [ToString].
///
/// # Panics
///
/// Panics if two entries share the same key. Use [Collection::new] to handle
/// duplicate keys as an error.
///
/// # Examples
///
/// ```rust
/// use named_collection::collection;
///
/// let empty = collection![];
/// assert!(empty.is_empty());
///
/// let mixed = collection!["a" => 1, 2, "c" => collection!["d" => 3]];
/// assert_eq!(mixed.len(), 3);
/// assert_eq!(mixed.to_string(), "{a: 1, 2, c: {d: 3}}");
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::collection::Collection::empty()
    };

    ($($body:tt)+) => {
        {
            let mut slots: ::std::vec::Vec<$crate::collection::Slot> = ::std::vec::Vec::new();
            $crate::collection_slots!(slots; $($body)+);
            $crate::collection::Collection::new(slots)
                .expect("collection! does not accept duplicate keys")
        }
    };
}

/// Helper macro that pushes the entries of [collection!] into a slot vector.
#[doc(hidden)]
#[macro_export]
macro_rules! collection_slots {
    ($slots:ident;) => {};

    ($slots:ident; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $slots.push($crate::collection::Slot::keyed($key, $value));
        $crate::collection_slots!($slots; $($($rest)*)?);
    };

    ($slots:ident; $value:expr $(, $($rest:tt)*)?) => {
        $slots.push($crate::collection::Slot::bare($value));
        $crate::collection_slots!($slots; $($($rest)*)?);
    };
}
