use crate::collection::{Index, Query, Slot};
use crate::common::Value;
use crate::errors::{fail, CollectionResult, ErrorKind};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::{Debug, Display};

/// An ordered list of values where any value may carry a unique string key.
///
/// A collection behaves like a list and a dictionary at once. Every slot has a
/// position; slots created with a key can also be found by that key. Values
/// can be collections themselves, which turns the container into a tree that
/// can be addressed level by level with a [Query::Path].
///
/// Keys are unique among keyed slots. Any number of slots may have no key.
///
/// ```rust
/// use named_collection::{collection, path};
/// use named_collection::common::Value;
///
/// let mut config = collection![
///     "name" => "demo",
///     "servers" => collection!["primary" => "10.0.0.1", "backup" => "10.0.0.2"],
///     42,
/// ];
///
/// assert_eq!(config.get("name").unwrap(), Value::from("demo"));
/// assert_eq!(config.get(2).unwrap(), Value::from(42));
/// assert_eq!(config.attr("name").unwrap(), &Value::from("demo"));
///
/// config.set("name", "prod").unwrap();
/// config.append(7);
/// assert_eq!(config.len(), 4);
///
/// let primary = config.get(path!["servers", "primary"]).unwrap();
/// assert_eq!(primary.to_string(), "{servers: {primary: \"10.0.0.1\"}}");
/// ```
#[derive(Clone, Default)]
pub struct Collection {
    pub(super) slots: Vec<Slot>,
    pub(super) key_index: HashMap<String, usize>,
}

impl Collection {
    /// Creates a collection from its slots, in order.
    ///
    /// Fails with [ErrorKind::DuplicateKey] if two slots carry the same key.
    pub fn new<I, S>(slots: I) -> CollectionResult<Collection>
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        let mut collection = Collection::empty();
        for slot in slots {
            let slot: Slot = slot.into();
            if let Some(key) = &slot.key {
                if collection.key_index.contains_key(key) {
                    return fail(
                        format!("Duplicate keys not allowed: {}", key),
                        ErrorKind::DuplicateKey,
                    );
                }
                collection.key_index.insert(key.clone(), collection.slots.len());
            }
            collection.slots.push(slot);
        }
        Ok(collection)
    }

    /// Creates an empty collection.
    pub fn empty() -> Collection {
        Collection {
            slots: Vec::new(),
            key_index: HashMap::new(),
        }
    }

    /// Creates a collection from alternating keys and values.
    ///
    /// Keys are normalized to strings; a [Value::Null] key produces a slot
    /// without a key. Strings and chars are used as they are, floats keep
    /// their decimal point (`1.0` becomes `"1.0"`, distinct from the integer
    /// key `"1"`) and every other value uses its display form, so
    /// `Value::Bool(true)` becomes `"true"`.
    ///
    /// ```rust
    /// use named_collection::collection::Collection;
    /// use named_collection::common::Value;
    ///
    /// let c = Collection::from_interleaved(vec![Value::from("a"), Value::from(1), Value::Null, Value::from(2)]).unwrap();
    /// assert_eq!(c.to_string(), "{a: 1, 2}");
    /// ```
    pub fn from_interleaved<I, V>(values: I) -> CollectionResult<Collection>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() % 2 != 0 {
            return fail(
                format!("Even number of arguments is required, got {}", values.len()),
                ErrorKind::MalformedArguments,
            );
        }

        let slots = values
            .into_iter()
            .tuples()
            .map(|(key, value)| Slot::new(normalize_key(key), value));
        Collection::new(slots)
    }

    /// Creates a collection from the entries of one or more mappings.
    ///
    /// Entries are taken in mapping order, then in each mapping's iteration
    /// order. A key that appears twice, in the same or in different mappings,
    /// fails with [ErrorKind::DuplicateKey].
    pub fn from_mappings<M, E, K, V>(mappings: M) -> CollectionResult<Collection>
    where
        M: IntoIterator<Item = E>,
        E: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: Into<Value>,
    {
        Collection::new(mappings.into_iter().flatten().map(Slot::from))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slots of this collection in order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_index.contains_key(key)
    }

    /// Returns the position of the slot carrying `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.key_index.get(key).copied()
    }

    /// Borrows the value stored under `key` without cloning it.
    pub fn get_ref(&self, key: &str) -> Option<&Value> {
        self.position_of(key).map(|position| &self.slots[position].value)
    }

    /// Retrieves values by index expression.
    ///
    /// A simple index matching exactly one slot returns that slot's value.
    /// Matching zero or several slots returns a new collection holding the
    /// matched (key, value) pairs. A path always returns a collection, even
    /// when a single slot matched; levels that reach a non-collection value
    /// are dropped silently.
    ///
    /// ```rust
    /// use named_collection::{collection, path};
    /// use named_collection::common::Value;
    ///
    /// let c = collection!["a" => 1, "b" => 2, 3];
    /// assert_eq!(c.get("a").unwrap(), Value::from(1));
    /// assert_eq!(c.get(["a", "b"]).unwrap().to_string(), "{a: 1, b: 2}");
    /// assert_eq!(c.get("missing").unwrap().to_string(), "{}");
    /// assert_eq!(c.get(path!["a"]).unwrap().to_string(), "{a: 1}");
    /// ```
    pub fn get<Q: Into<Query>>(&self, query: Q) -> CollectionResult<Value> {
        match query.into() {
            Query::Simple(index) => {
                let resolved = self.resolve_indices(&index)?;
                if resolved.len() == 1 {
                    Ok(resolved[0].value.clone())
                } else {
                    let slots = resolved
                        .iter()
                        .map(|item| Slot::new(item.key.map(str::to_string), item.value.clone()));
                    Collection::new(slots).map(Value::Collection)
                }
            }
            Query::Path(levels) => self.get_path(&levels).map(Value::Collection),
        }
    }

    fn get_path(&self, levels: &[Index]) -> CollectionResult<Collection> {
        let Some((head, tail)) = levels.split_first() else {
            return fail(
                "Path index requires at least one level".to_string(),
                ErrorKind::MalformedArguments,
            );
        };

        let mut slots = Vec::new();
        for item in self.resolve_indices(head)? {
            let key = item.key.map(str::to_string);
            if tail.is_empty() {
                slots.push(Slot::new(key, item.value.clone()));
            } else if let Value::Collection(nested) = item.value {
                slots.push(Slot::new(key, Value::Collection(nested.get_path(tail)?)));
            }
        }
        Collection::new(slots)
    }

    /// Attribute-style access: the value of the single slot keyed `name`.
    pub fn attr(&self, name: &str) -> CollectionResult<&Value> {
        let resolved = self.resolve_indices(&Index::Key(name.to_string()))?;
        match resolved.as_slice() {
            [] => fail(
                format!("No item with key {}", name),
                ErrorKind::AttributeNotFound,
            ),
            [item] => Ok(item.value),
            _ => fail(
                format!("Attribute {} resolved to {} items", name, resolved.len()),
                ErrorKind::InvariantViolation,
            ),
        }
    }

    /// Assigns a value by key or by position.
    ///
    /// A key that exists is overwritten in place; a new key is appended at the
    /// end. A position must denote an existing slot: assignment never grows
    /// the collection by position. Paths, lists and ranges are rejected, and
    /// a failed assignment leaves the collection unchanged.
    pub fn set<Q, V>(&mut self, query: Q, value: V) -> CollectionResult<()>
    where
        Q: Into<Query>,
        V: Into<Value>,
    {
        match query.into() {
            Query::Simple(Index::Key(key)) => {
                self.set_key(key, value.into());
                Ok(())
            }
            Query::Simple(Index::Position(position)) => {
                let position = self.normalize_position(position)?;
                self.slots[position].value = value.into();
                Ok(())
            }
            Query::Simple(index) => fail(
                format!("Unsupported index for item setting: {}", index.kind_name()),
                ErrorKind::UnsupportedIndexType,
            ),
            Query::Path(_) => fail(
                "Multi-level indexing is not supported for setting items".to_string(),
                ErrorKind::UnsupportedOperation,
            ),
        }
    }

    /// Attribute-style assignment, identical to assigning by key.
    pub fn set_attr<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.set_key(name.to_string(), value.into());
    }

    pub(super) fn set_key(&mut self, key: String, value: Value) {
        match self.key_index.get(&key) {
            Some(&position) => self.slots[position].value = value,
            None => {
                self.key_index.insert(key.clone(), self.slots.len());
                self.slots.push(Slot::new(Some(key), value));
            }
        }
    }

    /// Appends a value without a key.
    pub fn append<V: Into<Value>>(&mut self, value: V) {
        self.slots.push(Slot::bare(value));
    }

    /// Copies the collection skeleton: nested collections are copied
    /// recursively, leaf values are cloned as they are.
    pub fn copy(&self) -> Collection {
        let slots = self
            .slots
            .iter()
            .map(|slot| match &slot.value {
                Value::Collection(nested) => slot.with_value(Value::Collection(nested.copy())),
                leaf => slot.with_value(leaf.clone()),
            })
            .collect();
        Collection {
            slots,
            key_index: self.key_index.clone(),
        }
    }

    /// Returns every value in order, nested collections converted to
    /// [Value::Array].
    pub fn to_sequence(&self) -> Vec<Value> {
        self.slots
            .iter()
            .map(|slot| match &slot.value {
                Value::Collection(nested) => Value::Array(nested.to_sequence()),
                leaf => leaf.clone(),
            })
            .collect()
    }

    /// Returns the keyed values in order, nested collections converted to
    /// [Value::Map]. Slots without a key are skipped.
    pub fn to_mapping(&self) -> IndexMap<String, Value> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let key = slot.key.clone()?;
                let value = match &slot.value {
                    Value::Collection(nested) => Value::Map(nested.to_mapping()),
                    leaf => leaf.clone(),
                };
                Some((key, value))
            })
            .collect()
    }

    /// Iterates over the values in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Iterates over `(key, value)` pairs in slot order, including slots
    /// without a key.
    pub fn items(&self) -> Items<'_> {
        Items {
            inner: self.slots.iter(),
        }
    }

    /// Iterates over the keys in slot order; `None` for slots without a key.
    pub fn keys(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.slots.iter().map(Slot::key)
    }

    /// Builds a collection with the same keys at the same positions.
    pub(super) fn with_values<I>(&self, values: I) -> Collection
    where
        I: IntoIterator<Item = Value>,
    {
        let slots = self
            .slots
            .iter()
            .zip(values)
            .map(|(slot, value)| slot.with_value(value))
            .collect();
        Collection {
            slots,
            key_index: self.key_index.clone(),
        }
    }

    pub(crate) fn to_display_string(&self) -> String {
        let body = self
            .slots
            .iter()
            .map(|slot| match &slot.key {
                Some(key) => format!("{}: {}", key, slot.value.to_display_string()),
                None => slot.value.to_display_string(),
            })
            .join(", ");
        format!("{{{}}}", body)
    }

    pub(crate) fn to_debug_string(&self) -> String {
        format!("{{{}}}", self.slots.iter().map(|slot| format!("{:?}", slot)).join(", "))
    }
}

fn normalize_key(key: Value) -> Option<String> {
    match key {
        Value::Null => None,
        Value::String(key) => Some(key),
        Value::Char(key) => Some(key.to_string()),
        Value::F64(key) => Some(format!("{:?}", key)),
        other => Some(other.to_display_string()),
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string())
    }
}

/// Iterator over the values of a [Collection].
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Slot::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Slot::value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over the `(key, value)` pairs of a [Collection].
pub struct Items<'a> {
    inner: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Items<'a> {
    type Item = (Option<&'a str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| (slot.key(), slot.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Items<'_> {}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the values of a [Collection].
pub struct IntoIter {
    inner: std::vec::IntoIter<Slot>,
}

impl Iterator for IntoIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| slot.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.slots.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collection, path};
    use std::collections::BTreeMap;

    fn set_up() -> Collection {
        collection![
            "a" => 1,
            "b" => collection!["c" => 2, "d" => collection!["e" => 3], 4],
            5,
            "f" => "six",
        ]
    }

    #[test]
    fn test_new_builds_key_index() {
        let c = set_up();
        assert_eq!(c.len(), 4);
        assert_eq!(c.position_of("a"), Some(0));
        assert_eq!(c.position_of("b"), Some(1));
        assert_eq!(c.position_of("f"), Some(3));
        assert_eq!(c.key_index.len(), 3);
    }

    #[test]
    fn test_new_rejects_duplicate_keys() {
        let err = Collection::new(vec![Slot::keyed("a", 1), Slot::bare(2), Slot::keyed("a", 3)]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_new_rejects_keys_equal_after_normalization() {
        let err = Collection::new(vec![Slot::keyed(1, "x"), Slot::keyed("1", "y")]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_new_allows_many_bare_slots() {
        let c = Collection::new(vec![Value::I32(1), Value::I32(1), Value::I32(1)]).unwrap();
        assert_eq!(c.len(), 3);
        assert!(c.key_index.is_empty());
    }

    #[test]
    fn test_from_interleaved() {
        let c = Collection::from_interleaved(vec![
            Value::from("a"),
            Value::I32(1),
            Value::I32(7),
            Value::I32(2),
            Value::Null,
            Value::I32(3),
        ])
        .unwrap();
        assert_eq!(c.keys().collect::<Vec<_>>(), vec![Some("a"), Some("7"), None]);
        assert_eq!(c.to_sequence(), vec![Value::I32(1), Value::I32(2), Value::I32(3)]);
    }

    #[test]
    fn test_from_interleaved_normalizes_scalar_keys() {
        let c = Collection::from_interleaved(vec![
            Value::F64(1.0),
            Value::from("float"),
            Value::I32(1),
            Value::from("int"),
            Value::Bool(true),
            Value::from("bool"),
            Value::F64(2.5),
            Value::from("fraction"),
        ])
        .unwrap();
        assert_eq!(
            c.keys().collect::<Vec<_>>(),
            vec![Some("1.0"), Some("1"), Some("true"), Some("2.5")]
        );
    }

    #[test]
    fn test_from_interleaved_rejects_odd_length() {
        let err = Collection::from_interleaved(vec!["a", "b", "c"]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedArguments);
    }

    #[test]
    fn test_from_interleaved_rejects_duplicates() {
        let err = Collection::from_interleaved(vec!["a", "1", "a", "2"]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_from_mappings_concatenates() {
        let mut first = IndexMap::new();
        first.insert("x".to_string(), Value::I32(1));
        first.insert("y".to_string(), Value::I32(2));
        let mut second = BTreeMap::new();
        second.insert("z", 3);

        let c = Collection::from_mappings(vec![first.into_iter().collect::<Vec<_>>()]).unwrap();
        assert_eq!(c.keys().collect::<Vec<_>>(), vec![Some("x"), Some("y")]);

        let c = Collection::from_mappings([second.clone(), second.clone()]);
        assert_eq!(c.unwrap_err().kind(), &ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_get_single_key_unwraps() {
        let c = set_up();
        assert_eq!(c.get("a").unwrap(), Value::I32(1));
        assert_eq!(c.get(2).unwrap(), Value::I32(5));
        assert_eq!(c.get(-1).unwrap(), Value::from("six"));
    }

    #[test]
    fn test_get_missing_key_wraps_empty() {
        let c = set_up();
        let result = c.get("zzz").unwrap();
        assert_eq!(result, Value::Collection(Collection::empty()));
    }

    #[test]
    fn test_get_many_wraps() {
        let c = set_up();
        let result = c.get(["a", "f"]).unwrap().into_collection().unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result, collection!["a" => 1, "f" => "six"]);
    }

    #[test]
    fn test_get_many_with_one_match_unwraps() {
        let c = set_up();
        assert_eq!(c.get(["a", "missing"]).unwrap(), Value::I32(1));
    }

    #[test]
    fn test_get_range_keeps_keys_and_bare_slots() {
        let c = set_up();
        let result = c.get(1..3).unwrap().into_collection().unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec![Some("b"), None]);
    }

    #[test]
    fn test_get_repeated_keyed_slot_is_duplicate() {
        let c = set_up();
        let err = c.get(["a", "a"]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_get_repeated_bare_slot_is_allowed() {
        let c = set_up();
        let result = c.get(vec![2, 2]).unwrap().into_collection().unwrap();
        assert_eq!(result.to_sequence(), vec![Value::I32(5), Value::I32(5)]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let c = set_up();
        assert_eq!(c.get(4).unwrap_err().kind(), &ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_get_path_wraps_single_match() {
        let c = set_up();
        let result = c.get(path!["b", "c"]).unwrap();
        assert_eq!(result, Value::from(collection!["b" => collection!["c" => 2]]));
    }

    #[test]
    fn test_get_path_single_level() {
        let c = set_up();
        assert_eq!(c.get(("a",)).unwrap(), Value::from(collection!["a" => 1]));
    }

    #[test]
    fn test_get_path_deep() {
        let c = set_up();
        let result = c.get(("b", "d", "e")).unwrap();
        assert_eq!(result.to_string(), "{b: {d: {e: 3}}}");
    }

    #[test]
    fn test_get_path_prunes_leaves() {
        let c = set_up();
        // "a" and 5 are leaves, only "b" can be traversed
        let result = c.get(path![.., "c"]).unwrap();
        assert_eq!(result.to_string(), "{b: {c: 2}}");
    }

    #[test]
    fn test_get_path_with_position_inside() {
        let c = set_up();
        let result = c.get(path!["b", -1]).unwrap();
        assert_eq!(result.to_string(), "{b: {4}}");
    }

    #[test]
    fn test_get_empty_path_fails() {
        let c = set_up();
        let err = c.get(Query::Path(vec![])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedArguments);
    }

    #[test]
    fn test_get_ref_and_contains_key() {
        let c = set_up();
        assert_eq!(c.get_ref("f"), Some(&Value::from("six")));
        assert_eq!(c.get_ref("nope"), None);
        assert!(c.contains_key("b"));
        assert!(!c.contains_key("nope"));
    }

    #[test]
    fn test_attr() {
        let c = set_up();
        assert_eq!(c.attr("a").unwrap(), &Value::I32(1));
        let err = c.attr("nope").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::AttributeNotFound);
    }

    #[test]
    fn test_set_existing_key_keeps_position() {
        let mut c = set_up();
        c.set("a", 10).unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.get(0).unwrap(), Value::I32(10));
    }

    #[test]
    fn test_set_new_key_appends() {
        let mut c = set_up();
        c.set("g", 7).unwrap();
        assert_eq!(c.len(), 5);
        assert_eq!(c.position_of("g"), Some(4));
        assert_eq!(c.get(-1).unwrap(), Value::I32(7));
    }

    #[test]
    fn test_set_position_overwrites() {
        let mut c = set_up();
        c.set(2, "five").unwrap();
        c.set(-1, "last").unwrap();
        assert_eq!(c.get(2).unwrap(), Value::from("five"));
        assert_eq!(c.get("f").unwrap(), Value::from("last"));
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_set_position_never_grows() {
        let mut c = set_up();
        let err = c.set(4, 1).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfBounds);
        assert_eq!(c, set_up());
    }

    #[test]
    fn test_set_path_is_unsupported() {
        let mut c = set_up();
        let err = c.set(("b", "c"), 1).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedOperation);
        assert_eq!(c, set_up());
    }

    #[test]
    fn test_set_many_and_range_are_unsupported() {
        let mut c = set_up();
        assert_eq!(c.set(["a", "f"], 1).unwrap_err().kind(), &ErrorKind::UnsupportedIndexType);
        assert_eq!(c.set(0..2, 1).unwrap_err().kind(), &ErrorKind::UnsupportedIndexType);
    }

    #[test]
    fn test_set_attr() {
        let mut c = set_up();
        c.set_attr("a", 2);
        c.set_attr("new", 3);
        assert_eq!(c.attr("a").unwrap(), &Value::I32(2));
        assert_eq!(c.attr("new").unwrap(), &Value::I32(3));
        assert_eq!(c.position_of("new"), Some(4));
    }

    #[test]
    fn test_append_is_unkeyed() {
        let mut c = set_up();
        c.append(9);
        c.append(9);
        assert_eq!(c.len(), 6);
        assert_eq!(c.key_index.len(), 3);
        assert_eq!(c.get(-1).unwrap(), Value::I32(9));
    }

    #[test]
    fn test_copy_is_independent() {
        let c = set_up();
        let mut copy = c.copy();
        assert_eq!(copy, c);

        copy.set("a", 100).unwrap();
        if let Some(nested) = copy.slots[1].value.as_collection_mut() {
            nested.set("c", 200).unwrap();
        }
        assert_eq!(c.get("a").unwrap(), Value::I32(1));
        assert_eq!(c.get(path!["b", "c"]).unwrap().to_string(), "{b: {c: 2}}");
        assert_eq!(copy.get(path!["b", "c"]).unwrap().to_string(), "{b: {c: 200}}");
    }

    #[test]
    fn test_to_sequence() {
        let c = set_up();
        assert_eq!(
            c.to_sequence(),
            vec![
                Value::I32(1),
                Value::Array(vec![Value::I32(2), Value::Array(vec![Value::I32(3)]), Value::I32(4)]),
                Value::I32(5),
                Value::from("six"),
            ]
        );
    }

    #[test]
    fn test_to_mapping_skips_bare_slots() {
        let c = set_up();
        let mapping = c.to_mapping();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["a", "b", "f"]);

        let mut nested = IndexMap::new();
        let mut deepest = IndexMap::new();
        deepest.insert("e".to_string(), Value::I32(3));
        nested.insert("c".to_string(), Value::I32(2));
        nested.insert("d".to_string(), Value::Map(deepest));
        assert_eq!(mapping["b"], Value::Map(nested));
    }

    #[test]
    fn test_iter_is_restartable() {
        let c = collection![1, "k" => 2, 3];
        let first: Vec<_> = c.iter().cloned().collect();
        let second: Vec<_> = (&c).into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![Value::I32(1), Value::I32(2), Value::I32(3)]);
        assert_eq!(c.iter().len(), 3);
        assert_eq!(c.iter().rev().next(), Some(&Value::I32(3)));
    }

    #[test]
    fn test_items_include_bare_keys() {
        let c = collection![1, "k" => 2];
        let items: Vec<_> = c.items().collect();
        assert_eq!(items, vec![(None, &Value::I32(1)), (Some("k"), &Value::I32(2))]);
    }

    #[test]
    fn test_into_iter_owned() {
        let c = collection!["a" => 1, 2];
        let values: Vec<Value> = c.into_iter().collect();
        assert_eq!(values, vec![Value::I32(1), Value::I32(2)]);
    }

    #[test]
    fn test_display() {
        let c = collection!["a" => 1, 2, "c" => collection!["d" => 3]];
        assert_eq!(c.to_string(), "{a: 1, 2, c: {d: 3}}");
        assert_eq!(Collection::empty().to_string(), "{}");
    }

    #[test]
    fn test_debug() {
        let c = collection!["a" => 1, "s"];
        assert_eq!(format!("{:?}", c), "{a: i32(1), string(\"s\")}");
    }

    #[test]
    fn test_equality_considers_keys() {
        assert_eq!(collection!["a" => 1], collection!["a" => 1]);
        assert_ne!(collection!["a" => 1], collection!["b" => 1]);
        assert_ne!(collection!["a" => 1], collection![1]);
    }
}
