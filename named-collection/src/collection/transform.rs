use crate::collection::Collection;
use crate::common::Value;
use crate::errors::{fail, CollectionResult, ErrorKind};
use indexmap::IndexMap;
use std::fmt::{Debug, Formatter};

type ValueFn = Box<dyn Fn(Value) -> Value>;

/// Describes a functional transformation of a [Collection].
///
/// A transform runs in exactly one of two modes:
///
/// * **pipeline** - every leaf value is passed through the functions added
///   with [Transform::pipe], in order
/// * **selective** - a leaf value is transformed by the function registered
///   for its key with [Transform::select]; values without a selector are kept
///
/// Nested collections are traversed with the same transform unless the
/// transform is raw, in which case they are handed to the functions like any
/// other value.
///
/// ```rust
/// use named_collection::collection;
/// use named_collection::collection::Transform;
/// use named_collection::common::Value;
///
/// let c = collection!["a" => 1, "b" => collection!["a" => 2]];
/// let doubled = c
///     .apply(&Transform::new().select("a", |v| Value::from(v.as_integer().unwrap_or(0) as i64 * 2)))
///     .unwrap();
/// assert_eq!(doubled.to_string(), "{a: 2, b: {a: 4}}");
/// ```
#[derive(Default)]
pub struct Transform {
    pipeline: Vec<ValueFn>,
    selectors: IndexMap<String, ValueFn>,
    raw: bool,
}

impl Transform {
    pub fn new() -> Self {
        Transform::default()
    }

    /// Appends a function to the positional pipeline.
    pub fn pipe<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        self.pipeline.push(Box::new(f));
        self
    }

    /// Registers the function applied to values stored under `key`.
    ///
    /// Registering the same key twice keeps the last function.
    pub fn select<K, F>(mut self, key: K, f: F) -> Self
    where
        K: ToString,
        F: Fn(Value) -> Value + 'static,
    {
        self.selectors.insert(key.to_string(), Box::new(f));
        self
    }

    /// Sets whether nested collections are passed to the functions as values
    /// instead of being traversed.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    fn validate(&self) -> CollectionResult<()> {
        if self.pipeline.is_empty() == self.selectors.is_empty() {
            return fail(
                "Either a pipeline or key selectors must be configured, but not both".to_string(),
                ErrorKind::MalformedArguments,
            );
        }
        Ok(())
    }

    fn run_pipeline(&self, value: Value) -> Value {
        self.pipeline.iter().fold(value, |value, f| f(value))
    }
}

impl Debug for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("pipeline", &self.pipeline.len())
            .field("selectors", &self.selectors.keys().collect::<Vec<_>>())
            .field("raw", &self.raw)
            .finish()
    }
}

impl Collection {
    /// Returns a new collection with `transform` applied to its values.
    ///
    /// Fails with [ErrorKind::MalformedArguments] unless exactly one of the
    /// pipeline or selector modes is configured. The receiver is never
    /// modified.
    pub fn apply(&self, transform: &Transform) -> CollectionResult<Collection> {
        transform.validate()?;
        log::debug!(
            "Applying {:?} to collection of length {}",
            transform,
            self.len()
        );
        Ok(self.apply_with(transform, transform.raw))
    }

    /// Like [Collection::apply], but nested collections are never traversed.
    pub fn raw_apply(&self, transform: &Transform) -> CollectionResult<Collection> {
        transform.validate()?;
        log::debug!(
            "Applying raw {:?} to collection of length {}",
            transform,
            self.len()
        );
        Ok(self.apply_with(transform, true))
    }

    fn apply_with(&self, transform: &Transform, raw: bool) -> Collection {
        let values = self.slots.iter().map(|slot| match &slot.value {
            Value::Collection(nested) if !raw => Value::Collection(nested.apply_with(transform, raw)),
            value if !transform.pipeline.is_empty() => transform.run_pipeline(value.clone()),
            value => match slot.key().and_then(|key| transform.selectors.get(key)) {
                Some(f) => f(value.clone()),
                None => value.clone(),
            },
        });
        self.with_values(values.collect::<Vec<_>>())
    }
}
