use crate::collection::{Collection, Slot};
use crate::common::Value;
use crate::errors::{fail, CollectionResult, ErrorKind};

impl Collection {
    /// Returns a copy of this collection with every collection of `others`
    /// merged into it, left to right.
    ///
    /// For each slot of an other collection at position `i`:
    ///
    /// * without a key, the slot overwrites position `i` of the target, which
    ///   must already exist
    /// * with a key absent from the target, the slot is appended
    /// * with a key present in the target, the value overwrites the target's
    ///
    /// When both the incoming and the existing value are collections they are
    /// merged recursively instead of overwritten. Merging never removes slots,
    /// and the receiver is left untouched even when the merge fails.
    ///
    /// ```rust
    /// use named_collection::collection;
    ///
    /// let base = collection!["x" => 1, "nested" => collection!["a" => 1]];
    /// let merged = base
    ///     .update([&collection!["x" => 2], &collection!["nested" => collection!["b" => 2]]])
    ///     .unwrap();
    /// assert_eq!(merged.to_string(), "{x: 2, nested: {a: 1, b: 2}}");
    /// assert_eq!(base.to_string(), "{x: 1, nested: {a: 1}}");
    /// ```
    pub fn update<'a, I>(&self, others: I) -> CollectionResult<Collection>
    where
        I: IntoIterator<Item = &'a Collection>,
    {
        let mut merged = self.copy();
        for other in others {
            merged.merge_in_place(other)?;
        }
        Ok(merged)
    }

    /// Returns a copy of this collection with `other` merged into it.
    pub fn update_with(&self, other: &Collection) -> CollectionResult<Collection> {
        self.update([other])
    }

    fn merge_in_place(&mut self, other: &Collection) -> CollectionResult<()> {
        log::debug!(
            "Merging {} slot(s) into collection of length {}",
            other.len(),
            self.len()
        );

        for (position, slot) in other.slots.iter().enumerate() {
            match &slot.key {
                None => {
                    if position >= self.len() {
                        return fail(
                            format!(
                                "Index out of bounds: {} (merging an unkeyed slot into a collection of length {})",
                                position,
                                self.len()
                            ),
                            ErrorKind::OutOfBounds,
                        );
                    }
                    merge_value(&mut self.slots[position], &slot.value)?;
                }
                Some(key) => match self.position_of(key) {
                    Some(existing) => merge_value(&mut self.slots[existing], &slot.value)?,
                    None => self.set_key(key.clone(), copy_value(&slot.value)),
                },
            }
        }
        Ok(())
    }
}

fn merge_value(target: &mut Slot, incoming: &Value) -> CollectionResult<()> {
    match (&mut target.value, incoming) {
        (Value::Collection(existing), Value::Collection(nested)) => existing.merge_in_place(nested),
        (existing, _) => {
            *existing = copy_value(incoming);
            Ok(())
        }
    }
}

// incoming collections must not share structure with their source
fn copy_value(value: &Value) -> Value {
    match value {
        Value::Collection(nested) => Value::Collection(nested.copy()),
        leaf => leaf.clone(),
    }
}
