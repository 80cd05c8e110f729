//! Deep merge of option mappings
//!
//! Options accumulate from the kind map, from integrations and from author
//! annotations, always in that order. Every step folds one partial record
//! into the running one with [`Merge::merge`], so the final option set only
//! depends on the order of the producers.

use serde_json::Value;
use serde_json::map::Entry;

/// Overlay merge of two partial records.
///
/// Keys present on one side only pass through unchanged, nested mappings are
/// merged recursively and otherwise the overlay value wins.
pub trait Merge: Sized {
	fn merge(self, overlay: Self) -> Self;
}

impl<T: Merge> Merge for Option<T> {
	fn merge(self, overlay: Self) -> Self {
		match (self, overlay) {
			(Some(base), Some(overlay)) => Some(base.merge(overlay)),
			(base, None) => base,
			(None, overlay) => overlay,
		}
	}
}

impl Merge for Value {
	fn merge(self, overlay: Self) -> Self {
		merge_json(self, overlay)
	}
}

/// Deep-merges two JSON values.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::merge_json;
/// use serde_json::json;
///
/// let merged = merge_json(
/// 	json!({"a": {"b": 1, "c": 2}, "d": 3}),
/// 	json!({"a": {"c": 20}, "e": 5}),
/// );
/// assert_eq!(merged, json!({"a": {"b": 1, "c": 20}, "d": 3, "e": 5}));
/// ```
pub fn merge_json(base: Value, overlay: Value) -> Value {
	match (base, overlay) {
		(Value::Object(mut base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match base.entry(key) {
					Entry::Occupied(mut slot) => {
						let previous = std::mem::take(slot.get_mut());
						*slot.get_mut() = merge_json(previous, value);
					}
					Entry::Vacant(slot) => {
						slot.insert(value);
					}
				}
			}
			Value::Object(base)
		}
		(_, overlay) => overlay,
	}
}
