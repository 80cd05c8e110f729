//! Native type to field kind classification

use crate::schema::NativeType;
use crate::types::FieldKind;
use std::collections::HashMap;

/// Static mapping of native scalar types to [`FieldKind`]s.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::{FieldKind, KindMap, NativeType};
///
/// let kinds = KindMap::builtin();
/// assert_eq!(kinds.classify(&NativeType::DECIMAL), Some(FieldKind::Decimal));
/// assert_eq!(kinds.classify(&NativeType::new("Unknown")), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KindMap {
	mappings: HashMap<NativeType, FieldKind>,
}

impl KindMap {
	/// Creates an empty map
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the map of built-in scalar types
	pub fn builtin() -> Self {
		[
			(NativeType::BOOL, FieldKind::Boolean),
			(NativeType::STR, FieldKind::String),
			(NativeType::INT, FieldKind::Int),
			(NativeType::FLOAT, FieldKind::Float),
			// Date/Time types
			(NativeType::DATE, FieldKind::Date),
			(NativeType::TIME, FieldKind::Time),
			(NativeType::DATETIME, FieldKind::Datetime),
			(NativeType::TIMEDELTA, FieldKind::Timedelta),
			(NativeType::DECIMAL, FieldKind::Decimal),
			(NativeType::UUID, FieldKind::Uuid),
			(NativeType::ID, FieldKind::Id),
			(NativeType::GLOBAL_ID, FieldKind::Id),
			(NativeType::UPLOAD, FieldKind::File),
		]
		.into_iter()
		.collect()
	}

	/// Registers a mapping, replacing any previous kind for the native
	pub fn register(&mut self, native: NativeType, kind: FieldKind) {
		self.mappings.insert(native, kind);
	}

	/// Returns the kind mapped to a native type, if any
	pub fn classify(&self, native: &NativeType) -> Option<FieldKind> {
		self.mappings.get(native).copied()
	}

	pub fn contains(&self, native: &NativeType) -> bool {
		self.mappings.contains_key(native)
	}

	pub fn len(&self) -> usize {
		self.mappings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mappings.is_empty()
	}
}

impl Extend<(NativeType, FieldKind)> for KindMap {
	fn extend<I: IntoIterator<Item = (NativeType, FieldKind)>>(&mut self, iter: I) {
		self.mappings.extend(iter);
	}
}

impl FromIterator<(NativeType, FieldKind)> for KindMap {
	fn from_iter<I: IntoIterator<Item = (NativeType, FieldKind)>>(iter: I) -> Self {
		Self {
			mappings: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(NativeType::BOOL, FieldKind::Boolean)]
	#[case(NativeType::STR, FieldKind::String)]
	#[case(NativeType::INT, FieldKind::Int)]
	#[case(NativeType::FLOAT, FieldKind::Float)]
	#[case(NativeType::DATE, FieldKind::Date)]
	#[case(NativeType::TIME, FieldKind::Time)]
	#[case(NativeType::DATETIME, FieldKind::Datetime)]
	#[case(NativeType::TIMEDELTA, FieldKind::Timedelta)]
	#[case(NativeType::DECIMAL, FieldKind::Decimal)]
	#[case(NativeType::UUID, FieldKind::Uuid)]
	#[case(NativeType::ID, FieldKind::Id)]
	#[case(NativeType::GLOBAL_ID, FieldKind::Id)]
	#[case(NativeType::UPLOAD, FieldKind::File)]
	fn test_builtin_mappings(#[case] native: NativeType, #[case] expected: FieldKind) {
		assert_eq!(KindMap::builtin().classify(&native), Some(expected));
	}

	#[rstest]
	fn test_unmapped_is_none() {
		let kinds = KindMap::builtin();
		assert_eq!(kinds.classify(&NativeType::JSON), None);
		assert_eq!(kinds.classify(&NativeType::new("Point")), None);
	}

	#[rstest]
	fn test_extend_overrides() {
		// Arrange
		let mut kinds = KindMap::builtin();

		// Act
		kinds.extend([
			(NativeType::new("ImageFieldFile"), FieldKind::Image),
			(NativeType::STR, FieldKind::Multiline),
		]);

		// Assert
		assert_eq!(
			kinds.classify(&NativeType::new("ImageFieldFile")),
			Some(FieldKind::Image)
		);
		assert_eq!(kinds.classify(&NativeType::STR), Some(FieldKind::Multiline));
	}

	#[rstest]
	fn test_collect_keeps_last_mapping() {
		let kinds: KindMap = [
			(NativeType::new("Money"), FieldKind::Decimal),
			(NativeType::new("Money"), FieldKind::Currency),
		]
		.into_iter()
		.collect();

		assert_eq!(kinds.len(), 1);
		assert_eq!(
			kinds.classify(&NativeType::new("Money")),
			Some(FieldKind::Currency)
		);
	}

	#[rstest]
	fn test_new_is_empty() {
		let mut kinds = KindMap::new();
		assert!(kinds.is_empty());
		kinds.register(NativeType::JSON, FieldKind::Json);
		assert_eq!(kinds.len(), 1);
		assert!(kinds.contains(&NativeType::JSON));
	}
}
