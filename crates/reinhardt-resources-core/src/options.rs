//! Partial field options
//!
//! [`FieldOptions`] is the record every option producer returns: the kind map,
//! each integration and the author annotations. Unset values are `None` and
//! never override a value set by an earlier producer.

use crate::merge::Merge;
use crate::schema::Annotation;
use crate::types::{
	BaseFieldValidation, DecimalFieldValidation, FieldChoice, FieldKind, FieldObjectKind,
	FieldValidation, IntFieldValidation, StringFieldValidation,
};
use serde::{Deserialize, Serialize};

/// Concrete validation variant to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
	Base,
	String,
	Int,
	Decimal,
}

/// Partial validation rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variant: Option<ValidationKind>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_value: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_value: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_digits: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decimal_places: Option<u32>,
}

impl ValidationOptions {
	/// Validation carrying only the `required` flag
	pub fn required(required: bool) -> Self {
		Self {
			required: Some(required),
			..Default::default()
		}
	}

	/// String validation with optional length bounds
	pub fn string(min_length: Option<u32>, max_length: Option<u32>) -> Self {
		Self {
			variant: Some(ValidationKind::String),
			min_length,
			max_length,
			..Default::default()
		}
	}

	/// Integer validation with optional value bounds
	pub fn int(min_value: Option<i64>, max_value: Option<i64>) -> Self {
		Self {
			variant: Some(ValidationKind::Int),
			min_value,
			max_value,
			..Default::default()
		}
	}

	/// Decimal validation with optional precision and scale
	pub fn decimal(max_digits: Option<u32>, decimal_places: Option<u32>) -> Self {
		Self {
			variant: Some(ValidationKind::Decimal),
			max_digits,
			decimal_places,
			..Default::default()
		}
	}

	/// Sets the `required` flag
	pub fn with_required(mut self, required: bool) -> Self {
		self.required = Some(required);
		self
	}

	fn inferred_variant(&self) -> ValidationKind {
		if self.max_digits.is_some() || self.decimal_places.is_some() {
			ValidationKind::Decimal
		} else if self.min_value.is_some() || self.max_value.is_some() {
			ValidationKind::Int
		} else if self.min_length.is_some() || self.max_length.is_some() {
			ValidationKind::String
		} else {
			ValidationKind::Base
		}
	}

	/// Builds the concrete validation.
	///
	/// The explicit variant wins; otherwise it is inferred from which
	/// constraints are set. `required` defaults to `true`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_core::{FieldValidation, ValidationOptions};
	///
	/// let validation = ValidationOptions::string(Some(1), Some(10)).build();
	/// assert!(matches!(validation, FieldValidation::String(_)));
	/// assert!(validation.required());
	/// ```
	pub fn build(&self) -> FieldValidation {
		let required = self.required.unwrap_or(true);
		match self.variant.unwrap_or_else(|| self.inferred_variant()) {
			ValidationKind::Base => FieldValidation::Base(BaseFieldValidation { required }),
			ValidationKind::String => FieldValidation::String(StringFieldValidation {
				required,
				min_length: self.min_length,
				max_length: self.max_length,
			}),
			ValidationKind::Int => FieldValidation::Int(IntFieldValidation {
				required,
				min_value: self.min_value,
				max_value: self.max_value,
			}),
			ValidationKind::Decimal => FieldValidation::Decimal(DecimalFieldValidation {
				required,
				min_value: self.min_value,
				max_value: self.max_value,
				max_digits: self.max_digits,
				decimal_places: self.decimal_places,
			}),
		}
	}
}

impl Merge for ValidationOptions {
	fn merge(self, overlay: Self) -> Self {
		Self {
			variant: overlay.variant.or(self.variant),
			required: overlay.required.or(self.required),
			min_length: overlay.min_length.or(self.min_length),
			max_length: overlay.max_length.or(self.max_length),
			min_value: overlay.min_value.or(self.min_value),
			max_value: overlay.max_value.or(self.max_value),
			max_digits: overlay.max_digits.or(self.max_digits),
			decimal_places: overlay.decimal_places.or(self.decimal_places),
		}
	}
}

/// Partial options for a [`Field`](crate::Field) or a
/// [`FieldObject`](crate::FieldObject).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kind: Option<FieldKind>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub multiple: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub orderable: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filterable: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub resource: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub help_text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub choices: Option<Vec<FieldChoice>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub validation: Option<ValidationOptions>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub obj_kind: Option<FieldObjectKind>,
}

impl FieldOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn kind(mut self, kind: FieldKind) -> Self {
		self.kind = Some(kind);
		self
	}

	pub fn multiple(mut self, multiple: bool) -> Self {
		self.multiple = Some(multiple);
		self
	}

	pub fn orderable(mut self, orderable: bool) -> Self {
		self.orderable = Some(orderable);
		self
	}

	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = Some(filterable);
		self
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn resource(mut self, resource: impl Into<String>) -> Self {
		self.resource = Some(resource.into());
		self
	}

	pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn choices(mut self, choices: Vec<FieldChoice>) -> Self {
		self.choices = Some(choices);
		self
	}

	pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn validation(mut self, validation: ValidationOptions) -> Self {
		self.validation = Some(validation);
		self
	}

	pub fn obj_kind(mut self, obj_kind: FieldObjectKind) -> Self {
		self.obj_kind = Some(obj_kind);
		self
	}

	/// Returns true when no option is set
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

impl Merge for FieldOptions {
	fn merge(self, overlay: Self) -> Self {
		Self {
			kind: overlay.kind.or(self.kind),
			multiple: overlay.multiple.or(self.multiple),
			orderable: overlay.orderable.or(self.orderable),
			filterable: overlay.filterable.or(self.filterable),
			label: overlay.label.or(self.label),
			resource: overlay.resource.or(self.resource),
			help_text: overlay.help_text.or(self.help_text),
			choices: overlay.choices.or(self.choices),
			default_value: self.default_value.merge(overlay.default_value),
			validation: self.validation.merge(overlay.validation),
			obj_kind: overlay.obj_kind.or(self.obj_kind),
		}
	}
}

/// Author-supplied option overrides attached to a field declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldOptionsConfig {
	pub options: FieldOptions,
}

/// Wraps options into an annotation to attach to a field's declared type.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::{config, Annotation, FieldKind, FieldOptions};
///
/// let annotation = config(FieldOptions::new().kind(FieldKind::Password));
/// assert!(matches!(annotation, Annotation::Config(_)));
/// ```
pub fn config(options: FieldOptions) -> Annotation {
	Annotation::Config(FieldOptionsConfig { options })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(ValidationOptions::default(), "base")]
	#[case(ValidationOptions { max_length: Some(3), ..Default::default() }, "string")]
	#[case(ValidationOptions { min_value: Some(0), ..Default::default() }, "int")]
	#[case(ValidationOptions { max_digits: Some(5), min_value: Some(0), ..Default::default() }, "decimal")]
	#[case(ValidationOptions { variant: Some(ValidationKind::Int), ..Default::default() }, "int")]
	fn test_validation_variant(#[case] options: ValidationOptions, #[case] expected: &str) {
		let actual = match options.build() {
			FieldValidation::Base(_) => "base",
			FieldValidation::String(_) => "string",
			FieldValidation::Int(_) => "int",
			FieldValidation::Decimal(_) => "decimal",
		};
		assert_eq!(actual, expected);
	}

	#[rstest]
	fn test_required_defaults_to_true() {
		assert!(ValidationOptions::default().build().required());
		assert!(!ValidationOptions::required(false).build().required());
	}

	#[rstest]
	fn test_validation_merges_key_by_key() {
		// Arrange
		let base = ValidationOptions::required(false);
		let overlay = ValidationOptions::string(Some(1), Some(10));

		// Act
		let merged = base.merge(overlay).build();

		// Assert
		assert_eq!(
			merged,
			FieldValidation::String(StringFieldValidation {
				required: false,
				min_length: Some(1),
				max_length: Some(10),
			})
		);
	}

	#[rstest]
	fn test_field_options_overlay_wins() {
		// Arrange
		let kind_map = FieldOptions::new().kind(FieldKind::String);
		let integration = FieldOptions::new()
			.label("A")
			.validation(ValidationOptions::required(true));
		let author = FieldOptions::new()
			.label("C")
			.kind(FieldKind::Email)
			.validation(ValidationOptions::string(None, Some(255)));

		// Act
		let merged = kind_map.merge(integration).merge(author);

		// Assert
		assert_eq!(merged.kind, Some(FieldKind::Email));
		assert_eq!(merged.label.as_deref(), Some("C"));
		let validation = merged.validation.unwrap();
		assert_eq!(validation.required, Some(true));
		assert_eq!(validation.max_length, Some(255));
	}

	#[rstest]
	fn test_default_value_deep_merges() {
		let base = FieldOptions::new().default_value(json!({"a": 1, "b": {"c": 2}}));
		let overlay = FieldOptions::new().default_value(json!({"b": {"d": 3}}));

		let merged = base.merge(overlay);

		assert_eq!(
			merged.default_value,
			Some(json!({"a": 1, "b": {"c": 2, "d": 3}}))
		);
	}

	#[rstest]
	fn test_unset_overlay_keeps_base() {
		let base = FieldOptions::new().label("kept").orderable(true);

		let merged = base.clone().merge(FieldOptions::new());

		assert_eq!(merged, base);
		assert!(FieldOptions::new().is_empty());
	}

	#[rstest]
	fn test_field_options_deserialize() {
		let options: FieldOptions = serde_json::from_value(json!({
			"kind": "PASSWORD",
			"label": "Secret",
			"validation": {"min_length": 8}
		}))
		.unwrap();

		assert_eq!(options.kind, Some(FieldKind::Password));
		assert_eq!(options.label.as_deref(), Some("Secret"));
		assert_eq!(options.validation.unwrap().min_length, Some(8));
	}
}
