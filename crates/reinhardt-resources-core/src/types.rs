//! Resource metadata model
//!
//! A [`Resource`] describes one exposed type. Each of its fields is either a
//! leaf [`Field`] carrying a semantic [`FieldKind`] and validation rules, or a
//! [`FieldObject`] branch wrapping the recursively resolved fields of a nested
//! object or input type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The semantic kind of a field.
///
/// This differentiates the kind of a field from its scalar type: a string
/// scalar might be a `PostalCode`, a `Password`, an `Email`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
	Boolean,
	Currency,
	Date,
	Datetime,
	Timedelta,
	Decimal,
	Email,
	File,
	Image,
	Float,
	Id,
	Ip,
	Int,
	Json,
	LegalPersonDoc,
	NaturalPersonDoc,
	Password,
	Percent,
	Phone,
	PostalCode,
	String,
	StringList,
	Multiline,
	Time,
	Url,
	Uuid,
	Point,
	Geopoint,
	Polygon,
	Distance,
}

impl FieldKind {
	/// Returns the value consumers use to identify this kind.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_core::FieldKind;
	///
	/// assert_eq!(FieldKind::PostalCode.as_str(), "postal-code");
	/// assert_eq!(FieldKind::Ip.as_str(), "IP");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Boolean => "boolean",
			FieldKind::Currency => "currency",
			FieldKind::Date => "date",
			FieldKind::Datetime => "datetime",
			FieldKind::Timedelta => "timedelta",
			FieldKind::Decimal => "decimal",
			FieldKind::Email => "email",
			FieldKind::File => "file",
			FieldKind::Image => "image",
			FieldKind::Float => "float",
			FieldKind::Id => "id",
			FieldKind::Ip => "IP",
			FieldKind::Int => "int",
			FieldKind::Json => "json",
			FieldKind::LegalPersonDoc => "legal-person-doc",
			FieldKind::NaturalPersonDoc => "natural-person-doc",
			FieldKind::Password => "password",
			FieldKind::Percent => "percent",
			FieldKind::Phone => "phone",
			FieldKind::PostalCode => "postal-code",
			FieldKind::String => "string",
			FieldKind::StringList => "string-list",
			FieldKind::Multiline => "multiline",
			FieldKind::Time => "time",
			FieldKind::Url => "url",
			FieldKind::Uuid => "uuid",
			FieldKind::Point => "point",
			FieldKind::Geopoint => "geopoint",
			FieldKind::Polygon => "polygon",
			FieldKind::Distance => "distance",
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How consumers should interpret a nested object field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldObjectKind {
	/// A nested type containing the given fields (e.g. `{"foo": "bar"}`)
	Object,
	/// A nested list of types containing the given fields (e.g. `[{"foo": "bar"}, ...]`)
	ObjectList,
	/// A nested input expecting the given fields
	Input,
	/// A nested list of inputs expecting the given fields
	InputList,
	/// A nested `set`/`add`/`remove` wrapper, each expecting a list of the given inputs
	/// (e.g. `{"set": [{"foo": "bar"}, ...]}`)
	ListInput,
}

impl FieldObjectKind {
	/// Picks the object kind from whether the field holds a list and whether
	/// the nested type is an input type.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_core::FieldObjectKind;
	///
	/// assert_eq!(FieldObjectKind::infer(true, false), FieldObjectKind::ObjectList);
	/// assert_eq!(FieldObjectKind::infer(true, true), FieldObjectKind::InputList);
	/// ```
	pub fn infer(multiple: bool, is_input: bool) -> Self {
		match (multiple, is_input) {
			(false, false) => FieldObjectKind::Object,
			(true, false) => FieldObjectKind::ObjectList,
			(true, true) => FieldObjectKind::InputList,
			(false, true) => FieldObjectKind::Input,
		}
	}

	/// Returns the value consumers use to identify this kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldObjectKind::Object => "object",
			FieldObjectKind::ObjectList => "object-list",
			FieldObjectKind::Input => "input",
			FieldObjectKind::InputList => "input-list",
			FieldObjectKind::ListInput => "list-input",
		}
	}
}

impl fmt::Display for FieldObjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A valid choice for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChoice {
	pub label: String,
	pub value: serde_json::Value,
	#[serde(default)]
	pub group: Option<String>,
}

impl FieldChoice {
	/// Creates an ungrouped choice
	pub fn new(label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
			group: None,
		}
	}

	/// Places the choice inside a named group
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}

/// Validation shared by every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFieldValidation {
	/// If this field is required.
	pub required: bool,
}

/// Validation for string values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFieldValidation {
	pub required: bool,
	pub min_length: Option<u32>,
	pub max_length: Option<u32>,
}

/// Validation for integer values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntFieldValidation {
	pub required: bool,
	pub min_value: Option<i64>,
	pub max_value: Option<i64>,
}

/// Validation for decimal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalFieldValidation {
	pub required: bool,
	pub min_value: Option<i64>,
	pub max_value: Option<i64>,
	/// Max digits allowed, including the decimal places.
	pub max_digits: Option<u32>,
	pub decimal_places: Option<u32>,
}

/// Field validation rules; the variant decides which constraints apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValidation {
	Base(BaseFieldValidation),
	String(StringFieldValidation),
	Int(IntFieldValidation),
	Decimal(DecimalFieldValidation),
}

impl FieldValidation {
	/// Plain validation with only the `required` flag
	pub fn base(required: bool) -> Self {
		FieldValidation::Base(BaseFieldValidation { required })
	}

	/// Whether a value must be provided
	pub fn required(&self) -> bool {
		match self {
			FieldValidation::Base(v) => v.required,
			FieldValidation::String(v) => v.required,
			FieldValidation::Int(v) => v.required,
			FieldValidation::Decimal(v) => v.required,
		}
	}
}

impl Default for FieldValidation {
	fn default() -> Self {
		FieldValidation::base(true)
	}
}

/// Leaf field metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
	/// The API-facing name of the field.
	pub name: String,
	pub kind: FieldKind,
	/// The field's humanized name.
	pub label: String,
	/// If this field expects an array of values.
	pub multiple: bool,
	pub orderable: bool,
	pub filterable: bool,
	pub help_text: Option<String>,
	/// Valid choices for this field, if any is defined.
	pub choices: Option<Vec<FieldChoice>>,
	pub default_value: Option<serde_json::Value>,
	pub validation: FieldValidation,
	/// The resource that this field's value belongs to.
	pub resource: Option<String>,
}

impl Field {
	/// Creates a field with default flags and `required` validation
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_core::{Field, FieldKind};
	///
	/// let field = Field::new("email", FieldKind::Email, "email");
	/// assert!(!field.multiple);
	/// assert!(field.validation.required());
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind,
			label: label.into(),
			multiple: false,
			orderable: false,
			filterable: false,
			help_text: None,
			choices: None,
			default_value: None,
			validation: FieldValidation::default(),
			resource: None,
		}
	}
}

/// Nested object field metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldObject {
	pub name: String,
	pub label: String,
	pub obj_kind: FieldObjectKind,
	/// Name of the nested type.
	pub obj_type: String,
	/// All subfields of this field.
	pub fields: Vec<ResourceField>,
}

/// Either a leaf [`Field`] or a nested [`FieldObject`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceField {
	Field(Field),
	Object(FieldObject),
}

impl ResourceField {
	/// API-facing name of the field
	pub fn name(&self) -> &str {
		match self {
			ResourceField::Field(f) => &f.name,
			ResourceField::Object(o) => &o.name,
		}
	}

	/// Human-facing label of the field
	pub fn label(&self) -> &str {
		match self {
			ResourceField::Field(f) => &f.label,
			ResourceField::Object(o) => &o.label,
		}
	}

	pub fn as_field(&self) -> Option<&Field> {
		match self {
			ResourceField::Field(f) => Some(f),
			ResourceField::Object(_) => None,
		}
	}

	pub fn as_object(&self) -> Option<&FieldObject> {
		match self {
			ResourceField::Field(_) => None,
			ResourceField::Object(o) => Some(o),
		}
	}
}

impl From<Field> for ResourceField {
	fn from(field: Field) -> Self {
		ResourceField::Field(field)
	}
}

impl From<FieldObject> for ResourceField {
	fn from(object: FieldObject) -> Self {
		ResourceField::Object(object)
	}
}

/// Resolved metadata for one exposed type.
///
/// Resources are identified by name: equality and hashing only consider
/// [`Resource::name`].
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
	pub name: String,
	pub fields: Vec<ResourceField>,
}

impl Resource {
	pub fn new(name: impl Into<String>, fields: Vec<ResourceField>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}

	/// Looks up a top-level field by its API-facing name
	pub fn field(&self, name: &str) -> Option<&ResourceField> {
		self.fields.iter().find(|f| f.name() == name)
	}
}

impl PartialEq for Resource {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for Resource {}

impl Hash for Resource {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	#[rstest]
	#[case(false, false, FieldObjectKind::Object)]
	#[case(true, false, FieldObjectKind::ObjectList)]
	#[case(true, true, FieldObjectKind::InputList)]
	#[case(false, true, FieldObjectKind::Input)]
	fn test_object_kind_table(
		#[case] multiple: bool,
		#[case] is_input: bool,
		#[case] expected: FieldObjectKind,
	) {
		assert_eq!(FieldObjectKind::infer(multiple, is_input), expected);
	}

	#[rstest]
	fn test_field_kind_serializes_as_name() {
		let json = serde_json::to_value(FieldKind::NaturalPersonDoc).unwrap();
		assert_eq!(json, serde_json::json!("NATURAL_PERSON_DOC"));
		let json = serde_json::to_value(FieldKind::Ip).unwrap();
		assert_eq!(json, serde_json::json!("IP"));
	}

	#[rstest]
	#[case(FieldKind::PostalCode, "postal-code")]
	#[case(FieldKind::Ip, "IP")]
	#[case(FieldKind::StringList, "string-list")]
	#[case(FieldKind::Geopoint, "geopoint")]
	fn test_field_kind_display(#[case] kind: FieldKind, #[case] expected: &str) {
		assert_eq!(kind.as_str(), expected);
		assert_eq!(kind.to_string(), expected);
	}

	#[rstest]
	fn test_resource_identity_is_name() {
		let a = Resource::new("User", vec![]);
		let b = Resource::new(
			"User",
			vec![Field::new("id", FieldKind::Id, "id").into()],
		);

		let set: HashSet<Resource> = [a.clone(), b].into_iter().collect();
		assert_eq!(set.len(), 1);
		assert_eq!(a, Resource::new("User", vec![]));
	}

	#[rstest]
	fn test_validation_serializes_flat() {
		let validation = FieldValidation::String(StringFieldValidation {
			required: true,
			min_length: Some(1),
			max_length: Some(10),
		});
		let json = serde_json::to_value(&validation).unwrap();
		assert_eq!(
			json,
			serde_json::json!({"required": true, "minLength": 1, "maxLength": 10})
		);
	}

	#[rstest]
	fn test_resource_field_accessors() {
		let field: ResourceField = Field::new("name", FieldKind::String, "name").into();
		assert_eq!(field.name(), "name");
		assert!(field.as_field().is_some());
		assert!(field.as_object().is_none());
	}
}
