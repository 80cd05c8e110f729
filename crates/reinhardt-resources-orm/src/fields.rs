//! Model field descriptors
//!
//! A [`ModelField`] describes one column or relation of a model: its native
//! [`ModelFieldType`], human label, help text, default, nullability and the
//! constraints used to derive validation.

use serde::{Deserialize, Serialize};

/// Native field type of a model column or relation.
///
/// Types form an inheritance chain (an email field is a char field, a
/// datetime field is a date field); [`ModelFieldType::is_a`] walks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFieldType {
	Char,
	Text,
	Email,
	Slug,
	Url,
	Uuid,
	PhoneNumber,
	IpAddress,
	GenericIpAddress,
	Integer,
	BigInteger,
	SmallInteger,
	PositiveInteger,
	Auto,
	BigAuto,
	Float,
	Decimal,
	Boolean,
	Date,
	DateTime,
	Time,
	Duration,
	File,
	Image,
	Json,
	ForeignKey,
	OneToOne,
	ManyToMany,
	/// Reverse side of a foreign key
	ManyToOneRel,
	/// Reverse side of a one-to-one relation
	OneToOneRel,
	/// Reverse side of a many-to-many relation
	ManyToManyRel,
	Point,
	Polygon,
	/// A project-defined field type, optionally extending a built-in one
	Custom {
		name: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		parent: Option<Box<ModelFieldType>>,
	},
}

impl ModelFieldType {
	/// Creates a custom type extending `parent`
	pub fn custom(name: impl Into<String>, parent: Option<ModelFieldType>) -> Self {
		ModelFieldType::Custom {
			name: name.into(),
			parent: parent.map(Box::new),
		}
	}

	/// The type this one directly extends
	pub fn parent(&self) -> Option<ModelFieldType> {
		use ModelFieldType::*;

		match self {
			Email | Slug | PhoneNumber => Some(Char),
			Image => Some(File),
			DateTime => Some(Date),
			BigAuto => Some(Auto),
			Auto | BigInteger | SmallInteger | PositiveInteger => Some(Integer),
			OneToOne => Some(ForeignKey),
			OneToOneRel => Some(ManyToOneRel),
			Custom { parent, .. } => parent.as_deref().cloned(),
			_ => None,
		}
	}

	/// Returns true if this type is `other` or extends it.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_orm::ModelFieldType;
	///
	/// assert!(ModelFieldType::Email.is_a(&ModelFieldType::Char));
	/// assert!(ModelFieldType::BigAuto.is_a(&ModelFieldType::Integer));
	/// assert!(!ModelFieldType::Date.is_a(&ModelFieldType::DateTime));
	/// ```
	pub fn is_a(&self, other: &ModelFieldType) -> bool {
		let mut current = Some(self.clone());
		while let Some(field_type) = current {
			if field_type == *other {
				return true;
			}
			current = field_type.parent();
		}
		false
	}
}

/// Default value of a model field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelDefault {
	#[default]
	NotProvided,
	Value(serde_json::Value),
	/// Computed when a row is created (e.g. `now`); never exported
	Callable(String),
}

impl ModelDefault {
	/// The static default value, if any
	pub fn value(&self) -> Option<&serde_json::Value> {
		match self {
			ModelDefault::Value(value) => Some(value),
			ModelDefault::NotProvided | ModelDefault::Callable(_) => None,
		}
	}
}

/// One entry of a field's choice set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelChoice {
	Flat {
		value: serde_json::Value,
		label: String,
	},
	Group {
		name: String,
		choices: Vec<(serde_json::Value, String)>,
	},
}

/// A model column or relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelField {
	pub name: String,
	#[serde(rename = "type")]
	pub field_type: ModelFieldType,
	#[serde(default)]
	pub verbose_name: Option<String>,
	#[serde(default)]
	pub help_text: Option<String>,
	#[serde(default)]
	pub default: ModelDefault,
	#[serde(default)]
	pub null: bool,
	#[serde(default)]
	pub blank: bool,
	#[serde(default)]
	pub max_length: Option<u32>,
	#[serde(default)]
	pub max_digits: Option<u32>,
	#[serde(default)]
	pub decimal_places: Option<u32>,
	#[serde(default)]
	pub choices: Vec<ModelChoice>,
	/// Spatial reference system of geometry fields
	#[serde(default)]
	pub srid: Option<u32>,
	/// Schema type name of the related model, for relations
	#[serde(default)]
	pub related_type: Option<String>,
}

impl ModelField {
	pub fn new(name: impl Into<String>, field_type: ModelFieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			verbose_name: None,
			help_text: None,
			default: ModelDefault::NotProvided,
			null: false,
			blank: false,
			max_length: None,
			max_digits: None,
			decimal_places: None,
			choices: Vec::new(),
			srid: None,
			related_type: None,
		}
	}

	/// Creates a char field with a maximum length
	pub fn char(name: impl Into<String>, max_length: u32) -> Self {
		Self::new(name, ModelFieldType::Char).max_length(max_length)
	}

	/// Creates a decimal field with precision and scale
	pub fn decimal(name: impl Into<String>, max_digits: u32, decimal_places: u32) -> Self {
		let mut field = Self::new(name, ModelFieldType::Decimal);
		field.max_digits = Some(max_digits);
		field.decimal_places = Some(decimal_places);
		field
	}

	pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = Some(verbose_name.into());
		self
	}

	pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
		self.default = ModelDefault::Value(value.into());
		self
	}

	pub fn default_callable(mut self, name: impl Into<String>) -> Self {
		self.default = ModelDefault::Callable(name.into());
		self
	}

	pub fn null(mut self, null: bool) -> Self {
		self.null = null;
		self
	}

	pub fn blank(mut self, blank: bool) -> Self {
		self.blank = blank;
		self
	}

	pub fn max_length(mut self, max_length: u32) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn choice(mut self, value: impl Into<serde_json::Value>, label: impl Into<String>) -> Self {
		self.choices.push(ModelChoice::Flat {
			value: value.into(),
			label: label.into(),
		});
		self
	}

	pub fn choice_group(
		mut self,
		name: impl Into<String>,
		choices: Vec<(serde_json::Value, String)>,
	) -> Self {
		self.choices.push(ModelChoice::Group {
			name: name.into(),
			choices,
		});
		self
	}

	pub fn srid(mut self, srid: u32) -> Self {
		self.srid = Some(srid);
		self
	}

	pub fn related(mut self, type_name: impl Into<String>) -> Self {
		self.related_type = Some(type_name.into());
		self
	}

	/// Human label: the verbose name, else the name with underscores as spaces
	pub fn label(&self) -> String {
		match &self.verbose_name {
			Some(verbose_name) if !verbose_name.is_empty() => verbose_name.clone(),
			_ => self.name.replace('_', " "),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ModelFieldType::Email, ModelFieldType::Char, true)]
	#[case(ModelFieldType::Url, ModelFieldType::Char, false)]
	#[case(ModelFieldType::Image, ModelFieldType::File, true)]
	#[case(ModelFieldType::DateTime, ModelFieldType::Date, true)]
	#[case(ModelFieldType::BigAuto, ModelFieldType::Auto, true)]
	#[case(ModelFieldType::Auto, ModelFieldType::Integer, true)]
	#[case(ModelFieldType::OneToOne, ModelFieldType::ForeignKey, true)]
	#[case(ModelFieldType::OneToOneRel, ModelFieldType::ManyToOneRel, true)]
	#[case(ModelFieldType::Integer, ModelFieldType::Auto, false)]
	#[case(ModelFieldType::Text, ModelFieldType::Char, false)]
	fn test_is_a(#[case] child: ModelFieldType, #[case] parent: ModelFieldType, #[case] expected: bool) {
		assert_eq!(child.is_a(&parent), expected);
	}

	#[rstest]
	fn test_custom_type_inherits() {
		let money = ModelFieldType::custom("MoneyField", Some(ModelFieldType::Decimal));
		let tags = ModelFieldType::custom(
			"TagField",
			Some(ModelFieldType::custom("ListField", None)),
		);

		assert!(money.is_a(&ModelFieldType::Decimal));
		assert!(tags.is_a(&ModelFieldType::custom("ListField", None)));
		assert!(!tags.is_a(&ModelFieldType::Char));
	}

	#[rstest]
	#[case(ModelField::new("first_name", ModelFieldType::Char), "first name")]
	#[case(ModelField::new("email", ModelFieldType::Email).verbose_name("E-mail"), "E-mail")]
	#[case(ModelField::new("is_staff", ModelFieldType::Boolean).verbose_name(""), "is staff")]
	fn test_label(#[case] field: ModelField, #[case] expected: &str) {
		assert_eq!(field.label(), expected);
	}

	#[rstest]
	fn test_callable_default_has_no_value() {
		let field = ModelField::new("created", ModelFieldType::DateTime).default_callable("now");
		assert_eq!(field.default.value(), None);

		let field = ModelField::new("count", ModelFieldType::Integer).default_value(0);
		assert_eq!(field.default.value(), Some(&serde_json::json!(0)));
	}

	#[rstest]
	fn test_deserialize_field() {
		let field: ModelField = serde_json::from_value(serde_json::json!({
			"name": "title",
			"type": "char",
			"max_length": 100,
			"choices": [{"flat": {"value": "a", "label": "A"}}]
		}))
		.unwrap();

		assert_eq!(field.field_type, ModelFieldType::Char);
		assert_eq!(field.max_length, Some(100));
		assert_eq!(field.choices.len(), 1);
	}
}
