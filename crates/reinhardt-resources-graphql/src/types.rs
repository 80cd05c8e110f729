//! GraphQL output types wrapping resolved resources

use async_graphql::{Json, Object, Union};
use reinhardt_resources_core::{
	BaseFieldValidation, DecimalFieldValidation, Field, FieldChoice, FieldKind, FieldObject,
	FieldObjectKind, FieldValidation, IntFieldValidation, Resource, ResourceField,
	StringFieldValidation,
};
use serde_json::Value;

/// A resolved resource
pub struct ResourceType(pub Resource);

#[Object(name = "Resource")]
impl ResourceType {
	async fn name(&self) -> &str {
		&self.0.name
	}

	async fn fields(&self) -> Vec<ResourceFieldType> {
		self.0.fields.iter().cloned().map(Into::into).collect()
	}

	/// A single field by its API-facing name
	async fn field(&self, name: String) -> Option<ResourceFieldType> {
		self.0.field(&name).cloned().map(Into::into)
	}
}

/// Either a scalar field or a nested object field
#[derive(Union)]
#[graphql(name = "ResourceField")]
pub enum ResourceFieldType {
	Field(FieldType),
	Object(FieldObjectType),
}

impl From<ResourceField> for ResourceFieldType {
	fn from(field: ResourceField) -> Self {
		match field {
			ResourceField::Field(field) => ResourceFieldType::Field(FieldType(field)),
			ResourceField::Object(object) => ResourceFieldType::Object(FieldObjectType(object)),
		}
	}
}

pub struct FieldType(pub Field);

#[Object(name = "Field")]
impl FieldType {
	async fn name(&self) -> &str {
		&self.0.name
	}

	async fn kind(&self) -> FieldKind {
		self.0.kind
	}

	async fn label(&self) -> &str {
		&self.0.label
	}

	async fn multiple(&self) -> bool {
		self.0.multiple
	}

	async fn orderable(&self) -> bool {
		self.0.orderable
	}

	async fn filterable(&self) -> bool {
		self.0.filterable
	}

	async fn help_text(&self) -> Option<&str> {
		self.0.help_text.as_deref()
	}

	async fn choices(&self) -> Option<Vec<ChoiceType>> {
		self.0
			.choices
			.as_ref()
			.map(|choices| choices.iter().cloned().map(ChoiceType).collect())
	}

	async fn default_value(&self) -> Option<Json<Value>> {
		self.0.default_value.clone().map(Json)
	}

	async fn validation(&self) -> FieldValidationType {
		self.0.validation.clone().into()
	}

	/// Shortcut for `validation.required`
	async fn required(&self) -> bool {
		self.0.validation.required()
	}

	async fn resource(&self) -> Option<&str> {
		self.0.resource.as_deref()
	}
}

pub struct FieldObjectType(pub FieldObject);

#[Object(name = "FieldObject")]
impl FieldObjectType {
	async fn name(&self) -> &str {
		&self.0.name
	}

	async fn label(&self) -> &str {
		&self.0.label
	}

	async fn obj_kind(&self) -> FieldObjectKind {
		self.0.obj_kind
	}

	async fn obj_type(&self) -> &str {
		&self.0.obj_type
	}

	async fn fields(&self) -> Vec<ResourceFieldType> {
		self.0.fields.iter().cloned().map(Into::into).collect()
	}
}

pub struct ChoiceType(pub FieldChoice);

#[Object(name = "FieldChoice")]
impl ChoiceType {
	async fn label(&self) -> &str {
		&self.0.label
	}

	async fn value(&self) -> Json<Value> {
		Json(self.0.value.clone())
	}

	async fn group(&self) -> Option<&str> {
		self.0.group.as_deref()
	}
}

/// Validation rules; the concrete object tells which constraints apply
#[derive(Union)]
#[graphql(name = "FieldValidation")]
pub enum FieldValidationType {
	Base(BaseValidationType),
	String(StringValidationType),
	Int(IntValidationType),
	Decimal(DecimalValidationType),
}

impl From<FieldValidation> for FieldValidationType {
	fn from(validation: FieldValidation) -> Self {
		match validation {
			FieldValidation::Base(v) => FieldValidationType::Base(BaseValidationType(v)),
			FieldValidation::String(v) => FieldValidationType::String(StringValidationType(v)),
			FieldValidation::Int(v) => FieldValidationType::Int(IntValidationType(v)),
			FieldValidation::Decimal(v) => FieldValidationType::Decimal(DecimalValidationType(v)),
		}
	}
}

pub struct BaseValidationType(pub BaseFieldValidation);

#[Object(name = "BaseFieldValidation")]
impl BaseValidationType {
	async fn required(&self) -> bool {
		self.0.required
	}
}

pub struct StringValidationType(pub StringFieldValidation);

#[Object(name = "StringFieldValidation")]
impl StringValidationType {
	async fn required(&self) -> bool {
		self.0.required
	}

	async fn min_length(&self) -> Option<u32> {
		self.0.min_length
	}

	async fn max_length(&self) -> Option<u32> {
		self.0.max_length
	}
}

pub struct IntValidationType(pub IntFieldValidation);

#[Object(name = "IntFieldValidation")]
impl IntValidationType {
	async fn required(&self) -> bool {
		self.0.required
	}

	async fn min_value(&self) -> Option<i64> {
		self.0.min_value
	}

	async fn max_value(&self) -> Option<i64> {
		self.0.max_value
	}
}

pub struct DecimalValidationType(pub DecimalFieldValidation);

#[Object(name = "DecimalFieldValidation")]
impl DecimalValidationType {
	async fn required(&self) -> bool {
		self.0.required
	}

	async fn min_value(&self) -> Option<i64> {
		self.0.min_value
	}

	async fn max_value(&self) -> Option<i64> {
		self.0.max_value
	}

	/// Max digits allowed, including the decimal places
	async fn max_digits(&self) -> Option<u32> {
		self.0.max_digits
	}

	async fn decimal_places(&self) -> Option<u32> {
		self.0.decimal_places
	}
}
