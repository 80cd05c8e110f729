//! The ORM integration
//!
//! Enriches fields of schema types bound to a model with what the model
//! knows: labels, help texts, defaults, choices, ordering and filtering
//! support, and a kind picked from the model field type.

use crate::fields::{ModelChoice, ModelField, ModelFieldType};
use crate::model::{ModelBinding, ModelBindingRegistry, global_bindings};
use reinhardt_resources_core::{
	Annotation, FieldChoice, FieldContext, FieldKind, FieldObjectKind, FieldOptions, Integration,
	Merge, NativeType, ResourceError, ResourceResult, ValidationOptions, register_integration,
};
use std::sync::Arc;

/// Name the integration registers under
pub const ORM_INTEGRATION: &str = "orm";

/// Native type of image file values
pub const IMAGE_FILE: NativeType = NativeType::from_static("ImageFieldFile");
/// Native type of file values
pub const FIELD_FILE: NativeType = NativeType::from_static("FieldFile");

/// Generic origin of `set`/`add`/`remove` list input wrappers
pub const LIST_INPUT: &str = "ListInput";

/// SRID of WGS 84 geographic coordinates
const GEOGRAPHIC_SRID: u32 = 4326;

/// Integration reading model bindings
#[derive(Debug, Clone)]
pub struct OrmIntegration {
	bindings: ModelBindingRegistry,
}

impl OrmIntegration {
	/// Creates an integration over its own bindings
	pub fn new(bindings: ModelBindingRegistry) -> Self {
		Self { bindings }
	}

	/// Creates an integration over the global bindings
	pub fn global() -> Self {
		Self::new(global_bindings().clone())
	}

	pub fn bindings(&self) -> &ModelBindingRegistry {
		&self.bindings
	}
}

impl Default for OrmIntegration {
	fn default() -> Self {
		Self::new(ModelBindingRegistry::new())
	}
}

fn create_global() -> ResourceResult<Arc<dyn Integration>> {
	Ok(Arc::new(OrmIntegration::global()))
}

register_integration!(ORM_INTEGRATION, create_global);

impl Integration for OrmIntegration {
	fn name(&self) -> &str {
		ORM_INTEGRATION
	}

	fn extra_kind_mappings(&self) -> Vec<(NativeType, FieldKind)> {
		vec![
			(IMAGE_FILE, FieldKind::Image),
			(FIELD_FILE, FieldKind::File),
			(NativeType::GLOBAL_ID, FieldKind::Id),
		]
	}

	fn field_options(&self, context: &FieldContext<'_>) -> ResourceResult<FieldOptions> {
		let Some(binding) = self.bindings.get(&context.owner.name) else {
			return Ok(FieldOptions::new());
		};

		let property = property_options(&binding, &context.field.name)?;
		let model_field = binding.model.get_field(&context.field.name);

		if let Some(object) = context.leaf_object() {
			let mut options = FieldOptions::new();
			if object.generic_origin.as_deref() == Some(LIST_INPUT) {
				options = options.obj_kind(FieldObjectKind::ListInput);
			}
			options.label = property.label.or_else(|| model_field.map(ModelField::label));
			return Ok(options);
		}

		let Some(model_field) = model_field else {
			return Ok(property);
		};

		Ok(model_field_options(&binding, model_field).merge(property))
	}
}

/// Options from a model property's annotated return type
fn property_options(binding: &ModelBinding, name: &str) -> ResourceResult<FieldOptions> {
	let mut options = FieldOptions::new();
	let Some(annotation) = binding.model.properties.get(name) else {
		return Ok(options);
	};

	for marker in annotation.split_annotations().1 {
		match marker {
			Annotation::Hidden => {
				tracing::debug!(model = %binding.model.name, property = name, "Model property is hidden");
				return Err(ResourceError::HiddenField);
			}
			Annotation::Config(config) => options = options.merge(config.options.clone()),
			Annotation::Marker(_) => {}
		}
	}
	Ok(options)
}

fn model_field_options(binding: &ModelBinding, field: &ModelField) -> FieldOptions {
	let mut options = FieldOptions::new().label(field.label());
	options.default_value = field.default.value().cloned();
	options.help_text = field.help_text.clone().filter(|text| !text.is_empty());
	options.resource = field.related_type.clone();
	options.orderable = binding.is_orderable(&field.name);
	options.filterable = binding.is_filterable(&field.name);

	if !field.choices.is_empty() {
		options.choices = Some(choices(&field.choices));
	}

	options.merge(kind_options(field))
}

fn choices(items: &[ModelChoice]) -> Vec<FieldChoice> {
	let mut choices = Vec::new();
	for item in items {
		match item {
			ModelChoice::Flat { value, label } => {
				choices.push(FieldChoice::new(label.clone(), value.clone()));
			}
			ModelChoice::Group { name, choices: group } => {
				choices.extend(group.iter().map(|(value, label)| {
					FieldChoice::new(label.clone(), value.clone()).with_group(name.clone())
				}));
			}
		}
	}
	choices
}

/// Picks the kind from the model field type; the first matching check wins
pub fn kind_options(field: &ModelField) -> FieldOptions {
	use ModelFieldType as T;

	let field_type = &field.field_type;
	let options = FieldOptions::new();

	if field_type.is_a(&T::Image) {
		options.kind(FieldKind::Image)
	} else if field_type.is_a(&T::File) {
		options.kind(FieldKind::File)
	} else if field_type.is_a(&T::PhoneNumber) {
		options.kind(FieldKind::Phone)
	} else if field_type.is_a(&T::Text) {
		options.kind(FieldKind::Multiline)
	} else if field_type.is_a(&T::IpAddress) || field_type.is_a(&T::GenericIpAddress) {
		options.kind(FieldKind::Ip)
	} else if field_type.is_a(&T::Email) {
		options.kind(FieldKind::Email)
	} else if field_type.is_a(&T::Char) {
		let min_length = if field.blank { 0 } else { 1 };
		options
			.kind(FieldKind::String)
			.validation(ValidationOptions::string(Some(min_length), field.max_length))
	} else if field_type.is_a(&T::Uuid) {
		options.kind(FieldKind::Uuid)
	} else if field_type.is_a(&T::Url) {
		options.kind(FieldKind::Url)
	} else if field_type.is_a(&T::Decimal) {
		options
			.kind(FieldKind::Decimal)
			.validation(ValidationOptions::decimal(field.max_digits, field.decimal_places))
	} else if field_type.is_a(&T::Float) {
		options.kind(FieldKind::Float)
	} else if field_type.is_a(&T::Auto) {
		options.kind(FieldKind::Id)
	} else if field_type.is_a(&T::Integer) {
		options.kind(FieldKind::Int)
	} else if field_type.is_a(&T::Boolean) {
		options.kind(FieldKind::Boolean)
	} else if field_type.is_a(&T::DateTime) {
		options.kind(FieldKind::Datetime)
	} else if field_type.is_a(&T::Date) {
		options.kind(FieldKind::Date)
	} else if field_type.is_a(&T::Time) {
		options.kind(FieldKind::Time)
	} else if field_type.is_a(&T::ForeignKey) || field_type.is_a(&T::OneToOneRel) {
		options.kind(FieldKind::Id)
	} else if field_type.is_a(&T::ManyToMany)
		|| field_type.is_a(&T::ManyToOneRel)
		|| field_type.is_a(&T::ManyToManyRel)
	{
		options.kind(FieldKind::Id).multiple(true)
	} else if field_type.is_a(&T::Json) {
		options.kind(FieldKind::Json)
	} else if field_type.is_a(&T::Polygon) {
		options.kind(FieldKind::Polygon)
	} else if field_type.is_a(&T::Point) {
		if field.srid == Some(GEOGRAPHIC_SRID) {
			options.kind(FieldKind::Geopoint)
		} else {
			options.kind(FieldKind::Point)
		}
	} else {
		options
	}
}
