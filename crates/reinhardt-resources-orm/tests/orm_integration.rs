//! Resolution of schema types bound to models

use reinhardt_resources_core::prelude::*;
use reinhardt_resources_core::StringFieldValidation;
use reinhardt_resources_orm::prelude::*;
use reinhardt_resources_orm::{IMAGE_FILE, LIST_INPUT};
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

fn author_model() -> ModelMeta {
	ModelMeta::new("Author")
		.field(ModelField::new("id", ModelFieldType::BigAuto))
		.field(ModelField::char("name", 10).verbose_name("Full name"))
		.field(ModelField::char("nickname", 30).blank(true).null(true))
		.field(
			ModelField::new("bio", ModelFieldType::Text)
				.help_text("Shown on the profile page")
				.default_value(""),
		)
		.field(
			ModelField::char("genre", 20)
				.choice("fiction", "Fiction")
				.choice_group(
					"Non-fiction",
					vec![
						(json!("essay"), "Essay".to_string()),
						(json!("memoir"), "Memoir".to_string()),
					],
				),
		)
		.field(ModelField::new("joined", ModelFieldType::DateTime).default_callable("now"))
		.field(ModelField::new("avatar", ModelFieldType::Image))
		.field(ModelField::new("books", ModelFieldType::ManyToOneRel).related("BookType"))
		.field(ModelField::new("home", ModelFieldType::Point).srid(4326))
		.property(
			"display_name",
			TypeRef::annotated(
				TypeRef::native(NativeType::STR),
				vec![config(FieldOptions::new().label("Display name"))],
			),
		)
		.property(
			"secret",
			TypeRef::annotated(TypeRef::native(NativeType::STR), vec![Annotation::Hidden]),
		)
}

#[fixture]
fn bindings() -> ModelBindingRegistry {
	let bindings = ModelBindingRegistry::new();
	bindings.register(
		ModelBinding::new("AuthorType", author_model())
			.ordering(["name", "joined"])
			.filters(["name"]),
	);
	bindings.register(ModelBinding::new("AuthorInput", author_model()));
	bindings
}

#[fixture]
fn schema() -> Schema {
	let str_field = |name: &str| FieldDefinition::new(name, TypeRef::native(NativeType::STR));

	Schema::builder()
		.object(
			ObjectType::new("AuthorType")
				.field(FieldDefinition::new("id", TypeRef::native(NativeType::GLOBAL_ID)))
				.field(str_field("name"))
				.field(FieldDefinition::new(
					"nickname",
					TypeRef::optional(TypeRef::native(NativeType::STR)),
				))
				.field(str_field("bio"))
				.field(str_field("genre"))
				.field(FieldDefinition::new("joined", TypeRef::native(NativeType::DATETIME)))
				.field(FieldDefinition::new("avatar", TypeRef::native(IMAGE_FILE)))
				.field(FieldDefinition::new(
					"books",
					TypeRef::list(TypeRef::native(NativeType::ID)),
				))
				.field(FieldDefinition::new("home", TypeRef::native("GeoPoint")))
				.field(str_field("display_name"))
				.field(str_field("secret"))
				.field(FieldDefinition::new("not_a_column", TypeRef::native(NativeType::INT))),
		)
		.object(
			ObjectType::input("AuthorInput")
				.field(str_field("name"))
				.field(FieldDefinition::new("books", TypeRef::object("BookRefInput"))),
		)
		.object(
			ObjectType::input("BookRefInput")
				.generic_origin(LIST_INPUT)
				.field(FieldDefinition::new(
					"set",
					TypeRef::optional(TypeRef::list(TypeRef::native(NativeType::ID))),
				)),
		)
		.build()
}

fn resolve(bindings: ModelBindingRegistry, schema: &Schema, type_name: &str) -> Resource {
	let registry = IntegrationRegistry::new().with(Arc::new(OrmIntegration::new(bindings)));
	Resolver::new(&registry)
		.resolve_type(schema, type_name)
		.unwrap()
}

fn field<'a>(resource: &'a Resource, name: &str) -> &'a Field {
	resource
		.field(name)
		.and_then(ResourceField::as_field)
		.unwrap_or_else(|| panic!("field {name} should resolve to a scalar field"))
}

#[rstest]
fn test_required_char_field(bindings: ModelBindingRegistry, schema: Schema) {
	// Act
	let resource = resolve(bindings, &schema, "AuthorType");

	// Assert
	let name = field(&resource, "name");
	assert_eq!(name.kind, FieldKind::String);
	assert_eq!(name.label, "Full name");
	assert_eq!(
		name.validation,
		FieldValidation::String(StringFieldValidation {
			required: true,
			min_length: Some(1),
			max_length: Some(10),
		})
	);
}

#[rstest]
fn test_blank_char_field(bindings: ModelBindingRegistry, schema: Schema) {
	let resource = resolve(bindings, &schema, "AuthorType");

	let nickname = field(&resource, "nickname");
	assert_eq!(nickname.label, "nickname");
	assert_eq!(
		nickname.validation,
		FieldValidation::String(StringFieldValidation {
			required: false,
			min_length: Some(0),
			max_length: Some(30),
		})
	);
}

#[rstest]
fn test_model_metadata(bindings: ModelBindingRegistry, schema: Schema) {
	// Act
	let resource = resolve(bindings, &schema, "AuthorType");

	// Assert
	let bio = field(&resource, "bio");
	assert_eq!(bio.kind, FieldKind::Multiline);
	assert_eq!(bio.help_text.as_deref(), Some("Shown on the profile page"));
	assert_eq!(bio.default_value, Some(json!("")));

	let joined = field(&resource, "joined");
	assert_eq!(joined.kind, FieldKind::Datetime);
	assert_eq!(joined.default_value, None);
	assert!(joined.orderable);
	assert!(!joined.filterable);

	let name = field(&resource, "name");
	assert!(name.orderable);
	assert!(name.filterable);
}

#[rstest]
fn test_choices(bindings: ModelBindingRegistry, schema: Schema) {
	let resource = resolve(bindings, &schema, "AuthorType");

	let genre = field(&resource, "genre");
	assert_eq!(
		genre.choices,
		Some(vec![
			FieldChoice::new("Fiction", "fiction"),
			FieldChoice::new("Essay", "essay").with_group("Non-fiction"),
			FieldChoice::new("Memoir", "memoir").with_group("Non-fiction"),
		])
	);
}

#[rstest]
fn test_kinds_and_relations(bindings: ModelBindingRegistry, schema: Schema) {
	// Act
	let resource = resolve(bindings, &schema, "AuthorType");

	// Assert
	assert_eq!(field(&resource, "id").kind, FieldKind::Id);
	assert_eq!(field(&resource, "avatar").kind, FieldKind::Image);
	assert_eq!(field(&resource, "home").kind, FieldKind::Geopoint);

	let books = field(&resource, "books");
	assert_eq!(books.kind, FieldKind::Id);
	assert!(books.multiple);
	assert_eq!(books.resource.as_deref(), Some("BookType"));
}

#[rstest]
fn test_properties(bindings: ModelBindingRegistry, schema: Schema) {
	// Act
	let resource = resolve(bindings, &schema, "AuthorType");

	// Assert
	let display_name = field(&resource, "displayName");
	assert_eq!(display_name.label, "Display name");
	assert_eq!(display_name.kind, FieldKind::String);
	assert!(resource.field("secret").is_none());
}

#[rstest]
fn test_field_without_column(bindings: ModelBindingRegistry, schema: Schema) {
	let resource = resolve(bindings, &schema, "AuthorType");

	let field = field(&resource, "notAColumn");
	assert_eq!(field.kind, FieldKind::Int);
	assert_eq!(field.label, "not_a_column");
}

#[rstest]
fn test_list_input_relation(bindings: ModelBindingRegistry, schema: Schema) {
	// Act
	let resource = resolve(bindings, &schema, "AuthorInput");

	// Assert
	let books = resource
		.field("books")
		.and_then(ResourceField::as_object)
		.unwrap();
	assert_eq!(books.obj_kind, FieldObjectKind::ListInput);
	assert_eq!(books.obj_type, "BookRefInput");
	assert_eq!(books.label, "books");
	assert_eq!(books.fields.len(), 1);
}

#[rstest]
fn test_unbound_type_is_untouched(schema: Schema) {
	let resource = resolve(ModelBindingRegistry::new(), &schema, "AuthorType");

	let name = field(&resource, "name");
	assert_eq!(name.label, "name");
	assert_eq!(name.validation, FieldValidation::base(true));
	assert!(resource.field("secret").is_some());
	// The ORM kind mappings apply even without a binding
	assert_eq!(field(&resource, "avatar").kind, FieldKind::Image);
}

#[rstest]
fn test_image_files_unknown_without_orm(schema: Schema) {
	let resource = Resolver::default().resolve_type(&schema, "AuthorType").unwrap();

	assert!(resource.field("avatar").is_none());
	assert_eq!(field(&resource, "id").kind, FieldKind::Id);
}

#[rstest]
fn test_author_annotation_wins(bindings: ModelBindingRegistry) {
	// Arrange
	let schema = Schema::builder()
		.object(ObjectType::new("AuthorType").field(FieldDefinition::new(
			"name",
			TypeRef::annotated(
				TypeRef::native(NativeType::STR),
				vec![config(
					FieldOptions::new()
						.label("Pen name")
						.validation(ValidationOptions::string(None, Some(5))),
				)],
			),
		)))
		.build();

	// Act
	let resource = resolve(bindings, &schema, "AuthorType");

	// Assert
	let name = field(&resource, "name");
	assert_eq!(name.label, "Pen name");
	assert_eq!(
		name.validation,
		FieldValidation::String(StringFieldValidation {
			required: true,
			min_length: Some(1),
			max_length: Some(5),
		})
	);
}

#[rstest]
fn test_discovered_integration_reads_global_bindings() {
	// Arrange
	global_bindings().register(ModelBinding::new(
		"GlobalAuthorType",
		ModelMeta::new("Author").field(ModelField::char("name", 10).verbose_name("Full name")),
	));
	let schema = Schema::builder()
		.object(ObjectType::new("GlobalAuthorType").field(FieldDefinition::new(
			"name",
			TypeRef::native(NativeType::STR),
		)))
		.build();

	// Act
	let registry = IntegrationRegistry::discover();
	let resource = Resolver::new(&registry)
		.resolve_type(&schema, "GlobalAuthorType")
		.unwrap();

	// Assert
	assert!(registry.get("orm").is_some());
	assert_eq!(field(&resource, "name").label, "Full name");
	global_bindings().remove("GlobalAuthorType");
}
