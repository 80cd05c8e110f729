//! Field resolution
//!
//! Turns the object definitions of a [`Schema`] into [`Resource`]s. Options
//! for every field are accumulated in a fixed order:
//!
//! 1. defaults derived from the declaration (label, `required`, `multiple`,
//!    enum kind and choices)
//! 2. every integration, in ascending `ordering`
//! 3. the kind map, only when no kind was set yet
//! 4. author annotations, which always win
//!
//! Nested object and input types are expanded recursively until `max_depth`
//! is exceeded. Fields that cannot be classified are left out.

use crate::error::{ResourceError, ResourceResult};
use crate::inspect::type_definitions;
use crate::integrations::{FieldContext, Integration, IntegrationRegistry};
use crate::kind::KindMap;
use crate::merge::Merge;
use crate::options::{FieldOptions, ValidationOptions};
use crate::schema::{Annotation, FieldDefinition, ObjectType, Schema, TypeRef};
use crate::settings::ResourceSettings;
use crate::types::{
	Field, FieldChoice, FieldKind, FieldObject, FieldObjectKind, Resource, ResourceField,
};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default recursion bound for nested object expansion
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Resources keyed by type name, in schema declaration order
pub type ResourceMap = IndexMap<String, Resource>;

/// Resolves schema types into resources
#[derive(Clone)]
pub struct Resolver {
	integrations: Vec<Arc<dyn Integration>>,
	kinds: KindMap,
	max_depth: usize,
}

impl Default for Resolver {
	fn default() -> Self {
		Self::new(&IntegrationRegistry::new())
	}
}

impl Resolver {
	/// Creates a resolver using the registry's integrations.
	///
	/// The kind map is the built-in one extended with every integration's
	/// extra mappings.
	pub fn new(registry: &IntegrationRegistry) -> Self {
		let integrations = registry.sorted();
		let mut kinds = KindMap::builtin();
		for integration in &integrations {
			kinds.extend(integration.extra_kind_mappings());
		}

		Self {
			integrations,
			kinds,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}

	/// Creates a resolver honoring the integration filters and depth from settings
	pub fn from_settings(registry: &IntegrationRegistry, settings: &ResourceSettings) -> Self {
		let registry = registry.filtered(
			settings.integrations.as_deref(),
			&settings.disabled_integrations,
		);
		Self::new(&registry).with_max_depth(settings.max_depth)
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// The combined kind map
	pub fn kinds(&self) -> &KindMap {
		&self.kinds
	}

	/// Names of the integrations in merge order
	pub fn integration_names(&self) -> Vec<&str> {
		self.integrations.iter().map(|i| i.name()).collect()
	}

	/// Resolves every object and input type reachable from the schema.
	pub fn resolve_all(&self, schema: &Schema) -> ResourceMap {
		type_definitions(schema)
			.into_iter()
			.map(|object| {
				let fields = self.resolve_fields(schema, object, 0);
				(object.name.clone(), Resource::new(object.name.clone(), fields))
			})
			.collect()
	}

	/// Resolves a single object or input type by name.
	pub fn resolve_type(&self, schema: &Schema, name: &str) -> ResourceResult<Resource> {
		let object = schema
			.object(name)
			.ok_or_else(|| ResourceError::UnknownType(name.to_string()))?;
		Ok(Resource::new(
			object.name.clone(),
			self.resolve_fields(schema, object, 0),
		))
	}

	/// Resolves the fields of `owner`, in declaration order.
	pub fn resolve_fields(
		&self,
		schema: &Schema,
		owner: &ObjectType,
		depth: usize,
	) -> Vec<ResourceField> {
		owner
			.fields
			.iter()
			.filter_map(|field| self.resolve_field(schema, owner, field, depth))
			.collect()
	}

	fn resolve_field(
		&self,
		schema: &Schema,
		owner: &ObjectType,
		field: &FieldDefinition,
		depth: usize,
	) -> Option<ResourceField> {
		let name = field.api_name();
		let (declared, annotations) = field.type_ref.split_annotations();
		if annotations.contains(&Annotation::Hidden) {
			return None;
		}

		let mut options = FieldOptions::new()
			.label(field.name.clone())
			.validation(ValidationOptions::required(!declared.is_optional()));

		let mut is_list = false;
		let mut bound_vars: Vec<String> = Vec::new();
		let mut current = declared.clone();
		let leaf = loop {
			current = match current {
				TypeRef::Optional(inner) => *inner,
				TypeRef::List(inner) => {
					is_list = true;
					*inner
				}
				TypeRef::Annotated(inner, _) => *inner,
				TypeRef::Lazy(target) => match schema.resolve_lazy(&target) {
					Some(resolved) => resolved,
					None => {
						debug!("Skipping {}.{}: unresolvable reference {}", owner.name, name, target);
						return None;
					}
				},
				TypeRef::TypeVar(var) => match owner.type_var_map.get(&var) {
					Some(bound) if !bound_vars.contains(&var) => {
						bound_vars.push(var);
						bound.clone()
					}
					_ => {
						debug!("Skipping {}.{}: unbound type variable {}", owner.name, name, var);
						return None;
					}
				},
				other => break other,
			};
		};
		options = options.multiple(is_list);

		let leaf = match leaf {
			TypeRef::Enum(enumeration) => {
				let kind = if enumeration.is_integral() {
					FieldKind::Int
				} else {
					FieldKind::String
				};
				let choices = enumeration
					.members
					.iter()
					.map(|member| {
						let label = member.description.as_ref().unwrap_or(&member.name);
						FieldChoice::new(label.clone(), member.name.clone())
					})
					.collect();
				options = options.kind(kind).choices(choices);
				TypeRef::Native(enumeration.wrapped())
			}
			TypeRef::Scalar(scalar) => TypeRef::Native(scalar.wrap),
			other => other,
		};

		let mut hidden = false;
		let context = FieldContext {
			schema,
			owner,
			field,
			leaf: &leaf,
			is_list,
		};
		for integration in &self.integrations {
			match integration.field_options(&context) {
				Ok(contributed) => options = options.merge(contributed),
				Err(ResourceError::HiddenField) => {
					hidden = true;
					break;
				}
				Err(error) => warn!(
					"Integration {} failed on {}.{}: {}",
					integration.name(),
					owner.name,
					name,
					error
				),
			}
		}

		if options.kind.is_none()
			&& let TypeRef::Native(native) = &leaf
		{
			options.kind = self.kinds.classify(native);
		}

		if !hidden && let Some(markers) = author_annotations(owner, field) {
			for marker in markers {
				match marker {
					Annotation::Hidden => {
						hidden = true;
						break;
					}
					Annotation::Config(config) => {
						options = options.merge(config.options.clone());
					}
					Annotation::Marker(_) => {}
				}
			}
		}

		if hidden {
			debug!("Skipping hidden field {}.{}", owner.name, name);
			return None;
		}

		let leaf_object = match &leaf {
			TypeRef::Object(target) => schema.object(target),
			_ => None,
		};

		if options.obj_kind.is_some() || leaf_object.is_some() {
			let Some(object) = leaf_object else {
				let error = ResourceError::InvalidObjectKind {
					field: name,
					type_name: describe(&leaf).to_string(),
				};
				warn!("Skipping {}: {}", owner.name, error);
				return None;
			};

			if depth > self.max_depth {
				debug!(
					"Skipping {}.{}: depth {} exceeds max depth {}",
					owner.name, name, depth, self.max_depth
				);
				return None;
			}

			let obj_kind = options.obj_kind.unwrap_or_else(|| {
				FieldObjectKind::infer(options.multiple.unwrap_or(false), object.is_input)
			});

			return Some(ResourceField::Object(FieldObject {
				name,
				label: options.label.unwrap_or_else(|| field.name.clone()),
				obj_kind,
				obj_type: object.name.clone(),
				fields: self.resolve_fields(schema, object, depth + 1),
			}));
		}

		let Some(kind) = options.kind else {
			debug!("Skipping {}.{}: no kind for {}", owner.name, name, describe(&leaf));
			return None;
		};

		Some(ResourceField::Field(Field {
			name,
			kind,
			label: options.label.unwrap_or_else(|| field.name.clone()),
			multiple: options.multiple.unwrap_or(false),
			orderable: options.orderable.unwrap_or(false),
			filterable: options.filterable.unwrap_or(false),
			help_text: options.help_text,
			choices: options.choices,
			default_value: options.default_value,
			validation: options
				.validation
				.map(|validation| validation.build())
				.unwrap_or_default(),
			resource: options.resource,
		}))
	}
}

/// First annotated declaration among, in order: the field's own annotation,
/// its declared type, the class-level declared annotations, the
/// pre-transformation annotations and a computed accessor's return annotation.
fn author_annotations<'a>(
	owner: &'a ObjectType,
	field: &'a FieldDefinition,
) -> Option<&'a [Annotation]> {
	[
		field.annotation.as_ref(),
		Some(&field.type_ref),
		owner.declared_annotations.get(&field.name),
		owner.original_annotations.get(&field.name),
		owner.computed_annotations.get(&field.name),
	]
	.into_iter()
	.flatten()
	.find(|candidate| candidate.is_annotated())
	.map(|annotated| annotated.split_annotations().1)
}

fn describe(leaf: &TypeRef) -> &str {
	match leaf {
		TypeRef::Native(native) => native.name(),
		TypeRef::Object(name) | TypeRef::Lazy(name) | TypeRef::TypeVar(name) => name,
		TypeRef::Enum(enumeration) => &enumeration.name,
		TypeRef::Scalar(scalar) => &scalar.name,
		TypeRef::Union(union) => &union.name,
		TypeRef::Optional(_) => "Optional",
		TypeRef::List(_) => "List",
		TypeRef::Annotated(inner, _) => describe(inner),
	}
}

impl fmt::Debug for Resolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Resolver")
			.field("integrations", &self.integration_names())
			.field("kinds", &self.kinds.len())
			.field("max_depth", &self.max_depth)
			.finish()
	}
}
