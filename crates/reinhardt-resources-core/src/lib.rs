//! Reinhardt Resources - field metadata for API schemas
//!
//! Derives, for every object and input type of a schema, a [`Resource`]
//! describing each field: its semantic [`FieldKind`], validation rules, human
//! label and whether it is a list, orderable, filterable or hidden. Form
//! generators, admin UIs and client SDKs consume this metadata instead of
//! re-deriving it from the type system.
//!
//! # Quick Start
//!
//! ```
//! use reinhardt_resources_core::prelude::*;
//!
//! let schema = Schema::builder()
//! 	.object(
//! 		ObjectType::new("User")
//! 			.field(FieldDefinition::new("email", TypeRef::native(NativeType::STR)))
//! 			.field(FieldDefinition::new(
//! 				"password",
//! 				TypeRef::annotated(TypeRef::native(NativeType::STR), vec![Annotation::Hidden]),
//! 			)),
//! 	)
//! 	.build();
//!
//! let cache = ResourceCache::new(Resolver::default());
//! let user = cache.get_by_name(&schema, "User").unwrap();
//! assert_eq!(user.fields.len(), 1);
//! ```
//!
//! # Integrations
//!
//! An [`Integration`] enriches classification from an external modeling
//! layer. Register one on an [`IntegrationRegistry`], or statically:
//!
//! ```ignore
//! use reinhardt_resources_core::register_integration;
//! use std::sync::Arc;
//!
//! register_integration!("my-integration", || Ok(Arc::new(MyIntegration::new())));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ResourceCache ──► Resolver ──► type_definitions (walker)
//!                      │
//!                      ├── KindMap (built-in + integration mappings)
//!                      ├── Integrations (ordered, merged)
//!                      └── author annotations (merged last)
//! ```

pub mod cache;
pub mod error;
pub mod exporter;
pub mod inspect;
pub mod integrations;
pub mod kind;
pub mod merge;
pub mod options;
pub mod resolver;
pub mod schema;
pub mod settings;
pub mod types;

pub use cache::ResourceCache;
pub use error::{ResourceError, ResourceResult};
pub use exporter::{ExportOptions, to_json, to_value};
pub use inspect::{possible_types, type_definitions};
pub use integrations::{FieldContext, Integration, IntegrationFactory, IntegrationRegistry};
pub use kind::KindMap;
pub use merge::{Merge, merge_json};
pub use options::{FieldOptions, FieldOptionsConfig, ValidationKind, ValidationOptions, config};
pub use resolver::{DEFAULT_MAX_DEPTH, ResourceMap, Resolver};
pub use schema::{
	Annotation, EnumDef, EnumMember, FieldDefinition, NativeType, ObjectType, ScalarDef, Schema,
	SchemaBuilder, SchemaId, TypeDefinition, TypeRef, UnionDef,
};
pub use settings::ResourceSettings;
pub use types::{
	BaseFieldValidation, DecimalFieldValidation, Field, FieldChoice, FieldKind, FieldObject,
	FieldObjectKind, FieldValidation, IntFieldValidation, Resource, ResourceField,
	StringFieldValidation,
};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::cache::ResourceCache;
	pub use crate::error::{ResourceError, ResourceResult};
	pub use crate::exporter::ExportOptions;
	pub use crate::integrations::{FieldContext, Integration, IntegrationRegistry};
	pub use crate::options::{FieldOptions, ValidationOptions, config};
	pub use crate::register_integration;
	pub use crate::resolver::{ResourceMap, Resolver};
	pub use crate::schema::{
		Annotation, EnumDef, EnumMember, FieldDefinition, NativeType, ObjectType, ScalarDef,
		Schema, TypeRef, UnionDef,
	};
	pub use crate::settings::ResourceSettings;
	pub use crate::types::{
		Field, FieldChoice, FieldKind, FieldObject, FieldObjectKind, FieldValidation, Resource,
		ResourceField,
	};
}

// Re-export inventory for integration registration
pub use inventory;
