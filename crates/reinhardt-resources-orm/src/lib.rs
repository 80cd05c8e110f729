//! ORM model integration for Reinhardt resources
//!
//! Binds schema types to model metadata so that resolution can take labels,
//! help texts, defaults, choices, and field kinds from the model instead of
//! from the bare schema type.
//!
//! ## Example
//!
//! ```
//! use reinhardt_resources_core::prelude::*;
//! use reinhardt_resources_orm::prelude::*;
//! use std::sync::Arc;
//!
//! let bindings = ModelBindingRegistry::new();
//! bindings.register(ModelBinding::new(
//! 	"UserType",
//! 	ModelMeta::new("User").field(ModelField::char("username", 150).verbose_name("Username")),
//! ));
//!
//! let registry = IntegrationRegistry::new().with(Arc::new(OrmIntegration::new(bindings)));
//! let schema = Schema::builder()
//! 	.object(
//! 		ObjectType::new("UserType")
//! 			.field(FieldDefinition::new("username", TypeRef::native(NativeType::STR))),
//! 	)
//! 	.build();
//!
//! let resource = Resolver::new(&registry).resolve_type(&schema, "UserType").unwrap();
//! assert_eq!(resource.fields[0].label(), "Username");
//! ```
//!
//! Linking this crate registers the integration for
//! [`IntegrationRegistry::discover`](reinhardt_resources_core::IntegrationRegistry::discover);
//! it reads the bindings of [`global_bindings`].

pub mod fields;
pub mod integration;
pub mod model;

pub use fields::{ModelChoice, ModelDefault, ModelField, ModelFieldType};
pub use integration::{FIELD_FILE, IMAGE_FILE, LIST_INPUT, ORM_INTEGRATION, OrmIntegration, kind_options};
pub use model::{ModelBinding, ModelBindingRegistry, ModelMeta, global_bindings};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::fields::{ModelField, ModelFieldType};
	pub use crate::integration::OrmIntegration;
	pub use crate::model::{ModelBinding, ModelBindingRegistry, ModelMeta, global_bindings};
}
