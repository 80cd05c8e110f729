//! # Reinhardt Resources
//!
//! Field metadata for Reinhardt API schemas.
//!
//! Every object and input type of a schema is turned into a resource listing
//! its fields with a semantic kind, validation rules, a human label and list,
//! ordering and filtering flags. Form generators, admin panels and client
//! SDKs read this metadata instead of re-deriving it from the type system.
//!
//! ## Feature Flags
//!
//! - `orm` (default) - Model-backed classification via the ORM integration
//! - `graphql` - GraphQL query surface over resolved resources
//! - `full` - All features enabled
//!
//! ## Example
//!
//! ```
//! use reinhardt_resources::prelude::*;
//!
//! let schema = Schema::builder()
//! 	.object(
//! 		ObjectType::new("Post")
//! 			.field(FieldDefinition::new("title", TypeRef::native(NativeType::STR)))
//! 			.field(FieldDefinition::new(
//! 				"published_at",
//! 				TypeRef::optional(TypeRef::native(NativeType::DATETIME)),
//! 			)),
//! 	)
//! 	.build();
//!
//! let cache = ResourceCache::new(Resolver::new(IntegrationRegistry::global()));
//! let post = cache.get_by_name(&schema, "Post").unwrap();
//! assert_eq!(post.fields[1].name(), "publishedAt");
//! ```

pub use reinhardt_resources_core::*;

#[cfg(feature = "orm")]
pub use reinhardt_resources_orm as orm;

#[cfg(feature = "graphql")]
pub use reinhardt_resources_graphql as graphql;

/// Re-export commonly used types.
pub mod prelude {
	pub use reinhardt_resources_core::prelude::*;

	#[cfg(feature = "orm")]
	pub use reinhardt_resources_orm::prelude::*;

	#[cfg(feature = "graphql")]
	pub use reinhardt_resources_graphql::{ResourceContext, ResourceSchema, build_schema};
}
