//! GraphQL query surface for Reinhardt resources
//!
//! Serves resolved resources through an `async-graphql` schema:
//!
//! ```graphql
//! {
//!   resource(name: "User") {
//!     fields {
//!       ... on Field { name kind required }
//!       ... on FieldObject { name objKind objType }
//!     }
//!   }
//! }
//! ```
//!
//! The `export` query returns the same JSON document the exporter writes.

pub mod schema;
pub mod types;

pub use schema::{
	DEFAULT_MAX_QUERY_DEPTH, ResourceContext, ResourceQuery, ResourceSchema, build_schema,
	build_schema_with_depth,
};
pub use types::{
	BaseValidationType, ChoiceType, DecimalValidationType, FieldObjectType, FieldType,
	FieldValidationType, IntValidationType, ResourceFieldType, ResourceType, StringValidationType,
};
