use crate::types::ResourceType;
use async_graphql::{
	Context, EmptyMutation, EmptySubscription, Json, Object, Result as GqlResult, Schema,
};
use reinhardt_resources_core::{ExportOptions, ResourceCache, Schema as ApiSchema, to_value};
use serde_json::Value;
use std::sync::Arc;

/// Default maximum query depth limit.
///
/// Every nesting level of a resource costs two query levels (the object
/// field and its `fields` list), so this leaves room for a few levels.
pub const DEFAULT_MAX_QUERY_DEPTH: usize = 16;

/// Data shared by every query: the described schema and its resource cache
#[derive(Clone)]
pub struct ResourceContext {
	pub schema: Arc<ApiSchema>,
	pub cache: Arc<ResourceCache>,
}

impl ResourceContext {
	pub fn new(schema: Arc<ApiSchema>, cache: Arc<ResourceCache>) -> Self {
		Self { schema, cache }
	}
}

/// GraphQL Query root
pub struct ResourceQuery;

#[Object]
impl ResourceQuery {
	/// All resources of the schema, in discovery order
	async fn resources(&self, ctx: &Context<'_>) -> GqlResult<Vec<ResourceType>> {
		let context = ctx.data::<ResourceContext>()?;
		let resources = context.cache.get(&context.schema);
		Ok(resources.values().cloned().map(ResourceType).collect())
	}

	async fn resource(&self, ctx: &Context<'_>, name: String) -> GqlResult<Option<ResourceType>> {
		let context = ctx.data::<ResourceContext>()?;
		Ok(context
			.cache
			.get_by_name(&context.schema, &name)
			.map(ResourceType))
	}

	/// The export document, as written by the exporter
	async fn export(
		&self,
		ctx: &Context<'_>,
		remove_nulls: Option<bool>,
		remove_nested_types_fields: Option<bool>,
	) -> GqlResult<Json<Value>> {
		let context = ctx.data::<ResourceContext>()?;
		let options = ExportOptions::default()
			.remove_nulls(remove_nulls.unwrap_or(false))
			.remove_nested_types_fields(remove_nested_types_fields.unwrap_or(false));
		let resources = context.cache.get(&context.schema);
		let document = to_value(&resources, &options).inspect_err(|error| {
			tracing::error!(schema = %context.schema.id(), %error, "Resource export failed");
		})?;
		Ok(Json(document))
	}
}

pub type ResourceSchema = Schema<ResourceQuery, EmptyMutation, EmptySubscription>;

/// Create a GraphQL schema serving the resources of `context`.
pub fn build_schema(context: ResourceContext) -> ResourceSchema {
	build_schema_with_depth(context, DEFAULT_MAX_QUERY_DEPTH)
}

/// Create a GraphQL schema with a custom query depth limit.
pub fn build_schema_with_depth(context: ResourceContext, max_depth: usize) -> ResourceSchema {
	Schema::build(ResourceQuery, EmptyMutation, EmptySubscription)
		.data(context)
		.limit_depth(max_depth)
		.finish()
}
