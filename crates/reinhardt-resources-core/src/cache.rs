//! Per-schema memoization of resolved resources

use crate::resolver::{ResourceMap, Resolver};
use crate::schema::{Schema, SchemaId};
use crate::types::Resource;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoizes the resource map of every schema it is asked about.
///
/// The first request for a schema resolves it; concurrent first requests
/// for the same schema wait for that single resolution instead of repeating
/// it. Entries live as long as the cache.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::{ObjectType, ResourceCache, Resolver, Schema};
/// use std::sync::Arc;
///
/// let schema = Schema::builder().object(ObjectType::new("User")).build();
/// let cache = ResourceCache::new(Resolver::default());
///
/// let first = cache.get(&schema);
/// let second = cache.get(&schema);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct ResourceCache {
	resolver: Resolver,
	entries: Mutex<HashMap<SchemaId, Arc<OnceCell<Arc<ResourceMap>>>>>,
}

impl Default for ResourceCache {
	fn default() -> Self {
		Self::new(Resolver::default())
	}
}

impl ResourceCache {
	pub fn new(resolver: Resolver) -> Self {
		Self {
			resolver,
			entries: Mutex::new(HashMap::new()),
		}
	}

	pub fn resolver(&self) -> &Resolver {
		&self.resolver
	}

	/// Returns the resource map of a schema, resolving it on first access
	pub fn get(&self, schema: &Schema) -> Arc<ResourceMap> {
		let cell = {
			let mut entries = self.entries.lock();
			entries.entry(schema.id()).or_default().clone()
		};

		cell.get_or_init(|| {
			tracing::debug!("Resolving resources for {}", schema.id());
			let resources = self.resolver.resolve_all(schema);
			tracing::debug!("Resolved {} resource(s) for {}", resources.len(), schema.id());
			Arc::new(resources)
		})
		.clone()
	}

	/// Returns one resource of a schema by type name
	pub fn get_by_name(&self, schema: &Schema, name: &str) -> Option<Resource> {
		self.get(schema).get(name).cloned()
	}

	/// Returns true if the schema has already been resolved
	pub fn contains(&self, schema: &Schema) -> bool {
		self.entries
			.lock()
			.get(&schema.id())
			.is_some_and(|cell| cell.get().is_some())
	}

	/// Number of resolved schemas
	pub fn len(&self) -> usize {
		self.entries
			.lock()
			.values()
			.filter(|cell| cell.get().is_some())
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
