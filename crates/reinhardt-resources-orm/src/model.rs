//! Models and their bindings to schema types
//!
//! A [`ModelBinding`] ties a schema type name to the [`ModelMeta`] it exposes,
//! together with the fields the type allows ordering and filtering on.
//! Bindings live in a [`ModelBindingRegistry`]; the process-wide one is
//! returned by [`global_bindings`].

use crate::fields::ModelField;
use indexmap::IndexMap;
use parking_lot::RwLock;
use reinhardt_resources_core::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Model metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMeta {
	/// Model name (e.g., "User", "Post")
	pub name: String,
	#[serde(default)]
	pub fields: Vec<ModelField>,
	/// Return annotations of model properties, keyed by property name
	#[serde(default)]
	pub properties: IndexMap<String, TypeRef>,
}

impl ModelMeta {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn field(mut self, field: ModelField) -> Self {
		self.fields.push(field);
		self
	}

	pub fn property(mut self, name: impl Into<String>, annotation: TypeRef) -> Self {
		self.properties.insert(name.into(), annotation);
		self
	}

	pub fn get_field(&self, name: &str) -> Option<&ModelField> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// Binds a schema type to a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBinding {
	/// Schema type name (e.g., "UserType")
	pub type_name: String,
	pub model: ModelMeta,
	/// Fields the type can be ordered by; ordering is unsupported when absent
	#[serde(default)]
	pub ordering: Option<HashSet<String>>,
	/// Fields the type can be filtered by; filtering is unsupported when absent
	#[serde(default)]
	pub filters: Option<HashSet<String>>,
}

impl ModelBinding {
	pub fn new(type_name: impl Into<String>, model: ModelMeta) -> Self {
		Self {
			type_name: type_name.into(),
			model,
			ordering: None,
			filters: None,
		}
	}

	pub fn ordering<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ordering = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	pub fn filters<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.filters = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Whether `field` is orderable, or `None` when the type has no ordering
	pub fn is_orderable(&self, field: &str) -> Option<bool> {
		self.ordering.as_ref().map(|fields| fields.contains(field))
	}

	/// Whether `field` is filterable, or `None` when the type has no filters
	pub fn is_filterable(&self, field: &str) -> Option<bool> {
		self.filters.as_ref().map(|fields| fields.contains(field))
	}
}

/// Registry of model bindings keyed by schema type name
#[derive(Debug, Clone, Default)]
pub struct ModelBindingRegistry {
	bindings: Arc<RwLock<HashMap<String, Arc<ModelBinding>>>>,
}

impl ModelBindingRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a binding, replacing any previous binding of the same type
	pub fn register(&self, binding: ModelBinding) {
		self.bindings
			.write()
			.insert(binding.type_name.clone(), Arc::new(binding));
	}

	pub fn get(&self, type_name: &str) -> Option<Arc<ModelBinding>> {
		self.bindings.read().get(type_name).cloned()
	}

	pub fn remove(&self, type_name: &str) -> bool {
		self.bindings.write().remove(type_name).is_some()
	}

	pub fn clear(&self) {
		self.bindings.write().clear();
	}

	pub fn count(&self) -> usize {
		self.bindings.read().len()
	}
}

/// Global binding registry instance
///
/// Read by the ORM integration registered for discovery.
pub fn global_bindings() -> &'static ModelBindingRegistry {
	use once_cell::sync::Lazy;
	static REGISTRY: Lazy<ModelBindingRegistry> = Lazy::new(ModelBindingRegistry::new);
	&REGISTRY
}
