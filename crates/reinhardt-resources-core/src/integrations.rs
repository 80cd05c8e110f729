//! Pluggable field classifiers
//!
//! An [`Integration`] bridges resolution to an external data-modeling layer:
//! it can extend the kind map with its own native types and contribute
//! options for every field it knows about.
//!
//! Integrations are registered explicitly on an [`IntegrationRegistry`], or
//! statically with [`register_integration!`](crate::register_integration) so
//! that [`IntegrationRegistry::discover`] picks them up.

use crate::error::{ResourceError, ResourceResult};
use crate::options::FieldOptions;
use crate::schema::{FieldDefinition, NativeType, ObjectType, Schema, TypeRef};
use crate::types::FieldKind;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Everything an integration gets to see about the field being resolved
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
	pub schema: &'a Schema,
	/// The type declaring the field
	pub owner: &'a ObjectType,
	pub field: &'a FieldDefinition,
	/// The field type with containers, lazy references, enums and scalars unwrapped
	pub leaf: &'a TypeRef,
	/// Whether a list wrapper was found while unwrapping
	pub is_list: bool,
}

impl<'a> FieldContext<'a> {
	/// The object or input definition the leaf refers to, if any
	pub fn leaf_object(&self) -> Option<&'a ObjectType> {
		match self.leaf {
			TypeRef::Object(name) | TypeRef::Lazy(name) => self.schema.object(name),
			_ => None,
		}
	}

	/// The native type of the leaf, if it is one
	pub fn leaf_native(&self) -> Option<&'a NativeType> {
		match self.leaf {
			TypeRef::Native(native) => Some(native),
			_ => None,
		}
	}
}

/// A pluggable classifier.
pub trait Integration: Send + Sync {
	/// Unique name; registering another integration with the same name replaces this one.
	fn name(&self) -> &str;

	/// Merge priority. Lower values are merged first and may be overridden
	/// by integrations with a higher ordering.
	fn ordering(&self) -> i32 {
		0
	}

	/// Native types this integration knows how to classify.
	fn extra_kind_mappings(&self) -> Vec<(NativeType, FieldKind)> {
		Vec::new()
	}

	/// Options for one field.
	///
	/// Returning [`ResourceError::HiddenField`] excludes the field. Any other
	/// error is logged and ignored.
	fn field_options(&self, context: &FieldContext<'_>) -> ResourceResult<FieldOptions>;
}

/// Static registration entry collected by [`IntegrationRegistry::discover`].
pub struct IntegrationFactory {
	pub name: &'static str,
	pub create: fn() -> ResourceResult<Arc<dyn Integration>>,
}

inventory::collect!(IntegrationFactory);

/// Register an integration factory for discovery
///
/// # Example
///
/// ```rust,ignore
/// use reinhardt_resources_core::register_integration;
///
/// register_integration!("orm", || Ok(std::sync::Arc::new(OrmIntegration::global())));
/// ```
#[macro_export]
macro_rules! register_integration {
	($name:expr, $create:expr) => {
		$crate::inventory::submit! {
			$crate::IntegrationFactory {
				name: $name,
				create: $create,
			}
		}
	};
}

static GLOBAL_REGISTRY: Lazy<IntegrationRegistry> = Lazy::new(IntegrationRegistry::discover);

/// An ordered, named set of integrations
#[derive(Clone, Default)]
pub struct IntegrationRegistry {
	integrations: Vec<Arc<dyn Integration>>,
}

impl IntegrationRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The process-wide registry, discovered on first access
	pub fn global() -> &'static IntegrationRegistry {
		&GLOBAL_REGISTRY
	}

	/// Instantiates every statically registered integration.
	///
	/// Factories run in name order. A failing factory is logged and
	/// skipped; the others still register.
	pub fn discover() -> Self {
		let mut factories: Vec<&IntegrationFactory> =
			inventory::iter::<IntegrationFactory>.into_iter().collect();
		factories.sort_by_key(|factory| factory.name);

		let mut registry = Self::new();
		for factory in factories {
			match (factory.create)() {
				Ok(integration) => registry.register(integration),
				Err(error) => {
					let error = match error {
						ResourceError::IntegrationRegistration { .. } => error,
						other => ResourceError::IntegrationRegistration {
							name: factory.name.to_string(),
							message: other.to_string(),
						},
					};
					tracing::warn!("Skipping integration: {}", error);
				}
			}
		}

		tracing::info!("Discovered {} resource integration(s)", registry.len());
		registry
	}

	/// Registers an integration.
	///
	/// An integration with the same name is replaced in place, keeping its
	/// registration slot.
	pub fn register(&mut self, integration: Arc<dyn Integration>) {
		match self
			.integrations
			.iter()
			.position(|existing| existing.name() == integration.name())
		{
			Some(index) => self.integrations[index] = integration,
			None => self.integrations.push(integration),
		}
	}

	pub fn with(mut self, integration: Arc<dyn Integration>) -> Self {
		self.register(integration);
		self
	}

	pub fn get(&self, name: &str) -> Option<Arc<dyn Integration>> {
		self.integrations
			.iter()
			.find(|integration| integration.name() == name)
			.cloned()
	}

	/// Names in registration order
	pub fn names(&self) -> Vec<&str> {
		self.integrations.iter().map(|i| i.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.integrations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.integrations.is_empty()
	}

	/// Integrations in merge order: ascending ordering, ties in registration order
	pub fn sorted(&self) -> Vec<Arc<dyn Integration>> {
		let mut sorted = self.integrations.clone();
		sorted.sort_by_key(|integration| integration.ordering());
		sorted
	}

	/// Keeps the integrations in the allow-list (all when `None`) minus the disabled ones
	pub fn filtered(&self, enabled: Option<&[String]>, disabled: &[String]) -> Self {
		let integrations = self
			.integrations
			.iter()
			.filter(|integration| {
				let name = integration.name();
				enabled.is_none_or(|names| names.iter().any(|n| n == name))
					&& !disabled.iter().any(|n| n == name)
			})
			.cloned()
			.collect();
		Self { integrations }
	}
}

impl fmt::Debug for IntegrationRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IntegrationRegistry")
			.field("integrations", &self.names())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Mutex;
	use tracing_subscriber::layer::SubscriberExt as _;
	use tracing_subscriber::util::SubscriberInitExt as _;

	struct Named {
		name: &'static str,
		ordering: i32,
		label: &'static str,
	}

	impl Integration for Named {
		fn name(&self) -> &str {
			self.name
		}

		fn ordering(&self) -> i32 {
			self.ordering
		}

		fn field_options(&self, _context: &FieldContext<'_>) -> ResourceResult<FieldOptions> {
			Ok(FieldOptions::new().label(self.label))
		}
	}

	fn named(name: &'static str, ordering: i32) -> Arc<dyn Integration> {
		Arc::new(Named {
			name,
			ordering,
			label: name,
		})
	}

	register_integration!("test-discovered", || Ok(named("test-discovered", 5)));
	register_integration!("test-broken", || {
		Err(ResourceError::Settings("missing model registry".to_string()))
	});

	#[rstest]
	fn test_sorted_is_stable_by_ordering() {
		// Arrange
		let registry = IntegrationRegistry::new()
			.with(named("late", 10))
			.with(named("first", 0))
			.with(named("second", 0))
			.with(named("early", -1));

		// Act
		let sorted = registry.sorted();

		// Assert
		let names: Vec<_> = sorted.iter().map(|i| i.name()).collect();
		assert_eq!(names, ["early", "first", "second", "late"]);
		assert_eq!(registry.names(), ["late", "first", "second", "early"]);
	}

	#[rstest]
	fn test_register_same_name_replaces_in_place() {
		let mut registry = IntegrationRegistry::new()
			.with(named("a", 0))
			.with(named("b", 0));

		registry.register(named("a", 7));

		assert_eq!(registry.names(), ["a", "b"]);
		assert_eq!(registry.get("a").unwrap().ordering(), 7);
		assert_eq!(registry.len(), 2);
	}

	#[rstest]
	#[case(None, &[], &["a", "b", "c"])]
	#[case(Some(vec!["a".to_string(), "c".to_string()]), &[], &["a", "c"])]
	#[case(None, &["b"], &["a", "c"])]
	#[case(Some(vec!["a".to_string(), "b".to_string()]), &["a"], &["b"])]
	fn test_filtered(
		#[case] enabled: Option<Vec<String>>,
		#[case] disabled: &[&str],
		#[case] expected: &[&str],
	) {
		let registry = IntegrationRegistry::new()
			.with(named("a", 0))
			.with(named("b", 0))
			.with(named("c", 0));
		let disabled: Vec<String> = disabled.iter().map(|s| s.to_string()).collect();

		let filtered = registry.filtered(enabled.as_deref(), &disabled);

		assert_eq!(filtered.names(), expected);
	}

	#[rstest]
	fn test_discover_skips_failing_factories() {
		// Arrange
		struct LogCapture {
			logs: Arc<Mutex<Vec<String>>>,
		}

		impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
			fn on_event(
				&self,
				event: &tracing::Event<'_>,
				_ctx: tracing_subscriber::layer::Context<'_, S>,
			) {
				struct MessageVisitor {
					message: String,
				}

				impl tracing::field::Visit for MessageVisitor {
					fn record_debug(
						&mut self,
						field: &tracing::field::Field,
						value: &dyn std::fmt::Debug,
					) {
						if field.name() == "message" {
							self.message = format!("{:?}", value);
						}
					}
				}

				let mut visitor = MessageVisitor {
					message: String::new(),
				};
				event.record(&mut visitor);

				self.logs.lock().unwrap().push(format!(
					"[{}] {}",
					event.metadata().level(),
					visitor.message
				));
			}
		}

		let logs = Arc::new(Mutex::new(Vec::new()));
		let capture = LogCapture { logs: logs.clone() };
		let _guard = tracing_subscriber::registry().with(capture).set_default();

		// Act
		let registry = IntegrationRegistry::discover();

		// Assert
		assert!(registry.get("test-discovered").is_some());
		assert!(registry.get("test-broken").is_none());
		let captured = logs.lock().unwrap();
		assert!(
			captured
				.iter()
				.any(|log| log.contains("WARN") && log.contains("test-broken")),
			"Expected a warning for the broken integration, got: {:?}",
			*captured
		);
	}

	#[rstest]
	fn test_global_is_discovered_once() {
		let first = IntegrationRegistry::global();
		let second = IntegrationRegistry::global();

		assert!(std::ptr::eq(first, second));
		assert!(first.get("test-discovered").is_some());
	}
}
