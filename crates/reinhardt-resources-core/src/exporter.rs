//! JSON export of resolved resources
//!
//! The exported document maps every resource name to its metadata. Keys are
//! camel-cased, enum values render as their upper-case names and every
//! `fields` list becomes an object keyed by field name.

use crate::error::ResourceResult;
use crate::resolver::ResourceMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

const FLAG_KEYS: [&str; 3] = ["multiple", "orderable", "filterable"];

/// Export toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
	/// Drop null values and `false` flags to keep the output smaller
	pub remove_nulls: bool,
	/// Drop the fields of nested objects whose type is itself a resource
	pub remove_nested_types_fields: bool,
	/// Spaces per indentation level; 0 writes compact JSON
	pub indent: usize,
}

impl Default for ExportOptions {
	fn default() -> Self {
		Self {
			remove_nulls: false,
			remove_nested_types_fields: false,
			indent: 2,
		}
	}
}

impl ExportOptions {
	pub fn remove_nulls(mut self, remove_nulls: bool) -> Self {
		self.remove_nulls = remove_nulls;
		self
	}

	pub fn remove_nested_types_fields(mut self, remove: bool) -> Self {
		self.remove_nested_types_fields = remove;
		self
	}

	pub fn indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}
}

/// Converts resources into the export document.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::{to_value, ExportOptions, Field, FieldKind, Resource, ResourceMap};
///
/// let mut resources = ResourceMap::new();
/// resources.insert(
/// 	"User".to_string(),
/// 	Resource::new("User", vec![Field::new("email", FieldKind::Email, "email").into()]),
/// );
///
/// let document = to_value(&resources, &ExportOptions::default()).unwrap();
/// assert_eq!(document["User"]["fields"]["email"]["kind"], "EMAIL");
/// ```
pub fn to_value(resources: &ResourceMap, options: &ExportOptions) -> ResourceResult<Value> {
	let nested_types: HashSet<&str> = if options.remove_nested_types_fields {
		resources.keys().map(String::as_str).collect()
	} else {
		HashSet::new()
	};

	let mut document = Map::new();
	for (name, resource) in resources {
		let value = serde_json::to_value(resource)?;
		document.insert(name.clone(), fix(value, None, options, &nested_types));
	}
	Ok(Value::Object(document))
}

/// Writes the export document as JSON text
pub fn to_json(resources: &ResourceMap, options: &ExportOptions) -> ResourceResult<String> {
	let document = to_value(resources, options)?;
	if options.indent == 0 {
		return Ok(serde_json::to_string(&document)?);
	}

	let indent = " ".repeat(options.indent);
	let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
	let mut buffer = Vec::new();
	let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
	document.serialize(&mut serializer)?;
	// serde_json only ever writes valid UTF-8
	Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn fix(
	value: Value,
	key: Option<&str>,
	options: &ExportOptions,
	nested_types: &HashSet<&str>,
) -> Value {
	match value {
		Value::Object(map) => {
			let mut fixed = Map::new();
			for (k, v) in map {
				if options.remove_nulls
					&& (v.is_null() || (FLAG_KEYS.contains(&k.as_str()) && v == Value::Bool(false)))
				{
					continue;
				}
				let v = fix(v, Some(&k), options, nested_types);
				fixed.insert(k, v);
			}

			let is_nested_type = fixed.contains_key("objKind")
				&& fixed
					.get("objType")
					.and_then(Value::as_str)
					.is_some_and(|obj_type| nested_types.contains(obj_type));
			if is_nested_type {
				fixed.remove("fields");
			}

			Value::Object(fixed)
		}
		Value::Array(items) if key == Some("fields") => Value::Object(
			items
				.into_iter()
				.map(|item| {
					let name = item
						.get("name")
						.and_then(Value::as_str)
						.unwrap_or_default()
						.to_string();
					(name, fix(item, None, options, nested_types))
				})
				.collect(),
		),
		Value::Array(items) => Value::Array(
			items
				.into_iter()
				.map(|item| fix(item, None, options, nested_types))
				.collect(),
		),
		other => other,
	}
}
