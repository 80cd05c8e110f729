//! In-memory schema model
//!
//! A [`Schema`] is the already-typed object graph resources are derived from:
//! an ordered map of type names to object, input, enum, scalar and union
//! definitions. Field types are expressed as [`TypeRef`] trees which may wrap
//! the leaf in optional, list, lazy and annotated layers.

use crate::error::ResourceResult;
use crate::options::FieldOptionsConfig;
use convert_case::{Converter, Pattern};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a host-level scalar type, such as `str` or `Decimal`.
///
/// Integrations may introduce their own natives (for instance an ORM image
/// type) and map them to a kind through
/// [`Integration::extra_kind_mappings`](crate::Integration::extra_kind_mappings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeType(Cow<'static, str>);

impl NativeType {
	pub const BOOL: NativeType = NativeType::from_static("bool");
	pub const STR: NativeType = NativeType::from_static("str");
	pub const INT: NativeType = NativeType::from_static("int");
	pub const FLOAT: NativeType = NativeType::from_static("float");
	pub const DATE: NativeType = NativeType::from_static("date");
	pub const TIME: NativeType = NativeType::from_static("time");
	pub const DATETIME: NativeType = NativeType::from_static("datetime");
	pub const TIMEDELTA: NativeType = NativeType::from_static("timedelta");
	pub const DECIMAL: NativeType = NativeType::from_static("Decimal");
	pub const UUID: NativeType = NativeType::from_static("UUID");
	pub const ID: NativeType = NativeType::from_static("ID");
	pub const GLOBAL_ID: NativeType = NativeType::from_static("GlobalID");
	pub const UPLOAD: NativeType = NativeType::from_static("Upload");
	pub const JSON: NativeType = NativeType::from_static("JSON");

	pub const fn from_static(name: &'static str) -> Self {
		NativeType(Cow::Borrowed(name))
	}

	pub fn new(name: impl Into<String>) -> Self {
		NativeType(Cow::Owned(name.into()))
	}

	pub fn name(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NativeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&'static str> for NativeType {
	fn from(name: &'static str) -> Self {
		NativeType::from_static(name)
	}
}

/// Metadata attached to a type through [`TypeRef::Annotated`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
	/// Excludes the field from every resource
	Hidden,
	/// Author-supplied option overrides
	Config(FieldOptionsConfig),
	/// Foreign metadata, ignored by resolution
	Marker(String),
}

/// One member of an enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
	pub name: String,
	pub value: serde_json::Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl EnumMember {
	pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			description: None,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
	pub name: String,
	pub members: Vec<EnumMember>,
	/// Representation type; defaults to a native named after the enum.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wrap: Option<NativeType>,
}

impl EnumDef {
	pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
		Self {
			name: name.into(),
			members,
			wrap: None,
		}
	}

	/// The representation type used for classification once the enum is unwrapped
	pub fn wrapped(&self) -> NativeType {
		self.wrap
			.clone()
			.unwrap_or_else(|| NativeType::new(self.name.clone()))
	}

	/// Returns true if every member value is an integer
	pub fn is_integral(&self) -> bool {
		self.members
			.iter()
			.all(|m| m.value.is_i64() || m.value.is_u64())
	}
}

/// A named custom scalar and the native it is represented by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarDef {
	pub name: String,
	pub wrap: NativeType,
}

impl ScalarDef {
	pub fn new(name: impl Into<String>, wrap: NativeType) -> Self {
		Self {
			name: name.into(),
			wrap,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDef {
	pub name: String,
	pub types: Vec<TypeRef>,
}

impl UnionDef {
	pub fn new(name: impl Into<String>, types: Vec<TypeRef>) -> Self {
		Self {
			name: name.into(),
			types,
		}
	}
}

/// A declared field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
	Native(NativeType),
	Optional(Box<TypeRef>),
	List(Box<TypeRef>),
	/// Forward reference, resolved against the schema by name
	Lazy(String),
	/// Reference to a declared object or input type
	Object(String),
	Enum(EnumDef),
	Scalar(ScalarDef),
	Union(UnionDef),
	/// Generic placeholder, bound through the owner's type variable map
	TypeVar(String),
	Annotated(Box<TypeRef>, Vec<Annotation>),
}

impl TypeRef {
	pub fn native(native: impl Into<NativeType>) -> Self {
		TypeRef::Native(native.into())
	}

	pub fn optional(inner: TypeRef) -> Self {
		TypeRef::Optional(Box::new(inner))
	}

	pub fn list(inner: TypeRef) -> Self {
		TypeRef::List(Box::new(inner))
	}

	pub fn object(name: impl Into<String>) -> Self {
		TypeRef::Object(name.into())
	}

	pub fn lazy(name: impl Into<String>) -> Self {
		TypeRef::Lazy(name.into())
	}

	pub fn type_var(name: impl Into<String>) -> Self {
		TypeRef::TypeVar(name.into())
	}

	pub fn annotated(inner: TypeRef, annotations: Vec<Annotation>) -> Self {
		TypeRef::Annotated(Box::new(inner), annotations)
	}

	/// Splits off the outermost annotation layer.
	///
	/// Returns the inner type and its annotations, or the type itself with
	/// no annotations.
	pub fn split_annotations(&self) -> (&TypeRef, &[Annotation]) {
		match self {
			TypeRef::Annotated(inner, annotations) => (inner, annotations),
			other => (other, &[]),
		}
	}

	/// Returns true if the outermost (unannotated) layer is optional
	pub fn is_optional(&self) -> bool {
		match self {
			TypeRef::Optional(_) => true,
			TypeRef::Annotated(inner, _) => inner.is_optional(),
			_ => false,
		}
	}

	/// Returns true if this is an annotation layer
	pub fn is_annotated(&self) -> bool {
		matches!(self, TypeRef::Annotated(..))
	}
}

impl From<NativeType> for TypeRef {
	fn from(native: NativeType) -> Self {
		TypeRef::Native(native)
	}
}

/// A field declared on an object or input type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
	/// Declaration name
	pub name: String,
	/// API-facing name override
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub graphql_name: Option<String>,
	#[serde(rename = "type")]
	pub type_ref: TypeRef,
	/// Author annotation attached directly to the declaration
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub annotation: Option<TypeRef>,
}

impl FieldDefinition {
	pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
		Self {
			name: name.into(),
			graphql_name: None,
			type_ref,
			annotation: None,
		}
	}

	pub fn graphql_name(mut self, name: impl Into<String>) -> Self {
		self.graphql_name = Some(name.into());
		self
	}

	pub fn annotation(mut self, annotation: TypeRef) -> Self {
		self.annotation = Some(annotation);
		self
	}

	/// API-facing name: the override if any, else the camel-cased declaration name.
	///
	/// Only underscores separate words. The first word is kept as declared and
	/// every following word is capitalized; an empty word (from a doubled or
	/// trailing underscore) keeps its underscore.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_resources_core::{FieldDefinition, NativeType, TypeRef};
	///
	/// let field = FieldDefinition::new("created_at", TypeRef::native(NativeType::DATETIME));
	/// assert_eq!(field.api_name(), "createdAt");
	/// ```
	pub fn api_name(&self) -> String {
		match &self.graphql_name {
			Some(name) => name.clone(),
			None => camel_case(&self.name),
		}
	}
}

fn camel_case(name: &str) -> String {
	// A single word per component: digits and acronyms are not boundaries
	let capital = Converter::new()
		.set_boundaries(&[])
		.set_pattern(Pattern::Capital);

	let mut components = name.split('_');
	let mut camel = components.next().unwrap_or_default().to_string();
	for component in components {
		if component.is_empty() {
			camel.push('_');
		} else {
			camel.push_str(&capital.convert(component));
		}
	}
	camel
}

/// An object or input type definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectType {
	pub name: String,
	pub is_input: bool,
	pub fields: Vec<FieldDefinition>,
	/// Name of the generic type this type specialises (e.g. `ListInput`)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub generic_origin: Option<String>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub type_var_map: IndexMap<String, TypeRef>,
	/// Class-level annotations, inherited ones included
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub declared_annotations: IndexMap<String, TypeRef>,
	/// Annotations as declared before any transformation
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub original_annotations: IndexMap<String, TypeRef>,
	/// Return annotations of computed accessors
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub computed_annotations: IndexMap<String, TypeRef>,
}

impl ObjectType {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	/// Creates an input type
	pub fn input(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			is_input: true,
			..Default::default()
		}
	}

	pub fn field(mut self, field: FieldDefinition) -> Self {
		self.fields.push(field);
		self
	}

	pub fn generic_origin(mut self, origin: impl Into<String>) -> Self {
		self.generic_origin = Some(origin.into());
		self
	}

	pub fn type_var(mut self, name: impl Into<String>, bound: TypeRef) -> Self {
		self.type_var_map.insert(name.into(), bound);
		self
	}

	pub fn declared_annotation(mut self, field: impl Into<String>, annotation: TypeRef) -> Self {
		self.declared_annotations.insert(field.into(), annotation);
		self
	}

	pub fn original_annotation(mut self, field: impl Into<String>, annotation: TypeRef) -> Self {
		self.original_annotations.insert(field.into(), annotation);
		self
	}

	pub fn computed_annotation(mut self, field: impl Into<String>, annotation: TypeRef) -> Self {
		self.computed_annotations.insert(field.into(), annotation);
		self
	}

	/// Looks up a declared field by declaration name
	pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// A named entry in a schema's type map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDefinition {
	Object(ObjectType),
	Enum(EnumDef),
	Scalar(ScalarDef),
	Union(UnionDef),
}

impl TypeDefinition {
	pub fn name(&self) -> &str {
		match self {
			TypeDefinition::Object(o) => &o.name,
			TypeDefinition::Enum(e) => &e.name,
			TypeDefinition::Scalar(s) => &s.name,
			TypeDefinition::Union(u) => &u.name,
		}
	}

	/// A reference to this definition usable as a field type
	pub fn to_type_ref(&self) -> TypeRef {
		match self {
			TypeDefinition::Object(o) => TypeRef::Object(o.name.clone()),
			TypeDefinition::Enum(e) => TypeRef::Enum(e.clone()),
			TypeDefinition::Scalar(s) => TypeRef::Scalar(s.clone()),
			TypeDefinition::Union(u) => TypeRef::Union(u.clone()),
		}
	}
}

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Schema`] instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
	fn next() -> Self {
		SchemaId(NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u64(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for SchemaId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "schema#{}", self.0)
	}
}

/// The schema resources are derived from.
///
/// Each instance gets a fresh [`SchemaId`], including when deserialized, so
/// two structurally equal schemas never share a cache entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Schema {
	#[serde(skip, default = "SchemaId::next")]
	id: SchemaId,
	types: IndexMap<String, TypeDefinition>,
}

impl Schema {
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder::new()
	}

	/// Parses a schema document
	pub fn from_json(json: &str) -> ResourceResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn id(&self) -> SchemaId {
		self.id
	}

	/// Type definitions in declaration order
	pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
		self.types.values()
	}

	pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
		self.types.get(name)
	}

	/// Looks up an object or input type by name
	pub fn object(&self, name: &str) -> Option<&ObjectType> {
		match self.types.get(name) {
			Some(TypeDefinition::Object(object)) => Some(object),
			_ => None,
		}
	}

	/// Resolves a forward reference
	pub fn resolve_lazy(&self, name: &str) -> Option<TypeRef> {
		self.types.get(name).map(TypeDefinition::to_type_ref)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

/// Builder for [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
	types: IndexMap<String, TypeDefinition>,
}

impl SchemaBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a definition; a later definition with the same name replaces the earlier one
	pub fn definition(mut self, definition: TypeDefinition) -> Self {
		self.types
			.insert(definition.name().to_string(), definition);
		self
	}

	pub fn object(self, object: ObjectType) -> Self {
		self.definition(TypeDefinition::Object(object))
	}

	pub fn enumeration(self, enumeration: EnumDef) -> Self {
		self.definition(TypeDefinition::Enum(enumeration))
	}

	pub fn scalar(self, scalar: ScalarDef) -> Self {
		self.definition(TypeDefinition::Scalar(scalar))
	}

	pub fn union(self, union: UnionDef) -> Self {
		self.definition(TypeDefinition::Union(union))
	}

	pub fn build(self) -> Schema {
		Schema {
			id: SchemaId::next(),
			types: self.types,
		}
	}
}
