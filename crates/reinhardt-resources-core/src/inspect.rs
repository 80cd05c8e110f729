//! Type graph walking
//!
//! Enumerates the object and input type definitions reachable from a schema's
//! type map. Each type name is yielded once, in declaration order.

use crate::schema::{ObjectType, Schema, TypeDefinition, TypeRef};
use std::collections::HashSet;

/// Collects the object definitions a type reference can stand for.
///
/// Containers, annotations and lazy references are looked through, unions
/// contribute each of their members and type variables are bound through the
/// owner's type variable map. Scalars and enums contribute nothing.
pub fn possible_types<'a: 't, 't>(
	schema: &'a Schema,
	type_ref: &'t TypeRef,
	owner: Option<&'a ObjectType>,
) -> Vec<&'a ObjectType> {
	let mut found = Vec::new();
	let mut unions = HashSet::new();
	collect(schema, type_ref, owner, &mut unions, &mut found);
	found
}

fn collect<'a: 't, 't>(
	schema: &'a Schema,
	type_ref: &'t TypeRef,
	owner: Option<&'a ObjectType>,
	unions: &mut HashSet<&'t str>,
	found: &mut Vec<&'a ObjectType>,
) {
	match type_ref {
		TypeRef::Native(_) | TypeRef::Enum(_) | TypeRef::Scalar(_) => {}
		TypeRef::Optional(inner) | TypeRef::List(inner) | TypeRef::Annotated(inner, _) => {
			collect(schema, inner, owner, unions, found)
		}
		TypeRef::Lazy(name) | TypeRef::Object(name) => match schema.get(name) {
			Some(TypeDefinition::Object(object)) => found.push(object),
			Some(TypeDefinition::Union(union)) => {
				if unions.insert(union.name.as_str()) {
					for member in &union.types {
						collect(schema, member, owner, unions, found);
					}
				}
			}
			_ => {}
		},
		TypeRef::Union(union) => {
			if unions.insert(union.name.as_str()) {
				for member in &union.types {
					collect(schema, member, owner, unions, found);
				}
			}
		}
		TypeRef::TypeVar(name) => {
			if let Some(bound) = owner.and_then(|o| o.type_var_map.get(name)) {
				collect(schema, bound, owner, unions, found);
			}
		}
	}
}

/// Returns every distinct object or input definition reachable from the
/// schema's type map.
///
/// Each entry of the map is walked as a reference to itself, so a union
/// definition yields its member objects.
///
/// # Examples
///
/// ```
/// use reinhardt_resources_core::{type_definitions, ObjectType, Schema, TypeRef, UnionDef};
///
/// let schema = Schema::builder()
/// 	.object(ObjectType::new("Cat"))
/// 	.object(ObjectType::new("Dog"))
/// 	.union(UnionDef::new("Pet", vec![TypeRef::object("Cat"), TypeRef::object("Dog")]))
/// 	.build();
///
/// let names: Vec<_> = type_definitions(&schema).iter().map(|t| t.name.as_str()).collect();
/// assert_eq!(names, ["Cat", "Dog"]);
/// ```
pub fn type_definitions(schema: &Schema) -> Vec<&ObjectType> {
	let mut seen = HashSet::new();
	let mut definitions = Vec::new();

	for definition in schema.types() {
		let reference = definition.to_type_ref();
		for object in possible_types(schema, &reference, None) {
			if seen.insert(object.name.as_str()) {
				definitions.push(object);
			}
		}
	}

	definitions
}
