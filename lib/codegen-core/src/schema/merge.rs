use graphql_tools::static_graphql::schema::{Definition, TypeDefinition};

use crate::schema::ResolvedSchema;

/// Structural union of a primary schema and an optional client schema.
///
/// Client-only types, directives and fields are appended; on a name
/// collision the primary definition wins silently. This is not a deep
/// reconciliation: conflicting field types between the two schemas are the
/// caller's responsibility to avoid.
pub fn merge(primary: ResolvedSchema, client: Option<ResolvedSchema>) -> ResolvedSchema {
    let client = match client {
        Some(client) => client,
        None => return primary,
    };

    let mut merged = primary;
    for definition in client.document.definitions {
        match definition {
            Definition::SchemaDefinition(schema_def) => {
                let already_defined = merged
                    .document
                    .definitions
                    .iter()
                    .any(|d| matches!(d, Definition::SchemaDefinition(_)));
                if !already_defined {
                    merged
                        .document
                        .definitions
                        .push(Definition::SchemaDefinition(schema_def));
                }
            }
            Definition::TypeDefinition(type_def) => merge_type(&mut merged, type_def),
            Definition::DirectiveDefinition(directive_def) => {
                let already_defined = merged.document.definitions.iter().any(|d| {
                    matches!(d, Definition::DirectiveDefinition(existing) if existing.name == directive_def.name)
                });
                if !already_defined {
                    merged
                        .document
                        .definitions
                        .push(Definition::DirectiveDefinition(directive_def));
                }
            }
            // Extensions never collide by name; carry them over as-is.
            extension @ Definition::TypeExtension(_) => {
                merged.document.definitions.push(extension);
            }
        }
    }
    merged
}

fn merge_type(merged: &mut ResolvedSchema, incoming: TypeDefinition) {
    let incoming_name = type_name(&incoming).to_string();

    let existing = merged
        .document
        .definitions
        .iter_mut()
        .find_map(|d| match d {
            Definition::TypeDefinition(existing) if type_name(existing) == incoming_name => {
                Some(existing)
            }
            _ => None,
        });

    match existing {
        None => merged
            .document
            .definitions
            .push(Definition::TypeDefinition(incoming)),
        // Same-named object types merge at the field level so client-only
        // fields become visible to validation; everything else resolves to
        // the primary definition.
        Some(TypeDefinition::Object(existing)) => {
            if let TypeDefinition::Object(incoming) = incoming {
                for field in incoming.fields {
                    if !existing.fields.iter().any(|f| f.name == field.name) {
                        existing.fields.push(field);
                    }
                }
            }
        }
        Some(_) => {}
    }
}

fn type_name(definition: &TypeDefinition) -> &str {
    match definition {
        TypeDefinition::Scalar(t) => &t.name,
        TypeDefinition::Object(t) => &t.name,
        TypeDefinition::Interface(t) => &t.name,
        TypeDefinition::Union(t) => &t.name,
        TypeDefinition::Enum(t) => &t.name,
        TypeDefinition::InputObject(t) => &t.name,
    }
}
