//! Rebuilds SDL from a standard introspection result.
//!
//! The rendered text goes through the same SDL parser as file-based
//! schemas, so an introspected schema and its SDL equivalent resolve to the
//! same canonical document.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaLoadError;

#[derive(Debug, Deserialize)]
struct IntrospectionResult {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<NamedTypeRef>,
    mutation_type: Option<NamedTypeRef>,
    subscription_type: Option<NamedTypeRef>,
    types: Vec<IntrospectionType>,
    #[serde(default)]
    directives: Vec<IntrospectionDirective>,
}

#[derive(Debug, Deserialize)]
struct NamedTypeRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: String,
    name: Option<String>,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    enum_values: Option<Vec<IntrospectionEnumValue>>,
    #[serde(default)]
    possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    field_type: TypeRef,
    #[serde(default)]
    is_deprecated: bool,
    #[serde(default)]
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    value_type: TypeRef,
    #[serde(default)]
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionEnumValue {
    name: String,
    #[serde(default)]
    is_deprecated: bool,
    #[serde(default)]
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionDirective {
    name: String,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeRef {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    fn render(&self) -> Result<String, SchemaLoadError> {
        match self.kind.as_str() {
            "NON_NULL" => {
                let inner = self.inner()?;
                Ok(format!("{}!", inner.render()?))
            }
            "LIST" => {
                let inner = self.inner()?;
                Ok(format!("[{}]", inner.render()?))
            }
            _ => self.name.clone().ok_or_else(|| {
                SchemaLoadError::Introspection(format!(
                    "type reference of kind '{}' has no name",
                    self.kind
                ))
            }),
        }
    }

    fn inner(&self) -> Result<&TypeRef, SchemaLoadError> {
        self.of_type.as_deref().ok_or_else(|| {
            SchemaLoadError::Introspection(format!(
                "wrapping type of kind '{}' has no ofType",
                self.kind
            ))
        })
    }
}

const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy"];

/// Renders an introspection payload (an object carrying `__schema`) back
/// into SDL text.
pub fn render_sdl(payload: &Value) -> Result<String, SchemaLoadError> {
    let result: IntrospectionResult = serde_json::from_value(payload.clone())
        .map_err(|e| SchemaLoadError::Introspection(e.to_string()))?;
    let schema = result.schema;

    let mut sdl = String::new();
    render_schema_definition(&mut sdl, &schema);

    for ty in &schema.types {
        let name = match &ty.name {
            Some(name) => name.as_str(),
            None => {
                return Err(SchemaLoadError::Introspection(
                    "encountered a type with no name".into(),
                ))
            }
        };
        if name.starts_with("__") {
            continue;
        }

        match ty.kind.as_str() {
            "SCALAR" => {
                if !BUILTIN_SCALARS.contains(&name) {
                    let _ = writeln!(sdl, "scalar {}\n", name);
                }
            }
            "OBJECT" => render_object(&mut sdl, "type", name, ty)?,
            "INTERFACE" => render_object(&mut sdl, "interface", name, ty)?,
            "UNION" => {
                let members = ty
                    .possible_types
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|t| {
                        t.name.clone().ok_or_else(|| {
                            SchemaLoadError::Introspection(format!(
                                "union '{}' has an unnamed member",
                                name
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let _ = writeln!(sdl, "union {} = {}\n", name, members.join(" | "));
            }
            "ENUM" => {
                let _ = writeln!(sdl, "enum {} {{", name);
                for value in ty.enum_values.as_deref().unwrap_or_default() {
                    let _ = write!(sdl, "  {}", value.name);
                    render_deprecation(&mut sdl, value.is_deprecated, &value.deprecation_reason);
                    sdl.push('\n');
                }
                sdl.push_str("}\n\n");
            }
            "INPUT_OBJECT" => {
                let _ = writeln!(sdl, "input {} {{", name);
                for field in ty.input_fields.as_deref().unwrap_or_default() {
                    let _ = writeln!(sdl, "  {}", render_input_value(field)?);
                }
                sdl.push_str("}\n\n");
            }
            other => {
                return Err(SchemaLoadError::Introspection(format!(
                    "unknown type kind '{}' on type '{}'",
                    other, name
                )))
            }
        }
    }

    for directive in &schema.directives {
        if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
            continue;
        }
        let _ = write!(sdl, "directive @{}", directive.name);
        render_arguments(&mut sdl, &directive.args)?;
        let _ = writeln!(sdl, " on {}\n", directive.locations.join(" | "));
    }

    Ok(sdl)
}

fn render_schema_definition(sdl: &mut String, schema: &IntrospectionSchema) {
    let query = schema.query_type.as_ref().map(|t| t.name.as_str());
    let mutation = schema.mutation_type.as_ref().map(|t| t.name.as_str());
    let subscription = schema.subscription_type.as_ref().map(|t| t.name.as_str());

    // Default root names do not need an explicit schema definition, and
    // omitting it keeps the output aligned with hand-written SDL.
    let default_roots = query == Some("Query")
        && matches!(mutation, None | Some("Mutation"))
        && matches!(subscription, None | Some("Subscription"));
    if default_roots {
        return;
    }

    sdl.push_str("schema {\n");
    if let Some(name) = query {
        let _ = writeln!(sdl, "  query: {}", name);
    }
    if let Some(name) = mutation {
        let _ = writeln!(sdl, "  mutation: {}", name);
    }
    if let Some(name) = subscription {
        let _ = writeln!(sdl, "  subscription: {}", name);
    }
    sdl.push_str("}\n\n");
}

fn render_object(
    sdl: &mut String,
    keyword: &str,
    name: &str,
    ty: &IntrospectionType,
) -> Result<(), SchemaLoadError> {
    let _ = write!(sdl, "{} {}", keyword, name);

    let interfaces = ty
        .interfaces
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|i| i.name.as_deref())
        .collect::<Vec<_>>();
    if !interfaces.is_empty() {
        let _ = write!(sdl, " implements {}", interfaces.join(" & "));
    }

    sdl.push_str(" {\n");
    for field in ty.fields.as_deref().unwrap_or_default() {
        let _ = write!(sdl, "  {}", field.name);
        render_arguments(sdl, &field.args)?;
        let _ = write!(sdl, ": {}", field.field_type.render()?);
        render_deprecation(sdl, field.is_deprecated, &field.deprecation_reason);
        sdl.push('\n');
    }
    sdl.push_str("}\n\n");

    Ok(())
}

fn render_arguments(
    sdl: &mut String,
    args: &[IntrospectionInputValue],
) -> Result<(), SchemaLoadError> {
    if args.is_empty() {
        return Ok(());
    }
    let rendered = args
        .iter()
        .map(render_input_value)
        .collect::<Result<Vec<_>, _>>()?;
    let _ = write!(sdl, "({})", rendered.join(", "));
    Ok(())
}

fn render_input_value(value: &IntrospectionInputValue) -> Result<String, SchemaLoadError> {
    let mut rendered = format!("{}: {}", value.name, value.value_type.render()?);
    if let Some(default) = &value.default_value {
        // defaultValue is already GraphQL-encoded in introspection results.
        rendered.push_str(" = ");
        rendered.push_str(default);
    }
    Ok(rendered)
}

fn render_deprecation(sdl: &mut String, is_deprecated: bool, reason: &Option<String>) {
    if !is_deprecated {
        return;
    }
    match reason {
        Some(reason) => {
            let _ = write!(sdl, " @deprecated(reason: \"{}\")", reason.replace('"', "\\\""));
        }
        None => sdl.push_str(" @deprecated"),
    }
}
