//! Rebuilds SDL from a serialized schema AST (the `{ "kind": "Document" }`
//! JSON shape). Like the introspection path, the rendered text is re-parsed
//! so every source format converges on the same canonical document.

use std::fmt::Write;

use serde_json::Value;

use crate::error::SchemaLoadError;

/// Renders a serialized AST document into SDL text.
pub fn render_sdl(document: &Value) -> Result<String, SchemaLoadError> {
    let definitions = document
        .get("definitions")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("document has no definitions array"))?;

    let mut sdl = String::new();
    for definition in definitions {
        render_definition(&mut sdl, definition)?;
        sdl.push('\n');
    }
    Ok(sdl)
}

fn render_definition(sdl: &mut String, node: &Value) -> Result<(), SchemaLoadError> {
    match kind_of(node)? {
        "SchemaDefinition" => {
            sdl.push_str("schema {\n");
            for operation_type in node
                .get("operationTypes")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("SchemaDefinition has no operationTypes"))?
            {
                let operation = operation_type
                    .get("operation")
                    .and_then(Value::as_str)
                    .ok_or_else(|| malformed("operation type has no operation"))?;
                let type_name = name_of(
                    operation_type
                        .get("type")
                        .and_then(|t| t.get("name"))
                        .ok_or_else(|| malformed("operation type has no type name"))?,
                )?;
                let _ = writeln!(sdl, "  {}: {}", operation, type_name);
            }
            sdl.push_str("}\n");
        }
        "ScalarTypeDefinition" => {
            let _ = writeln!(sdl, "scalar {}", node_name(node)?);
        }
        "ObjectTypeDefinition" => {
            let _ = write!(sdl, "type {}", node_name(node)?);
            render_interfaces(sdl, node)?;
            render_field_block(sdl, node, "fields")?;
        }
        "InterfaceTypeDefinition" => {
            let _ = write!(sdl, "interface {}", node_name(node)?);
            render_interfaces(sdl, node)?;
            render_field_block(sdl, node, "fields")?;
        }
        "UnionTypeDefinition" => {
            let members = node
                .get("types")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("UnionTypeDefinition has no types"))?
                .iter()
                .map(|t| t.get("name").map(name_of).unwrap_or_else(|| Err(malformed("union member has no name"))))
                .collect::<Result<Vec<_>, _>>()?;
            let _ = writeln!(sdl, "union {} = {}", node_name(node)?, members.join(" | "));
        }
        "EnumTypeDefinition" => {
            let _ = writeln!(sdl, "enum {} {{", node_name(node)?);
            for value in node.get("values").and_then(Value::as_array).unwrap_or(&vec![]) {
                let _ = writeln!(sdl, "  {}", node_name(value)?);
            }
            sdl.push_str("}\n");
        }
        "InputObjectTypeDefinition" => {
            let _ = writeln!(sdl, "input {} {{", node_name(node)?);
            for field in node.get("fields").and_then(Value::as_array).unwrap_or(&vec![]) {
                let _ = writeln!(sdl, "  {}", render_input_value(field)?);
            }
            sdl.push_str("}\n");
        }
        "DirectiveDefinition" => {
            let _ = write!(sdl, "directive @{}", node_name(node)?);
            render_argument_list(sdl, node)?;
            let locations = node
                .get("locations")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("DirectiveDefinition has no locations"))?
                .iter()
                .map(|l| {
                    l.get("value")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .or_else(|| l.as_str().map(str::to_string))
                        .ok_or_else(|| malformed("directive location has no value"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let _ = writeln!(sdl, " on {}", locations.join(" | "));
        }
        other => {
            return Err(malformed(&format!("unsupported definition kind '{}'", other)));
        }
    }
    Ok(())
}

fn render_interfaces(sdl: &mut String, node: &Value) -> Result<(), SchemaLoadError> {
    let interfaces = node
        .get("interfaces")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|i| {
                    i.get("name")
                        .map(name_of)
                        .unwrap_or_else(|| Err(malformed("interface reference has no name")))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();
    if !interfaces.is_empty() {
        let _ = write!(sdl, " implements {}", interfaces.join(" & "));
    }
    Ok(())
}

fn render_field_block(sdl: &mut String, node: &Value, key: &str) -> Result<(), SchemaLoadError> {
    sdl.push_str(" {\n");
    for field in node.get(key).and_then(Value::as_array).unwrap_or(&vec![]) {
        let _ = write!(sdl, "  {}", node_name(field)?);
        render_argument_list(sdl, field)?;
        let field_type = field
            .get("type")
            .ok_or_else(|| malformed("FieldDefinition has no type"))?;
        let _ = writeln!(sdl, ": {}", render_type(field_type)?);
    }
    sdl.push_str("}\n");
    Ok(())
}

fn render_argument_list(sdl: &mut String, node: &Value) -> Result<(), SchemaLoadError> {
    let arguments = node.get("arguments").and_then(Value::as_array);
    let arguments = match arguments {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(()),
    };
    let rendered = arguments
        .iter()
        .map(render_input_value)
        .collect::<Result<Vec<_>, _>>()?;
    let _ = write!(sdl, "({})", rendered.join(", "));
    Ok(())
}

fn render_input_value(node: &Value) -> Result<String, SchemaLoadError> {
    let value_type = node
        .get("type")
        .ok_or_else(|| malformed("InputValueDefinition has no type"))?;
    let mut rendered = format!("{}: {}", node_name(node)?, render_type(value_type)?);
    if let Some(default) = node.get("defaultValue").filter(|v| !v.is_null()) {
        rendered.push_str(" = ");
        rendered.push_str(&render_value(default)?);
    }
    Ok(rendered)
}

fn render_type(node: &Value) -> Result<String, SchemaLoadError> {
    match kind_of(node)? {
        "NamedType" => name_of(
            node.get("name")
                .ok_or_else(|| malformed("NamedType has no name"))?,
        )
        .map(str::to_string),
        "ListType" => Ok(format!("[{}]", render_type(inner_type(node)?)?)),
        "NonNullType" => Ok(format!("{}!", render_type(inner_type(node)?)?)),
        other => Err(malformed(&format!("unsupported type kind '{}'", other))),
    }
}

fn render_value(node: &Value) -> Result<String, SchemaLoadError> {
    let value = node.get("value");
    match kind_of(node)? {
        "IntValue" | "FloatValue" | "BooleanValue" | "EnumValue" => value
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| malformed("value node has no value")),
        "StringValue" => value
            .and_then(Value::as_str)
            .map(|s| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")))
            .ok_or_else(|| malformed("StringValue has no value")),
        "NullValue" => Ok("null".to_string()),
        "ListValue" => {
            let items = node
                .get("values")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("ListValue has no values"))?
                .iter()
                .map(render_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        "ObjectValue" => {
            let fields = node
                .get("fields")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("ObjectValue has no fields"))?
                .iter()
                .map(|f| {
                    let value = f
                        .get("value")
                        .ok_or_else(|| malformed("ObjectField has no value"))?;
                    Ok(format!("{}: {}", node_name(f)?, render_value(value)?))
                })
                .collect::<Result<Vec<_>, SchemaLoadError>>()?;
            Ok(format!("{{{}}}", fields.join(", ")))
        }
        other => Err(malformed(&format!("unsupported value kind '{}'", other))),
    }
}

fn inner_type(node: &Value) -> Result<&Value, SchemaLoadError> {
    node.get("type")
        .ok_or_else(|| malformed("wrapping type has no inner type"))
}

fn kind_of(node: &Value) -> Result<&str, SchemaLoadError> {
    node.get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("node has no kind"))
}

fn node_name(node: &Value) -> Result<&str, SchemaLoadError> {
    name_of(
        node.get("name")
            .ok_or_else(|| malformed("node has no name"))?,
    )
}

fn name_of(name_node: &Value) -> Result<&str, SchemaLoadError> {
    name_node
        .get("value")
        .and_then(Value::as_str)
        .or_else(|| name_node.as_str())
        .ok_or_else(|| malformed("name node has no value"))
}

fn malformed(message: &str) -> SchemaLoadError {
    SchemaLoadError::Ast(message.to_string())
}
