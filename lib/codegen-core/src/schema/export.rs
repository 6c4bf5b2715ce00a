use serde_json::Value;

/// Classification of a JSON schema export payload.
///
/// The shape is inspected structurally exactly once, at load time; the rest
/// of the pipeline only ever sees the tagged variant.
#[derive(Debug)]
pub enum SchemaExport {
    /// An introspection result: an object with a `__schema` key, optionally
    /// wrapped in a `data` envelope the way GraphQL responses are.
    Introspection(Value),
    /// A serialized schema AST: an object with `"kind": "Document"`.
    Ast(Value),
    /// SDL text exported as a JSON string.
    Sdl(String),
}

impl SchemaExport {
    /// Classifies a payload, or returns `None` when it matches none of the
    /// accepted shapes (the ambiguous-export load error).
    pub fn classify(value: Value) -> Option<SchemaExport> {
        match value {
            Value::String(sdl) => Some(SchemaExport::Sdl(sdl)),
            Value::Object(mut map) => {
                if map.contains_key("__schema") {
                    return Some(SchemaExport::Introspection(Value::Object(map)));
                }
                if let Some(data) = map.remove("data") {
                    if data.get("__schema").is_some() {
                        return Some(SchemaExport::Introspection(data));
                    }
                    return None;
                }
                if map.get("kind").and_then(Value::as_str) == Some("Document") {
                    return Some(SchemaExport::Ast(Value::Object(map)));
                }
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_sdl_string() {
        let export = SchemaExport::classify(json!("type Query { a: Int }"));
        assert!(matches!(export, Some(SchemaExport::Sdl(_))));
    }

    #[test]
    fn classifies_introspection_with_and_without_data_envelope() {
        let bare = SchemaExport::classify(json!({ "__schema": { "types": [] } }));
        assert!(matches!(bare, Some(SchemaExport::Introspection(_))));

        let wrapped = SchemaExport::classify(json!({ "data": { "__schema": { "types": [] } } }));
        assert!(matches!(wrapped, Some(SchemaExport::Introspection(_))));
    }

    #[test]
    fn classifies_serialized_ast() {
        let export = SchemaExport::classify(json!({ "kind": "Document", "definitions": [] }));
        assert!(matches!(export, Some(SchemaExport::Ast(_))));
    }

    #[test]
    fn rejects_ambiguous_shapes() {
        assert!(SchemaExport::classify(json!({ "types": [] })).is_none());
        assert!(SchemaExport::classify(json!(42)).is_none());
        assert!(SchemaExport::classify(json!(["type Query { a: Int }"])).is_none());
    }
}
