//! Reference template plugin: emits TypeScript interfaces for the schema's
//! type system and per-operation namespaces for the loaded documents.

use std::fmt::Write;

use graphql_codegen_core::graphql_tools::static_graphql::query;
use graphql_codegen_core::graphql_tools::static_graphql::schema::{
    Definition, Document, EnumType, Field, InputObjectType, InterfaceType, ObjectType, Type,
    TypeDefinition, UnionType,
};
use graphql_codegen_core::template::{
    GeneratedFile, TemplateContext, TemplateError, TemplatePlugin,
};

pub struct TypeScriptTemplate;

impl TemplatePlugin for TypeScriptTemplate {
    fn name(&self) -> &str {
        "typescript"
    }

    fn generate(&self, ctx: &TemplateContext<'_>) -> Result<Vec<GeneratedFile>, TemplateError> {
        let mut out = String::new();
        if let Some(prologue) = ctx.options.get("prologue").and_then(|v| v.as_str()) {
            let _ = writeln!(out, "// {}", prologue);
        }
        out.push_str("/* tslint:disable */\n");

        if let Some(schema) = ctx.schema {
            render_schema(&mut out, schema);
        }
        for operation in ctx.documents {
            render_operations(&mut out, &operation.document);
        }

        Ok(vec![GeneratedFile {
            filename: "types.ts".to_string(),
            content: out,
        }])
    }
}

fn render_schema(out: &mut String, schema: &Document) {
    for definition in &schema.definitions {
        let Definition::TypeDefinition(type_def) = definition else {
            continue;
        };
        match type_def {
            TypeDefinition::Object(object) => render_object(out, object),
            TypeDefinition::Interface(interface) => render_interface(out, interface),
            TypeDefinition::InputObject(input) => render_input_object(out, input),
            TypeDefinition::Enum(enum_type) => render_enum(out, enum_type),
            TypeDefinition::Union(union_type) => render_union(out, union_type),
            TypeDefinition::Scalar(scalar) => {
                let _ = writeln!(out, "\nexport type {} = any;", scalar.name);
            }
        }
    }
}

fn render_object(out: &mut String, object: &ObjectType) {
    let _ = write!(out, "\nexport interface {}", object.name);
    if !object.implements_interfaces.is_empty() {
        let _ = write!(out, " extends {}", object.implements_interfaces.join(", "));
    }
    out.push_str(" {\n");
    render_fields(out, &object.fields);
    out.push_str("}\n");
}

fn render_interface(out: &mut String, interface: &InterfaceType) {
    let _ = writeln!(out, "\nexport interface {} {{", interface.name);
    render_fields(out, &interface.fields);
    out.push_str("}\n");
}

fn render_input_object(out: &mut String, input: &InputObjectType) {
    let _ = writeln!(out, "\nexport interface {} {{", input.name);
    for field in &input.fields {
        let _ = writeln!(out, "  {}: {};", field.name, ts_type(&field.value_type));
    }
    out.push_str("}\n");
}

fn render_enum(out: &mut String, enum_type: &EnumType) {
    let values = enum_type
        .values
        .iter()
        .map(|v| format!("\"{}\"", v.name))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "\nexport type {} = {};", enum_type.name, values);
}

fn render_union(out: &mut String, union_type: &UnionType) {
    let _ = writeln!(
        out,
        "\nexport type {} = {};",
        union_type.name,
        union_type.types.join(" | ")
    );
}

fn render_fields(out: &mut String, fields: &[Field]) {
    for field in fields {
        let _ = writeln!(out, "  {}: {};", field.name, ts_type(&field.field_type));
    }
}

fn render_operations(out: &mut String, document: &query::Document) {
    for definition in &document.definitions {
        let query::Definition::Operation(operation) = definition else {
            continue;
        };
        let (name, variables) = match operation {
            query::OperationDefinition::Query(q) => (&q.name, &q.variable_definitions),
            query::OperationDefinition::Mutation(m) => (&m.name, &m.variable_definitions),
            query::OperationDefinition::Subscription(s) => (&s.name, &s.variable_definitions),
            query::OperationDefinition::SelectionSet(_) => continue,
        };
        let Some(name) = name else {
            continue;
        };

        let _ = writeln!(out, "\nexport namespace {} {{", name);
        out.push_str("  export type Variables = {\n");
        for variable in variables {
            let _ = writeln!(
                out,
                "    {}: {};",
                variable.name,
                ts_type(&variable.var_type)
            );
        }
        out.push_str("  };\n}\n");
    }
}

fn ts_type(graphql_type: &Type) -> String {
    match graphql_type {
        Type::NamedType(name) => format!("{} | null", ts_scalar(name)),
        Type::ListType(inner) => format!("({})[] | null", ts_type(inner)),
        Type::NonNullType(inner) => match &**inner {
            Type::NamedType(name) => ts_scalar(name).to_string(),
            Type::ListType(list_inner) => format!("({})[]", ts_type(list_inner)),
            Type::NonNullType(_) => ts_type(inner),
        },
    }
}

fn ts_scalar(name: &str) -> &str {
    match name {
        "String" | "ID" => "string",
        "Int" | "Float" => "number",
        "Boolean" => "boolean",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codegen_core::documents::ParsedOperation;
    use graphql_codegen_core::graphql_tools::parser::{parse_query, parse_schema};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn generate(
        sdl: Option<&str>,
        operations: &[(&str, &str)],
        options: &Value,
    ) -> GeneratedFile {
        let schema = sdl.map(|sdl| parse_schema::<String>(sdl).unwrap().into_static());
        let documents = operations
            .iter()
            .map(|(path, text)| ParsedOperation {
                file_path: path.into(),
                document: parse_query::<String>(text).unwrap().into_static(),
            })
            .collect::<Vec<_>>();

        let mut files = TypeScriptTemplate
            .generate(&TemplateContext {
                schema: schema.as_ref(),
                documents: &documents,
                options,
            })
            .unwrap();
        assert_eq!(files.len(), 1);
        files.remove(0)
    }

    #[test]
    fn renders_interfaces_for_object_types() {
        let file = generate(
            Some("type Query { allPosts: [Post] }\ntype Post { id: ID!\n title: String }"),
            &[],
            &Value::Null,
        );

        assert!(file.content.contains("export interface Post"));
        assert!(file.content.contains("allPosts: (Post | null)[] | null;"));
        assert!(file.content.contains("id: string;"));
        assert!(file.content.contains("title: string | null;"));
    }

    #[test]
    fn renders_enums_and_unions() {
        let file = generate(
            Some("type Query { u: U }\nenum E { A B }\nunion U = Query"),
            &[],
            &Value::Null,
        );

        assert!(file.content.contains("export type E = \"A\" | \"B\";"));
        assert!(file.content.contains("export type U = Query;"));
    }

    #[test]
    fn renders_operation_namespaces() {
        let file = generate(
            None,
            &[(
                "hero.graphql",
                "query HeroDetails($id: ID!) { hero(id: $id) { name } }",
            )],
            &Value::Null,
        );

        assert!(file.content.contains("export namespace HeroDetails"));
        assert!(file.content.contains("id: string;"));
    }

    #[test]
    fn header_only_when_everything_is_skipped() {
        let file = generate(None, &[], &Value::Null);
        assert_eq!(file.content, "/* tslint:disable */\n");
        assert_eq!(file.filename, "types.ts");
    }

    #[test]
    fn prologue_option_is_prepended() {
        let file = generate(
            None,
            &[],
            &serde_json::json!({ "prologue": "Generated in CI" }),
        );
        assert!(file.content.starts_with("// Generated in CI\n"));
    }
}
