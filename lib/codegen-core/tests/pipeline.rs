use std::path::Path;

use graphql_codegen_config::CodegenConfig;
use graphql_codegen_core::error::CodegenError;
use graphql_codegen_core::pipeline::execute_with_options;
use graphql_codegen_core::template::{
    GeneratedFile, TemplateContext, TemplateError, TemplatePlugin,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// A minimal template that records what it saw: type names from the schema
/// and operation names from the documents.
struct EchoTemplate;

impl TemplatePlugin for EchoTemplate {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(&self, ctx: &TemplateContext<'_>) -> Result<Vec<GeneratedFile>, TemplateError> {
        use graphql_codegen_core::graphql_tools::static_graphql::query;

        let mut content = String::new();
        if let Some(schema) = ctx.schema {
            content.push_str(&schema.to_string());
        }
        for operation in ctx.documents {
            for definition in &operation.document.definitions {
                if let query::Definition::Operation(query::OperationDefinition::Query(q)) =
                    definition
                {
                    if let Some(name) = &q.name {
                        content.push_str(name);
                        content.push('\n');
                    }
                }
            }
        }
        Ok(vec![GeneratedFile {
            filename: "echo.out".to_string(),
            content,
        }])
    }
}

struct EmptyTemplate;

impl TemplatePlugin for EmptyTemplate {
    fn name(&self) -> &str {
        "empty"
    }

    fn generate(&self, _ctx: &TemplateContext<'_>) -> Result<Vec<GeneratedFile>, TemplateError> {
        Ok(vec![])
    }
}

const BLOG_SDL: &str = "type Query {\n  fieldA: String\n  fieldB: Int\n}\n";

fn blog_introspection() -> serde_json::Value {
    json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": null,
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        { "name": "fieldA", "args": [], "type": { "kind": "SCALAR", "name": "String", "ofType": null }, "isDeprecated": false, "deprecationReason": null },
                        { "name": "fieldB", "args": [], "type": { "kind": "SCALAR", "name": "Int", "ofType": null }, "isDeprecated": false, "deprecationReason": null }
                    ],
                    "interfaces": []
                },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "SCALAR", "name": "Int" }
            ],
            "directives": []
        }
    })
}

fn config_in(root: &Path) -> CodegenConfig {
    let mut config = CodegenConfig::default().with_root_directory(root);
    config.template = "echo".to_string();
    config
}

#[test]
fn json_introspection_schema_produces_one_record() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("schema.json"),
        serde_json::to_string(&blog_introspection()).unwrap(),
    )
    .unwrap();

    let mut config = config_in(dir.path());
    config.schema = Some("schema.json".to_string());

    let result = execute_with_options(&config, &EchoTemplate, &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].content.contains("fieldA: String"));
}

#[test]
fn all_schema_formats_resolve_to_the_same_canonical_schema() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(
        dir.path().join("schema.json"),
        serde_json::to_string(&blog_introspection()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("schema-text.json"),
        serde_json::to_string(&json!(BLOG_SDL)).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("schema-ast.json"),
        serde_json::to_string(&json!({
            "kind": "Document",
            "definitions": [
                {
                    "kind": "ObjectTypeDefinition",
                    "name": { "kind": "Name", "value": "Query" },
                    "interfaces": [],
                    "fields": [
                        {
                            "kind": "FieldDefinition",
                            "name": { "kind": "Name", "value": "fieldA" },
                            "arguments": [],
                            "type": { "kind": "NamedType", "name": { "kind": "Name", "value": "String" } }
                        },
                        {
                            "kind": "FieldDefinition",
                            "name": { "kind": "Name", "value": "fieldB" },
                            "arguments": [],
                            "type": { "kind": "NamedType", "name": { "kind": "Name", "value": "Int" } }
                        }
                    ]
                }
            ]
        }))
        .unwrap(),
    )
    .unwrap();

    let mut outputs = Vec::new();
    for reference in [
        "schema.graphql",
        "schema.json",
        "schema-text.json",
        "schema-ast.json",
    ] {
        let mut config = config_in(dir.path());
        config.schema = Some(reference.to_string());
        let result = execute_with_options(&config, &EchoTemplate, &[]).unwrap();
        outputs.push(result[0].content.clone());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    assert_eq!(outputs[0], outputs[3]);
}

#[test]
fn equivalent_sources_produce_identical_validation_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(
        dir.path().join("schema-text.json"),
        serde_json::to_string(&json!(BLOG_SDL)).unwrap(),
    )
    .unwrap();
    std::fs::write(dir.path().join("bad.graphql"), "query Bad { fieldD }").unwrap();

    let mut diagnostics = Vec::new();
    for reference in ["schema.graphql", "schema-text.json"] {
        let mut config = config_in(dir.path());
        config.schema = Some(reference.to_string());
        config.documents = vec![dir.path().join("bad.graphql").display().to_string()];

        let err = execute_with_options(&config, &EchoTemplate, &[]).unwrap_err();
        diagnostics.push(err.diagnostics());
    }

    assert_eq!(diagnostics[0], diagnostics[1]);
}

#[test]
fn invalid_field_reports_bit_exact_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(dir.path().join("ok.graphql"), "query Ok { fieldA }").unwrap();
    std::fs::write(dir.path().join("invalid-fields.graphql"), "query Bad { fieldD }").unwrap();

    let ok_path = dir.path().join("ok.graphql").display().to_string();
    let invalid_path = dir.path().join("invalid-fields.graphql").display().to_string();

    let mut config = config_in(dir.path());
    config.schema = Some("schema.graphql".to_string());
    config.documents = vec![ok_path, invalid_path.clone()];

    let err = execute_with_options(&config, &EchoTemplate, &[]).unwrap_err();
    let diagnostics = err.diagnostics();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0],
        format!(
            "[{}] GraphQL Error: Cannot query field \"fieldD\" on type \"Query\". Did you mean \"fieldA\" or \"fieldB\"?",
            invalid_path
        )
    );
    assert_eq!(
        diagnostics[1],
        "Found 1 errors when validating your GraphQL documents against schema!"
    );
}

#[test]
fn summary_counts_files_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(
        dir.path().join("bad1.graphql"),
        "query BadOne { fieldD fieldE }",
    )
    .unwrap();
    std::fs::write(dir.path().join("bad2.graphql"), "query BadTwo { fieldF }").unwrap();

    let mut config = config_in(dir.path());
    config.schema = Some("schema.graphql".to_string());
    config.documents = vec![
        dir.path().join("bad1.graphql").display().to_string(),
        dir.path().join("bad2.graphql").display().to_string(),
    ];

    let err = execute_with_options(&config, &EchoTemplate, &[]).unwrap_err();
    let diagnostics = err.diagnostics();

    // Three error lines across two files, summary counts the files.
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(
        diagnostics.last().unwrap(),
        "Found 2 errors when validating your GraphQL documents against schema!"
    );
}

#[test]
fn skip_documents_yields_vacuous_validation() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(dir.path().join("bad.graphql"), "query Bad { fieldD }").unwrap();

    let mut config = config_in(dir.path());
    config.schema = Some("schema.graphql".to_string());
    config.documents = vec![dir.path().join("bad.graphql").display().to_string()];
    config.skip_documents = true;

    let result = execute_with_options(&config, &EchoTemplate, &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!(!result[0].content.contains("Bad"));
}

#[test]
fn skip_schema_and_documents_still_invokes_the_template() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("HeroDetails.graphql"),
        "query HeroDetails { hero { name } }",
    )
    .unwrap();

    let mut config = config_in(dir.path());
    config.documents = vec![dir.path().join("HeroDetails.graphql").display().to_string()];
    config.skip_schema = true;
    config.skip_documents = true;

    let result = execute_with_options(&config, &EchoTemplate, &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!(!result[0].content.contains("HeroDetails"));
}

#[test]
fn missing_schema_reference_is_a_configuration_error() {
    let config = config_in(Path::new(""));
    let err = execute_with_options(&config, &EchoTemplate, &[]).unwrap_err();
    assert!(matches!(err, CodegenError::MissingSchema));
}

#[test]
fn client_schema_merges_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), BLOG_SDL).unwrap();
    std::fs::write(
        dir.path().join("client.graphql"),
        "type Query { localFlag: Boolean }",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("local.graphql"),
        "query Local { fieldA localFlag }",
    )
    .unwrap();

    let mut config = config_in(dir.path());
    config.schema = Some("schema.graphql".to_string());
    config.client_schema = Some("client.graphql".to_string());
    config.documents = vec![dir.path().join("local.graphql").display().to_string()];

    let result = execute_with_options(&config, &EchoTemplate, &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].content.contains("localFlag: Boolean"));
}

#[test]
fn preload_hooks_run_before_schema_resolution() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct FlagHook(Arc<AtomicBool>);

    impl graphql_codegen_core::hooks::PreloadHook for FlagHook {
        fn name(&self) -> &str {
            "flag"
        }

        fn run(&self) -> anyhow::Result<()> {
            self.0.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    let flag = Arc::new(AtomicBool::new(false));
    let hooks: Vec<Box<dyn graphql_codegen_core::hooks::PreloadHook>> =
        vec![Box::new(FlagHook(flag.clone()))];

    let mut config = config_in(Path::new(""));
    config.skip_schema = true;

    let result = execute_with_options(&config, &EchoTemplate, &hooks).unwrap();
    assert_eq!(result.len(), 1);
    assert!(flag.load(Ordering::SeqCst));
}

#[test]
fn failing_preload_hook_aborts_the_run() {
    struct FailingHook;

    impl graphql_codegen_core::hooks::PreloadHook for FailingHook {
        fn name(&self) -> &str {
            "failing"
        }

        fn run(&self) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }
    }

    let hooks: Vec<Box<dyn graphql_codegen_core::hooks::PreloadHook>> = vec![Box::new(FailingHook)];
    let mut config = config_in(Path::new(""));
    config.skip_schema = true;

    let err = execute_with_options(&config, &EchoTemplate, &hooks).unwrap_err();
    assert!(matches!(err, CodegenError::PreloadHook { .. }));
}

#[test]
fn empty_template_output_is_an_error() {
    let mut config = config_in(Path::new(""));
    config.skip_schema = true;

    let err = execute_with_options(&config, &EmptyTemplate, &[]).unwrap_err();
    assert!(matches!(err, CodegenError::EmptyOutput(_)));
}
