use graphql_codegen_core::template::TemplatePlugin;
use graphql_codegen_template_typescript::TypeScriptTemplate;

/// Maps a configured template name to its plugin implementation.
pub fn by_name(name: &str) -> anyhow::Result<Box<dyn TemplatePlugin>> {
    match name {
        "ts" | "typescript" => Ok(Box::new(TypeScriptTemplate)),
        other => anyhow::bail!("Unknown template '{}'", other),
    }
}
