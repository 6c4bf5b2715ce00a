use crate::documents::ParsedOperation;
use crate::SchemaDocument;

/// One generated-content record returned by a template plugin. The filename
/// is a hint for the (out-of-scope) output-writing layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
}

/// Everything a template plugin gets to see: the merged schema (absent when
/// schema loading was skipped), the validated documents (empty when
/// document loading was skipped), and the free-form options from the
/// configuration.
pub struct TemplateContext<'a> {
    pub schema: Option<&'a SchemaDocument>,
    pub documents: &'a [ParsedOperation],
    pub options: &'a serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The pluggable code-generation capability. Implementations are injected
/// into the pipeline; the core never knows template internals.
pub trait TemplatePlugin {
    fn name(&self) -> &str;

    fn generate(&self, ctx: &TemplateContext<'_>) -> Result<Vec<GeneratedFile>, TemplateError>;
}
