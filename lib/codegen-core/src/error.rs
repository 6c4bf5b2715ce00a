use std::path::PathBuf;

use crate::imports::ImportError;
use crate::template::TemplateError;
use crate::validate::ValidationOutcome;

/// Failure to turn a schema reference into a canonical schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("Failed to read schema file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON from schema file '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse schema SDL: {0}")]
    Parse(#[from] graphql_tools::parser::schema::ParseError),
    #[error("Schema export in '{}' is neither an introspection result, a serialized AST, nor SDL text", .path.display())]
    AmbiguousExport { path: PathBuf },
    #[error("Unsupported schema file extension in '{}'", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("Malformed introspection result: {0}")]
    Introspection(String),
    #[error("Malformed serialized schema AST: {0}")]
    Ast(String),
    #[error("Failed to expand schema imports: {0}")]
    Import(#[from] ImportError),
}

/// Failure to load or parse one of the referenced operation documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentLoadError {
    #[error("Invalid document glob '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Failed to walk document glob: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Failed to read document file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse document '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: graphql_tools::parser::query::ParseError,
    },
    #[error("Failed to expand document imports: {0}")]
    Import(#[from] ImportError),
}

/// Validation failed for at least one document. Carries every invalid
/// outcome so the caller sees the complete error set in one run.
#[derive(Debug, thiserror::Error)]
#[error("Found {} errors when validating your GraphQL documents against schema!", .outcomes.len())]
pub struct ValidationFailure {
    outcomes: Vec<ValidationOutcome>,
}

impl ValidationFailure {
    pub fn new(outcomes: Vec<ValidationOutcome>) -> Self {
        debug_assert!(outcomes.iter().all(|o| !o.is_valid()));
        Self { outcomes }
    }

    /// Number of files with at least one error. This is the `N` in the
    /// user-facing summary line, not the total error count.
    pub fn error_file_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcomes(&self) -> &[ValidationOutcome] {
        &self.outcomes
    }

    /// The user-facing diagnostic lines, in the order the documents were
    /// supplied: one line per error, then the summary line.
    pub fn diagnostic_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for outcome in &self.outcomes {
            for error in &outcome.errors {
                lines.push(format!(
                    "[{}] GraphQL Error: {}",
                    outcome.file_path.display(),
                    error.message
                ));
            }
        }
        lines.push(self.to_string());
        lines
    }
}

/// Terminal error taxonomy of one pipeline invocation. None of these are
/// retried; the binary boundary maps any of them to exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("Invalid configuration: a schema reference is required unless skip_schema is set")]
    MissingSchema,
    #[error("Pre-load hook '{name}' failed: {source}")]
    PreloadHook {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    SchemaLoad(#[from] SchemaLoadError),
    #[error(transparent)]
    DocumentLoad(#[from] DocumentLoadError),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("Template '{name}' failed: {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
    #[error("Template '{0}' returned no generated content")]
    EmptyOutput(String),
}

impl CodegenError {
    /// Everything that should be reported to the logging collaborator
    /// before the process terminates.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            CodegenError::Validation(failure) => failure.diagnostic_lines(),
            other => vec![other.to_string()],
        }
    }
}
