//! The pipeline orchestrator: pre-load hooks, schema resolution and merge,
//! document loading, validation, template invocation.
//!
//! The orchestrator owns the whole lifecycle of one invocation and holds no
//! state across invocations. It never terminates the process itself: any
//! failure comes back as an appropriately-typed [`CodegenError`], and the
//! binary boundary maps that to an exit code.

use std::path::{Path, PathBuf};

use graphql_codegen_config::CodegenConfig;

use crate::documents::{load_documents, ParsedOperation};
use crate::error::{CodegenError, ValidationFailure};
use crate::hooks::PreloadHook;
use crate::schema::{merge, resolve, ResolvedSchema, SchemaSource};
use crate::template::{GeneratedFile, TemplateContext, TemplatePlugin};
use crate::validate::validate_documents;

/// Runs one full pipeline invocation and returns the ordered generated
/// records, or the first terminal error.
pub fn execute_with_options(
    config: &CodegenConfig,
    template: &dyn TemplatePlugin,
    preload_hooks: &[Box<dyn PreloadHook>],
) -> Result<Vec<GeneratedFile>, CodegenError> {
    for hook in preload_hooks {
        tracing::debug!(hook = hook.name(), "running pre-load hook");
        hook.run().map_err(|source| CodegenError::PreloadHook {
            name: hook.name().to_string(),
            source,
        })?;
    }

    let schema = resolve_schema(config)?;
    let documents = resolve_documents(config)?;

    if let Some(schema) = &schema {
        check_documents(schema, &documents)?;
    }

    tracing::info!(template = template.name(), "generating output");
    let files = template
        .generate(&TemplateContext {
            schema: schema.as_ref().map(|s| &s.document),
            documents: &documents,
            options: &config.template_options,
        })
        .map_err(|source| CodegenError::Template {
            name: template.name().to_string(),
            source,
        })?;

    if files.is_empty() {
        return Err(CodegenError::EmptyOutput(template.name().to_string()));
    }
    Ok(files)
}

fn resolve_schema(config: &CodegenConfig) -> Result<Option<ResolvedSchema>, CodegenError> {
    if config.skip_schema {
        tracing::debug!("schema loading skipped");
        return Ok(None);
    }

    let reference = config.schema.as_deref().ok_or(CodegenError::MissingSchema)?;
    tracing::debug!(schema = reference, "resolving primary schema");
    let primary = resolve(&source_for(reference, config.root_directory()))?;

    let client = match config.client_schema.as_deref() {
        Some(reference) => {
            tracing::debug!(client_schema = reference, "resolving client schema");
            Some(resolve(&source_for(reference, config.root_directory()))?)
        }
        None => None,
    };

    Ok(Some(merge(primary, client)))
}

fn resolve_documents(config: &CodegenConfig) -> Result<Vec<ParsedOperation>, CodegenError> {
    if config.skip_documents || config.documents.is_empty() {
        tracing::debug!("document loading skipped");
        return Ok(Vec::new());
    }
    Ok(load_documents(&config.documents, config.root_directory())?)
}

fn check_documents(
    schema: &ResolvedSchema,
    documents: &[ParsedOperation],
) -> Result<(), CodegenError> {
    if documents.is_empty() {
        return Ok(());
    }

    let outcomes = validate_documents(schema, documents);
    let invalid: Vec<_> = outcomes.into_iter().filter(|o| !o.is_valid()).collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(CodegenError::Validation(ValidationFailure::new(invalid)))
}

fn source_for(reference: &str, root: &Path) -> SchemaSource {
    let path = if Path::new(reference).is_absolute() {
        PathBuf::from(reference)
    } else {
        root.join(reference)
    };
    SchemaSource::FilePath(path)
}
