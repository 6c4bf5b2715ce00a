use std::path::Path;

use crate::error::SchemaLoadError;
use crate::imports::{expand_imports, ImportError};
use crate::schema::{ast_json, introspection, ResolvedSchema, SchemaExport, SchemaSource};

/// Resolves any schema source shape into the canonical schema document.
pub fn resolve(source: &SchemaSource) -> Result<ResolvedSchema, SchemaLoadError> {
    match source {
        SchemaSource::Instance(document) => Ok(ResolvedSchema {
            document: (**document).clone(),
        }),
        SchemaSource::Text(sdl) => parse_sdl(sdl),
        SchemaSource::FilePath(path) => match extension_of(path) {
            Some("graphql") | Some("gql") | Some("graphqls") => {
                // A read failure on the schema file itself is reported as a
                // missing schema, not as an import problem.
                let combined = expand_imports(path).map_err(|error| match error {
                    ImportError::FileRead { path: failed, source }
                        if failed.as_path() == path.as_path() =>
                    {
                        SchemaLoadError::FileRead {
                            path: path.clone(),
                            source,
                        }
                    }
                    other => SchemaLoadError::Import(other),
                })?;
                parse_sdl(&combined)
            }
            Some("json") => resolve_json_export(path),
            _ => Err(SchemaLoadError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        },
    }
}

fn resolve_json_export(path: &Path) -> Result<ResolvedSchema, SchemaLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let payload = serde_json::from_str(&raw).map_err(|source| SchemaLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let export = SchemaExport::classify(payload).ok_or_else(|| SchemaLoadError::AmbiguousExport {
        path: path.to_path_buf(),
    })?;

    let sdl = match export {
        SchemaExport::Sdl(sdl) => sdl,
        SchemaExport::Introspection(payload) => introspection::render_sdl(&payload)?,
        SchemaExport::Ast(document) => ast_json::render_sdl(&document)?,
    };
    parse_sdl(&sdl)
}

fn parse_sdl(sdl: &str) -> Result<ResolvedSchema, SchemaLoadError> {
    let document = graphql_tools::parser::parse_schema::<String>(sdl)?.into_static();
    Ok(ResolvedSchema { document })
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
