//! Loads operation documents from file-glob references.
//!
//! Reference order is preserved; matches within one glob come back in the
//! glob walker's lexical order. Each file is expanded through the shared
//! `#import` machinery so fragments defined in other files become part of
//! the parsed document, then parsed as one operation AST tagged with its
//! originating path.

use std::path::{Path, PathBuf};

use crate::error::DocumentLoadError;
use crate::imports::{expand_imports, ImportError};
use crate::OperationDocument;

/// One parsed operation document, associated back to the file it came from
/// for error attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOperation {
    pub file_path: PathBuf,
    pub document: OperationDocument,
}

/// Loads and parses every document matched by the given references.
///
/// A reference without glob metacharacters is a literal path and must
/// exist; a glob pattern is allowed to match nothing.
pub fn load_documents(
    references: &[String],
    root: &Path,
) -> Result<Vec<ParsedOperation>, DocumentLoadError> {
    let mut operations = Vec::new();

    for reference in references {
        let full_reference = if Path::new(reference).is_absolute() {
            PathBuf::from(reference)
        } else {
            root.join(reference)
        };

        if !is_glob_pattern(reference) {
            operations.push(load_document(&full_reference, reference)?);
            continue;
        }

        let pattern = full_reference.to_string_lossy();
        let matches = glob::glob(&pattern).map_err(|source| DocumentLoadError::Pattern {
            pattern: reference.clone(),
            source,
        })?;
        for entry in matches {
            let path = entry?;
            let display = path.to_string_lossy().into_owned();
            operations.push(load_document(&path, &display)?);
        }
    }

    tracing::debug!(count = operations.len(), "loaded operation documents");
    Ok(operations)
}

fn load_document(path: &Path, reference: &str) -> Result<ParsedOperation, DocumentLoadError> {
    // A read failure on the document itself is reported as a missing
    // document, not as an import problem.
    let combined = expand_imports(path).map_err(|error| match error {
        ImportError::FileRead { path: failed, source } if failed.as_path() == path => {
            DocumentLoadError::FileRead {
                path: PathBuf::from(reference),
                source,
            }
        }
        other => DocumentLoadError::Import(other),
    })?;
    let document = graphql_tools::parser::parse_query::<String>(&combined)
        .map_err(|source| DocumentLoadError::Parse {
            path: PathBuf::from(reference),
            source,
        })?
        .into_static();

    Ok(ParsedOperation {
        // Attributed under the reference as supplied, not the canonical
        // path, so diagnostics echo what the user wrote.
        file_path: PathBuf::from(reference),
        document,
    })
}

fn is_glob_pattern(reference: &str) -> bool {
    reference.contains(['*', '?', '[', '{'])
}
