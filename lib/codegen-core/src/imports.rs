//! Cross-file `#import` expansion shared by SDL schema files and operation
//! documents.
//!
//! An import is a comment line naming another file, either in the short form
//! `#import "./other.graphql"` or the long form
//! `# import Fragment from "./other.graphql"`. Referenced files are inlined
//! transitively before parsing. The in-progress resolution path is tracked
//! so a cyclic import fails instead of looping; a file reachable through
//! several paths (a diamond) is inlined exactly once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read imported file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cyclic import detected at '{}'", .path.display())]
    Cycle { path: PathBuf },
}

/// Reads `path` and returns its text with every `#import` line replaced by
/// the (recursively expanded) text of the referenced file.
pub fn expand_imports(path: &Path) -> Result<String, ImportError> {
    let mut output = String::new();
    let mut in_progress = Vec::new();
    let mut inlined = HashSet::new();
    expand_into(path, &mut output, &mut in_progress, &mut inlined)?;
    Ok(output)
}

fn expand_into(
    path: &Path,
    output: &mut String,
    in_progress: &mut Vec<PathBuf>,
    inlined: &mut HashSet<PathBuf>,
) -> Result<(), ImportError> {
    let canonical = path.canonicalize().map_err(|source| ImportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if in_progress.contains(&canonical) {
        return Err(ImportError::Cycle {
            path: path.to_path_buf(),
        });
    }
    if !inlined.insert(canonical.clone()) {
        return Ok(());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ImportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = canonical.parent().map(Path::to_path_buf).unwrap_or_default();

    in_progress.push(canonical);
    for line in text.lines() {
        match import_target(line) {
            Some(target) => {
                let imported = base_dir.join(target);
                expand_into(&imported, output, in_progress, inlined)?;
            }
            None => {
                output.push_str(line);
                output.push('\n');
            }
        }
    }
    in_progress.pop();

    Ok(())
}

/// Extracts the referenced path from an import comment line, if it is one.
pub fn import_target(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("import")?;
    if !rest.starts_with(char::is_whitespace)
        && !rest.starts_with('"')
        && !rest.starts_with('\'')
    {
        return None;
    }
    last_quoted(rest)
}

fn last_quoted(s: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if let Some(end) = s.rfind(quote) {
            if let Some(start) = s[..end].rfind(quote) {
                return Some(&s[start + 1..end]);
            }
        }
    }
    None
}
