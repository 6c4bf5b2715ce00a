mod ast_json;
mod export;
mod introspection;
mod merge;
mod resolver;

pub use export::SchemaExport;
pub use merge::merge;
pub use resolver::resolve;

use std::path::PathBuf;

use crate::SchemaDocument;

/// A schema reference plus the shape it arrives in. Immutable once resolved.
///
/// File paths are discriminated by extension: `.graphql`/`.gql`/`.graphqls`
/// files are SDL (with optional `#import` lines), `.json` files carry a
/// JSON export payload that is classified structurally (introspection
/// result, serialized AST, or SDL string). The `Text` and `Instance`
/// variants cover schemas handed over programmatically.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    FilePath(PathBuf),
    Text(String),
    Instance(Box<SchemaDocument>),
}

/// The canonical type-system representation every source shape resolves to.
///
/// Two semantically equivalent sources (SDL text, its serialized AST, its
/// introspection) resolve to documents that print to the same canonical SDL.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub document: SchemaDocument,
}

impl ResolvedSchema {
    /// Canonical SDL rendering, the structural-equality key across source
    /// formats (AST positions differ between formats, the printed form does
    /// not).
    pub fn canonical_sdl(&self) -> String {
        self.document.to_string()
    }
}
