pub mod documents;
pub mod error;
pub mod hooks;
pub mod imports;
pub mod pipeline;
pub mod schema;
pub mod template;
pub mod validate;

pub use graphql_tools;

/// Owned GraphQL schema AST, the canonical type-system representation every
/// downstream consumer (validator, template plugins) works with.
pub type SchemaDocument = graphql_tools::static_graphql::schema::Document;

/// Owned GraphQL operation AST.
pub type OperationDocument = graphql_tools::static_graphql::query::Document;
