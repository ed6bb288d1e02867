//! Provisioning of search service definitions
//!
//! Data sources, indexes, skillsets and indexers are written as JSON files
//! and submitted through [`crate::search::SearchGateway::send`]. The data
//! source and skillset definitions ship without their secrets; the loader
//! fills those in from [`crate::config::SecretsConfig`] just before the
//! request is built.

pub mod loader;
pub mod status;

pub use loader::{load_document, DocumentKind};
pub use status::describe_indexer_status;

/// Literal accepted in place of a file name for requests without a body
pub const NO_BODY: &str = "null";
