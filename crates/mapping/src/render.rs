//! The document renderer boundary
//!
//! Rendering itself lives outside this engine; the engine hands a resolved
//! document to an implementation of [`DocumentRenderer`] and gets bytes
//! back. Renderer failures are fatal for the current generation attempt and
//! name the offending field so the operator can correct the template.

use thiserror::Error;

use crate::resolve::ResolvedDocument;

/// Errors surfaced from a document renderer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Field '{field}' has invalid geometry")]
    InvalidGeometry { field: String },

    #[error("Field '{field}' references missing resource '{resource}'")]
    MissingResource { field: String, resource: String },

    #[error("Renderer backend error: {0}")]
    Backend(String),
}

/// Turns resolved field values plus layout geometry into a binary document
pub trait DocumentRenderer {
    fn render(&self, document: &ResolvedDocument) -> Result<Vec<u8>, RenderError>;
}
