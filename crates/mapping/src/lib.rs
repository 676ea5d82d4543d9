//! Mapping - document template field-mapping and resolution engine
//!
//! This crate provides:
//! - Field extraction from raw template definitions
//! - Advisory structural validation of templates
//! - A pure field-mapping model (source bindings, formats, computations)
//! - A closed-vocabulary computation evaluator (dates, count, sum, concat)
//! - Locale-aware resolution of business records into renderable values
//! - Contracts for template persistence and document rendering
//!
//! # Example
//!
//! ```ignore
//! use mapping::{extract_fields, resolve, FieldMapping, FieldType};
//!
//! let fields = extract_fields(&template_schema);
//! let mapping = FieldMapping::new()
//!     .with_source("customer_name", "customers", "name", FieldType::Text);
//! let outcome = resolve(&fields, &mapping, &record);
//! let bytes = renderer.render(&outcome.document)?;
//! ```

pub mod binding;
pub mod catalog;
pub mod compute;
pub mod extract;
pub mod record;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod validate;

pub use binding::{Binding, FieldMapping, MappingStatus};
pub use catalog::{ColumnCatalog, ColumnDescriptor, ColumnGroup};
pub use compute::{ComputationSpec, ComputedValue};
pub use extract::extract_fields;
pub use render::{DocumentRenderer, RenderError};
pub use resolve::{
    resolve, resolve_at, ResolveOutcome, ResolveWarning, ResolvedDocument, ResolvedField,
    ResolvedValue,
};
pub use schema::{FieldSpec, FieldType, Position, Template};
pub use store::{MemoryStore, StoreError, TemplateStore};
pub use validate::validate_template;

use thiserror::Error;

/// Errors from mapping update operations
///
/// These are returned by the overlay operations; the mapping the caller
/// holds is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Field '{0}' has no binding yet")]
    UnmappedField(String),

    #[error("Field '{0}' is not bound as a computed field")]
    NotComputed(String),
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;
