//! The column catalog: which business-data columns can be mapped
//!
//! The catalog is injected configuration, built once at startup and never
//! mutated. Deployments supply their own; nothing in the engine assumes a
//! particular business schema.

use serde::{Deserialize, Serialize};

use crate::schema::FieldType;

/// One mappable source column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDescriptor {
    /// Source table name
    pub table: String,

    /// Column name within the table
    pub column: String,

    /// Declared value type
    #[serde(rename = "type")]
    pub column_type: FieldType,

    /// Human-readable label for pickers
    pub label: String,
}

/// Columns of one source table, in presentation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnGroup {
    /// Source table name
    pub table: String,

    /// Display label for the group
    #[serde(default)]
    pub label: String,

    /// Columns in presentation order
    pub columns: Vec<ColumnDescriptor>,
}

/// Ordered, immutable registry of mappable columns
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ColumnCatalog {
    groups: Vec<ColumnGroup>,
}

impl ColumnCatalog {
    /// Build a catalog from ordered groups
    pub fn new(groups: Vec<ColumnGroup>) -> Self {
        Self { groups }
    }

    /// Parse a catalog from its JSON configuration form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Groups in presentation order
    pub fn groups(&self) -> &[ColumnGroup] {
        &self.groups
    }

    /// Table names in presentation order
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.table.as_str())
    }

    /// Columns of one table
    pub fn columns(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.groups
            .iter()
            .find(|g| g.table == table)
            .map(|g| g.columns.as_slice())
    }

    /// Look up one column descriptor
    pub fn find(&self, table: &str, column: &str) -> Option<&ColumnDescriptor> {
        self.columns(table)?.iter().find(|c| c.column == column)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
