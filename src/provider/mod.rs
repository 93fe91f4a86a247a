//! Database metadata access.
//!
//! The introspector only sees the [`MetadataProvider`] trait. Each bundled
//! provider drains every query before returning, so no two result sets are
//! ever open on the same connection.

pub mod mssql;
pub mod pg;

use crate::error::AbatorError;
use crate::schema::{ActualTableName, JdbcType};

/// How the database stores unquoted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierCase {
    Lower,
    Upper,
    AsIs,
}

impl IdentifierCase {
    pub fn apply(self, identifier: &str) -> String {
        match self {
            IdentifierCase::Lower => identifier.to_lowercase(),
            IdentifierCase::Upper => identifier.to_uppercase(),
            IdentifierCase::AsIs => identifier.to_string(),
        }
    }
}

/// Arguments of a column lookup. Schema and table are `LIKE` patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePattern {
    pub catalog: Option<String>,
    pub schema_pattern: Option<String>,
    pub table_pattern: String,
}

/// One row of a column lookup.
#[derive(Debug, Clone)]
pub struct RawColumn {
    pub table: ActualTableName,
    pub column_name: String,
    pub jdbc_type: JdbcType,
    pub type_name: String,
    /// Character length or numeric precision.
    pub length: i32,
    pub scale: i32,
    pub nullable: bool,
}

/// One column of one index, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    pub index_name: String,
    pub column_name: String,
    pub non_unique: bool,
}

/// One column of one foreign key declared on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedKeyColumn {
    pub fk_name: String,
    pub column_name: String,
    /// 1-based position of the column within the key.
    pub key_seq: i32,
}

/// Source of table, key, index, and foreign-key metadata.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    fn identifier_case(&self) -> IdentifierCase;

    /// The string that escapes `_` and `%` in lookup patterns.
    fn search_string_escape(&self) -> &str;

    /// Columns of every table matching the pattern, grouped by table and in
    /// ordinal order within each table.
    async fn columns(&mut self, pattern: &TablePattern) -> Result<Vec<RawColumn>, AbatorError>;

    /// Primary key column names in key order.
    async fn primary_keys(&mut self, table: &ActualTableName) -> Result<Vec<String>, AbatorError>;

    async fn index_info(&mut self, table: &ActualTableName) -> Result<Vec<IndexColumn>, AbatorError>;

    async fn imported_keys(
        &mut self,
        table: &ActualTableName,
    ) -> Result<Vec<ImportedKeyColumn>, AbatorError>;
}
