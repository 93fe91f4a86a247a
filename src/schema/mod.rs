pub mod columns;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::{GeneratedKey, StatementToggles, TableConfiguration};
use crate::naming::{self, MethodNameCalculator, MethodNameStyle};
use crate::rules::{ModelType, Rules};

pub use columns::ColumnDefinitions;

/// JDBC type codes, as reported by a metadata provider for each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JdbcType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    Binary,
    VarBinary,
    LongVarBinary,
    Null,
    Other,
    JavaObject,
    Distinct,
    Struct,
    Array,
    Blob,
    Clob,
    Ref,
    DataLink,
    Boolean,
}

impl JdbcType {
    /// The numeric code from `java.sql.Types`.
    pub fn code(self) -> i32 {
        match self {
            JdbcType::Bit => -7,
            JdbcType::TinyInt => -6,
            JdbcType::SmallInt => 5,
            JdbcType::Integer => 4,
            JdbcType::BigInt => -5,
            JdbcType::Float => 6,
            JdbcType::Real => 7,
            JdbcType::Double => 8,
            JdbcType::Numeric => 2,
            JdbcType::Decimal => 3,
            JdbcType::Char => 1,
            JdbcType::Varchar => 12,
            JdbcType::LongVarchar => -1,
            JdbcType::Date => 91,
            JdbcType::Time => 92,
            JdbcType::Timestamp => 93,
            JdbcType::Binary => -2,
            JdbcType::VarBinary => -3,
            JdbcType::LongVarBinary => -4,
            JdbcType::Null => 0,
            JdbcType::Other => 1111,
            JdbcType::JavaObject => 2000,
            JdbcType::Distinct => 2001,
            JdbcType::Struct => 2002,
            JdbcType::Array => 2003,
            JdbcType::Blob => 2004,
            JdbcType::Clob => 2005,
            JdbcType::Ref => 2006,
            JdbcType::DataLink => 70,
            JdbcType::Boolean => 16,
        }
    }

    /// The JDBC type name used in mapped statements (e.g. `VARCHAR`).
    pub fn name(self) -> &'static str {
        match self {
            JdbcType::Bit => "BIT",
            JdbcType::TinyInt => "TINYINT",
            JdbcType::SmallInt => "SMALLINT",
            JdbcType::Integer => "INTEGER",
            JdbcType::BigInt => "BIGINT",
            JdbcType::Float => "FLOAT",
            JdbcType::Real => "REAL",
            JdbcType::Double => "DOUBLE",
            JdbcType::Numeric => "NUMERIC",
            JdbcType::Decimal => "DECIMAL",
            JdbcType::Char => "CHAR",
            JdbcType::Varchar => "VARCHAR",
            JdbcType::LongVarchar => "LONGVARCHAR",
            JdbcType::Date => "DATE",
            JdbcType::Time => "TIME",
            JdbcType::Timestamp => "TIMESTAMP",
            JdbcType::Binary => "BINARY",
            JdbcType::VarBinary => "VARBINARY",
            JdbcType::LongVarBinary => "LONGVARBINARY",
            JdbcType::Null => "NULL",
            JdbcType::Other => "OTHER",
            JdbcType::JavaObject => "JAVA_OBJECT",
            JdbcType::Distinct => "DISTINCT",
            JdbcType::Struct => "STRUCT",
            JdbcType::Array => "ARRAY",
            JdbcType::Blob => "BLOB",
            JdbcType::Clob => "CLOB",
            JdbcType::Ref => "REF",
            JdbcType::DataLink => "DATALINK",
            JdbcType::Boolean => "BOOLEAN",
        }
    }
}

/// The generation-language type chosen for a column by a `TypeResolver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Fully qualified Java type (e.g. `java.lang.String`, `byte[]`).
    pub java_type: String,
    /// JDBC type name written into mapped statements. Column overrides may replace it.
    pub jdbc_type_name: String,
}

const BLOB_JDBC_TYPES: &[&str] = &[
    "BINARY",
    "BLOB",
    "CLOB",
    "LONGVARBINARY",
    "LONGVARCHAR",
    "VARBINARY",
];

/// Compare a configured name with an actual one.
///
/// Delimited names compare exactly; everything else ignores case.
pub fn names_match(delimited: bool, actual: &str, configured: &str) -> bool {
    if delimited {
        actual == configured
    } else {
        actual.to_lowercase() == configured.to_lowercase()
    }
}

/// True if the identifier contains whitespace and must be delimited in SQL.
pub fn requires_delimiting(name: &str) -> bool {
    name.chars().any(char::is_whitespace)
}

/// One physical column of an introspected table.
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub actual_column_name: String,
    pub column_name_delimited: bool,
    pub jdbc_type: JdbcType,
    /// The provider's native type name (e.g. `varchar`, `int4`).
    pub type_name: String,
    pub length: i32,
    pub scale: i32,
    pub nullable: bool,
    pub resolved_type: Option<ResolvedType>,
    pub java_property: String,
    pub identity: bool,
    pub type_handler: Option<String>,
}

impl ColumnDefinition {
    pub fn new(actual_column_name: impl Into<String>, jdbc_type: JdbcType) -> Self {
        let actual_column_name = actual_column_name.into();
        Self {
            column_name_delimited: requires_delimiting(&actual_column_name),
            actual_column_name,
            jdbc_type,
            type_name: jdbc_type.name().to_lowercase(),
            length: 0,
            scale: 0,
            nullable: true,
            resolved_type: None,
            java_property: String::new(),
            identity: false,
            type_handler: None,
        }
    }

    /// The JDBC type name after resolution and overrides.
    pub fn jdbc_type_name(&self) -> &str {
        self.resolved_type
            .as_ref()
            .map(|r| r.jdbc_type_name.as_str())
            .unwrap_or_else(|| self.jdbc_type.name())
    }

    pub fn java_type(&self) -> Option<&str> {
        self.resolved_type.as_ref().map(|r| r.java_type.as_str())
    }

    pub fn is_blob_column(&self) -> bool {
        BLOB_JDBC_TYPES.contains(&self.jdbc_type_name())
    }

    pub fn is_jdbc_date_column(&self) -> bool {
        self.jdbc_type_name() == "DATE" && self.java_type() == Some("java.util.Date")
    }

    pub fn is_jdbc_time_column(&self) -> bool {
        self.jdbc_type_name() == "TIME" && self.java_type() == Some("java.util.Date")
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(self.column_name_delimited, &self.actual_column_name, name)
    }

    /// Key used when comparing column groups as sets.
    pub fn match_key(&self) -> String {
        if self.column_name_delimited {
            self.actual_column_name.clone()
        } else {
            self.actual_column_name.to_lowercase()
        }
    }

    /// The column name as it must appear in SQL.
    pub fn escaped_column_name(&self) -> String {
        if self.column_name_delimited {
            format!("\"{}\"", self.actual_column_name)
        } else {
            self.actual_column_name.clone()
        }
    }
}

/// Compose `catalog.schema.table`, skipping absent parts.
///
/// A catalog without a schema keeps an empty schema slot (`catalog..table`).
pub fn compose_fully_qualified_table_name(
    catalog: Option<&str>,
    schema: Option<&str>,
    table_name: &str,
    separator: char,
) -> String {
    let mut out = String::new();

    if let Some(catalog) = catalog.filter(|c| !c.is_empty()) {
        out.push_str(catalog);
        out.push(separator);
    }

    match schema.filter(|s| !s.is_empty()) {
        Some(schema) => {
            out.push_str(schema);
            out.push(separator);
        }
        None if !out.is_empty() => out.push(separator),
        None => {}
    }

    out.push_str(table_name);
    out
}

/// The catalog, schema, and table name exactly as returned by the metadata provider.
///
/// Equality and hashing use the composed qualified name.
#[derive(Debug, Clone)]
pub struct ActualTableName {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
}

impl ActualTableName {
    pub fn new(catalog: Option<String>, schema: Option<String>, table_name: impl Into<String>) -> Self {
        Self {
            catalog,
            schema,
            table_name: table_name.into(),
        }
    }
}

impl fmt::Display for ActualTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_fully_qualified_table_name(
            self.catalog.as_deref(),
            self.schema.as_deref(),
            &self.table_name,
            '.',
        ))
    }
}

impl PartialEq for ActualTableName {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ActualTableName {}

impl Hash for ActualTableName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// The resolved identity of a table: what was introspected plus the user's naming choices.
#[derive(Debug, Clone)]
pub struct FullyQualifiedTable {
    pub introspected_catalog: Option<String>,
    pub introspected_schema: Option<String>,
    pub introspected_table_name: String,
    pub domain_object_name: String,
    pub alias: Option<String>,
    pub ignore_qualifiers_at_runtime: bool,
    pub runtime_table_name: Option<String>,
    pub delimit_identifiers: bool,
}

impl FullyQualifiedTable {
    /// Build the table identity for a physical table matched by `tc`.
    ///
    /// The returned catalog and schema are only kept if the configuration asked
    /// for one; otherwise they are database defaults that must stay out of the SQL.
    pub fn new(actual: &ActualTableName, tc: &TableConfiguration, delimit_identifiers: bool) -> Self {
        let domain_object_name = tc
            .domain_object_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| naming::domain_object_name(&actual.table_name));

        Self {
            introspected_catalog: tc.catalog.as_ref().and(actual.catalog.clone()),
            introspected_schema: tc.schema.as_ref().and(actual.schema.clone()),
            introspected_table_name: actual.table_name.clone(),
            domain_object_name,
            alias: tc.alias.clone().filter(|a| !a.is_empty()),
            ignore_qualifiers_at_runtime: tc.ignore_qualifiers_at_runtime,
            runtime_table_name: tc.runtime_table_name.clone().filter(|n| !n.is_empty()),
            delimit_identifiers,
        }
    }

    fn delimit(&self, identifier: &str) -> String {
        if self.delimit_identifiers {
            format!("\"{identifier}\"")
        } else {
            identifier.to_string()
        }
    }

    /// The table name to use in generated SQL.
    pub fn fully_qualified_table_name_at_runtime(&self) -> String {
        let table_name = self
            .runtime_table_name
            .as_deref()
            .unwrap_or(&self.introspected_table_name);
        let table_name = self.delimit(table_name);

        if self.ignore_qualifiers_at_runtime {
            return table_name;
        }

        let catalog = self.introspected_catalog.as_deref().map(|c| self.delimit(c));
        let schema = self.introspected_schema.as_deref().map(|s| self.delimit(s));
        compose_fully_qualified_table_name(catalog.as_deref(), schema.as_deref(), &table_name, '.')
    }

    /// The runtime table name followed by the alias, if any.
    pub fn aliased_fully_qualified_table_name_at_runtime(&self) -> String {
        let name = self.fully_qualified_table_name_at_runtime();
        match &self.alias {
            Some(alias) => format!("{name} {alias}"),
            None => name,
        }
    }
}

impl fmt::Display for FullyQualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_fully_qualified_table_name(
            self.introspected_catalog.as_deref(),
            self.introspected_schema.as_deref(),
            &self.introspected_table_name,
            '.',
        ))
    }
}

/// The generation model for one physical table.
#[derive(Debug, Clone)]
pub struct IntrospectedTable {
    pub table: FullyQualifiedTable,
    pub columns: ColumnDefinitions,
    pub model_type: ModelType,
    pub method_names: MethodNameStyle,
    pub statements: StatementToggles,
    pub generated_key: Option<GeneratedKey>,
    /// Warnings raised about this table during introspection.
    pub warnings: Vec<String>,
}

impl IntrospectedTable {
    pub fn new(table: FullyQualifiedTable, columns: ColumnDefinitions, tc: &TableConfiguration) -> Self {
        Self {
            table,
            columns,
            model_type: tc.model_type(),
            method_names: tc.method_names(),
            statements: tc.statements.clone(),
            generated_key: tc.generated_key.clone(),
            warnings: Vec::new(),
        }
    }

    pub fn rules(&self) -> Rules<'_> {
        Rules::new(self.model_type, &self.columns, &self.statements)
    }

    pub fn method_name_calculator(&self) -> &'static dyn MethodNameCalculator {
        naming::calculator(self.method_names)
    }
}
