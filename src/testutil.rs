use std::collections::HashMap;

use crate::config::TableConfiguration;
use crate::error::AbatorError;
use crate::naming::camel_case_property;
use crate::provider::{
    IdentifierCase, ImportedKeyColumn, IndexColumn, MetadataProvider, RawColumn, TablePattern,
};
use crate::schema::{
    ActualTableName, ColumnDefinition, ColumnDefinitions, FullyQualifiedTable, IntrospectedTable,
    JdbcType, ResolvedType,
};

/// Create a resolved, nullable INTEGER column whose property name is the camel-cased column name.
pub fn test_column(name: &str) -> ColumnDefinition {
    let mut column = ColumnDefinition::new(name, JdbcType::Integer);
    column.resolved_type = Some(ResolvedType {
        java_type: "java.lang.Integer".to_string(),
        jdbc_type_name: "INTEGER".to_string(),
    });
    column.java_property = camel_case_property(name);
    column
}

/// Create a resolved LONGVARBINARY column.
pub fn blob_column(name: &str) -> ColumnDefinition {
    let mut column = ColumnDefinition::new(name, JdbcType::LongVarBinary);
    column.resolved_type = Some(ResolvedType {
        java_type: "byte[]".to_string(),
        jdbc_type_name: "LONGVARBINARY".to_string(),
    });
    column.java_property = camel_case_property(name);
    column
}

/// Build a table with the given columns and a default configuration. No primary key is set.
pub fn test_table(name: &str, columns: Vec<ColumnDefinition>) -> IntrospectedTable {
    let tc = TableConfiguration::new(name);
    let actual = ActualTableName::new(None, None, name);
    let table = FullyQualifiedTable::new(&actual, &tc, false);

    let mut cds = ColumnDefinitions::new();
    for column in columns {
        cds.add_column(column);
    }
    IntrospectedTable::new(table, cds, &tc)
}

pub fn raw_column(schema: &str, table: &str, name: &str, jdbc_type: JdbcType) -> RawColumn {
    RawColumn {
        table: ActualTableName::new(None, Some(schema.to_string()), table),
        column_name: name.to_string(),
        jdbc_type,
        type_name: jdbc_type.name().to_lowercase(),
        length: 10,
        scale: 0,
        nullable: true,
    }
}

/// `LIKE` matching with `%`, `_`, and an escape character.
fn like(pattern: &[char], value: &[char], escape: char) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some((&c, rest)) if c == escape => match rest.split_first() {
            Some((&literal, rest)) => {
                value.first() == Some(&literal) && like(rest, &value[1..], escape)
            }
            None => false,
        },
        Some(('%', rest)) => (0..=value.len()).any(|i| like(rest, &value[i..], escape)),
        Some(('_', rest)) => !value.is_empty() && like(rest, &value[1..], escape),
        Some((&c, rest)) => value.first() == Some(&c) && like(rest, &value[1..], escape),
    }
}

/// In-memory metadata keyed by table name.
pub struct FakeProvider {
    pub case: IdentifierCase,
    pub columns: Vec<RawColumn>,
    pub primary_keys: HashMap<String, Vec<String>>,
    pub indexes: HashMap<String, Vec<IndexColumn>>,
    pub imported_keys: HashMap<String, Vec<ImportedKeyColumn>>,
    /// Lookups that fail: "columns", "primary_keys", "index_info", or "imported_keys".
    pub failing: Vec<&'static str>,
    /// Every column lookup received, in order.
    pub patterns: Vec<TablePattern>,
}

impl FakeProvider {
    pub fn new(columns: Vec<RawColumn>) -> Self {
        Self {
            case: IdentifierCase::Lower,
            columns,
            primary_keys: HashMap::new(),
            indexes: HashMap::new(),
            imported_keys: HashMap::new(),
            failing: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn with_primary_key(mut self, table: &str, columns: &[&str]) -> Self {
        self.primary_keys
            .insert(table.to_string(), columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_index(mut self, table: &str, index_name: &str, unique: bool, columns: &[&str]) -> Self {
        let rows = self.indexes.entry(table.to_string()).or_default();
        rows.extend(columns.iter().map(|c| IndexColumn {
            index_name: index_name.to_string(),
            column_name: c.to_string(),
            non_unique: !unique,
        }));
        self
    }

    pub fn with_foreign_key(mut self, table: &str, fk_name: &str, columns: &[&str]) -> Self {
        let rows = self.imported_keys.entry(table.to_string()).or_default();
        rows.extend(columns.iter().zip(1..).map(|(c, key_seq)| ImportedKeyColumn {
            fk_name: fk_name.to_string(),
            column_name: c.to_string(),
            key_seq,
        }));
        self
    }

    pub fn failing(mut self, lookup: &'static str) -> Self {
        self.failing.push(lookup);
        self
    }

    fn check(&self, lookup: &str) -> Result<(), AbatorError> {
        if self.failing.contains(&lookup) {
            return Err(AbatorError::Metadata(format!("{lookup} lookup failed")));
        }
        Ok(())
    }
}

impl MetadataProvider for FakeProvider {
    fn identifier_case(&self) -> IdentifierCase {
        self.case
    }

    fn search_string_escape(&self) -> &str {
        "\\"
    }

    async fn columns(&mut self, pattern: &TablePattern) -> Result<Vec<RawColumn>, AbatorError> {
        self.patterns.push(pattern.clone());
        self.check("columns")?;

        let table_pattern: Vec<char> = pattern.table_pattern.chars().collect();
        let schema_pattern: Vec<char> = pattern
            .schema_pattern
            .as_deref()
            .unwrap_or("%")
            .chars()
            .collect();

        Ok(self
            .columns
            .iter()
            .filter(|c| {
                let schema: Vec<char> = c.table.schema.as_deref().unwrap_or("").chars().collect();
                let table: Vec<char> = c.table.table_name.chars().collect();
                like(&schema_pattern, &schema, '\\') && like(&table_pattern, &table, '\\')
            })
            .cloned()
            .collect())
    }

    async fn primary_keys(&mut self, table: &ActualTableName) -> Result<Vec<String>, AbatorError> {
        self.check("primary_keys")?;
        Ok(self.primary_keys.get(&table.table_name).cloned().unwrap_or_default())
    }

    async fn index_info(&mut self, table: &ActualTableName) -> Result<Vec<IndexColumn>, AbatorError> {
        self.check("index_info")?;
        Ok(self.indexes.get(&table.table_name).cloned().unwrap_or_default())
    }

    async fn imported_keys(
        &mut self,
        table: &ActualTableName,
    ) -> Result<Vec<ImportedKeyColumn>, AbatorError> {
        self.check("imported_keys")?;
        Ok(self.imported_keys.get(&table.table_name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, value: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let value: Vec<char> = value.chars().collect();
        like(&pattern, &value, '\\')
    }

    #[test]
    fn test_like() {
        assert!(matches("orders", "orders"));
        assert!(matches("order%", "order_items"));
        assert!(matches("order_", "orders"));
        assert!(!matches("order\\_items", "orderXitems"));
        assert!(matches("order\\_items", "order_items"));
        assert!(!matches("orders", "orders2"));
    }
}
