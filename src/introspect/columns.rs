use regex::Regex;

use crate::config::{IgnoredColumn, TableConfiguration};
use crate::naming::{camel_case_property, valid_property_name};
use crate::provider::{IdentifierCase, RawColumn, TablePattern};
use crate::schema::{ActualTableName, ColumnDefinition, FullyQualifiedTable};
use crate::typemap::TypeResolver;
use crate::warnings::Warnings;

/// Raw columns grouped by the physical table they belong to, in retrieval order.
pub type TableColumns = Vec<(ActualTableName, Vec<ColumnDefinition>)>;

/// Build the column lookup arguments for a table configuration.
pub fn lookup_pattern(tc: &TableConfiguration, case: IdentifierCase, escape: &str) -> TablePattern {
    let fold = |s: &str| {
        if tc.requires_literal_identifiers() {
            s.to_string()
        } else {
            case.apply(s)
        }
    };

    let mut schema = tc.schema.as_deref().map(fold);
    let mut table = fold(&tc.table_name);

    if tc.escape_wildcards {
        schema = schema.map(|s| escape_wildcards(&s, escape));
        table = escape_wildcards(&table, escape);
    }

    TablePattern {
        catalog: tc.catalog.as_deref().map(fold),
        schema_pattern: schema,
        table_pattern: table,
    }
}

/// Prefix every `_` and `%` with the escape string.
pub fn escape_wildcards(identifier: &str, escape: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for c in identifier.chars() {
        if c == '_' || c == '%' {
            out.push_str(escape);
        }
        out.push(c);
    }
    out
}

/// Group raw rows by table, keeping the order in which tables first appear.
pub fn group_by_table(rows: Vec<RawColumn>) -> TableColumns {
    let mut tables: TableColumns = Vec::new();

    for row in rows {
        let mut column = ColumnDefinition::new(row.column_name, row.jdbc_type);
        column.type_name = row.type_name;
        column.length = row.length;
        column.scale = row.scale;
        column.nullable = row.nullable;

        match tables.iter_mut().find(|(name, _)| *name == row.table) {
            Some((_, columns)) => columns.push(column),
            None => tables.push((row.table, vec![column])),
        }
    }

    tables
}

/// Which ignored columns never matched a retrieved column.
///
/// Built once per table configuration, over every table it matched.
#[derive(Debug)]
pub struct IgnoredColumnReport<'a> {
    unmatched: Vec<&'a IgnoredColumn>,
}

impl<'a> IgnoredColumnReport<'a> {
    pub fn build(ignored: &'a [IgnoredColumn], tables: &TableColumns) -> Self {
        let unmatched = ignored
            .iter()
            .filter(|ic| {
                !tables
                    .iter()
                    .flat_map(|(_, columns)| columns)
                    .any(|c| ic.matches(&c.actual_column_name))
            })
            .collect();
        Self { unmatched }
    }

    pub fn unmatched(&self) -> &[&'a IgnoredColumn] {
        &self.unmatched
    }
}

pub fn remove_ignored_columns(tc: &TableConfiguration, tables: &mut TableColumns) {
    for (_, columns) in tables.iter_mut() {
        columns.retain(|c| {
            let ignored = tc.ignored_columns.iter().any(|ic| ic.matches(&c.actual_column_name));
            if ignored {
                tracing::debug!("Ignoring column {}", c.actual_column_name);
            }
            !ignored
        });
    }
}

/// Assign property names, then resolve types. Columns with an unsupported
/// type are dropped with a warning.
pub fn calculate_extra_column_information(
    tc: &TableConfiguration,
    renaming: Option<&Regex>,
    resolver: &impl TypeResolver,
    tables: &mut TableColumns,
    warnings: &mut Warnings,
) {
    let replacement = match (renaming, &tc.column_renaming_rule) {
        (Some(re), Some(rule)) => rule.replacement(re),
        _ => String::new(),
    };

    for (table, columns) in tables.iter_mut() {
        let display = FullyQualifiedTable::new(table, tc, tc.requires_literal_identifiers());
        columns.retain_mut(|column| {
            let calculated = match renaming {
                Some(re) => re
                    .replace_all(&column.actual_column_name, replacement.as_str())
                    .into_owned(),
                None => column.actual_column_name.clone(),
            };

            column.java_property = if tc.use_actual_column_names {
                valid_property_name(&calculated)
            } else {
                camel_case_property(&calculated)
            };

            match resolver.resolve(column) {
                Ok(resolved) => {
                    column.resolved_type = Some(resolved);
                    true
                }
                Err(e) => {
                    tracing::debug!(
                        "{e} (code {}, native type {}) on {table}.{}",
                        e.0.code(),
                        column.type_name,
                        column.actual_column_name
                    );
                    warnings.push(format!(
                        "Unsupported data type in table {display}, column: {}",
                        column.actual_column_name
                    ));
                    false
                }
            }
        });
    }
}

pub fn apply_column_overrides(tc: &TableConfiguration, tables: &mut TableColumns) {
    for column in tables.iter_mut().flat_map(|(_, columns)| columns.iter_mut()) {
        let Some(co) = tc.column_override(&column.actual_column_name) else {
            continue;
        };

        if let Some(property) = co.property.as_ref().filter(|p| !p.is_empty()) {
            column.java_property = property.clone();
        }
        if let Some(resolved) = column.resolved_type.as_mut() {
            if let Some(java_type) = co.java_type.as_ref().filter(|t| !t.is_empty()) {
                resolved.java_type = java_type.clone();
            }
            if let Some(jdbc_type) = co.jdbc_type.as_ref().filter(|t| !t.is_empty()) {
                resolved.jdbc_type_name = jdbc_type.clone();
            }
        }
        if let Some(handler) = co.type_handler.as_ref().filter(|h| !h.is_empty()) {
            column.type_handler = Some(handler.clone());
        }
        if co.is_column_name_delimited() {
            column.column_name_delimited = true;
        }
    }
}

pub fn calculate_identity_columns(tc: &TableConfiguration, tables: &mut TableColumns) {
    let identity_key = tc.generated_key.as_ref().filter(|key| key.identity);

    for column in tables.iter_mut().flat_map(|(_, columns)| columns.iter_mut()) {
        column.identity = identity_key.is_some_and(|key| column.matches_name(&key.column));
    }
}
