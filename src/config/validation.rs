//! Configuration validation.

use std::collections::HashSet;

use super::{Configuration, TableConfiguration};

/// Validate the configuration and return every problem found.
pub fn validate(config: &Configuration) -> Vec<String> {
    let mut errors = Vec::new();

    if config.tables.is_empty() {
        errors.push("At least one table must be configured".to_string());
    }

    let mut seen = HashSet::new();
    for (position, tc) in config.tables.iter().enumerate() {
        validate_table(tc, position, &mut errors);

        if !tc.table_name.is_empty() {
            let key = tc.to_string().to_lowercase();
            if !seen.insert(key) {
                errors.push(format!("Table {tc} is configured more than once"));
            }
        }
    }

    errors
}

fn validate_table(tc: &TableConfiguration, position: usize, errors: &mut Vec<String>) {
    if tc.table_name.is_empty() {
        errors.push(format!("Missing table_name in table configuration at position {position}"));
        return;
    }

    if let Some(key) = &tc.generated_key {
        if key.column.is_empty() {
            errors.push(format!("Generated key in table {tc} requires a column"));
        }
        if key.sql_statement.is_empty() {
            errors.push(format!("Generated key in table {tc} requires a sql_statement"));
        }
        if let Some(key_type) = &key.key_type {
            if key_type != "pre" && key_type != "post" {
                errors.push(format!(
                    "Generated key type in table {tc} must be 'pre' or 'post', got '{key_type}'"
                ));
            }
        }
    }

    if let Some(rule) = &tc.column_renaming_rule {
        if rule.search_string.is_empty() {
            errors.push(format!("Column renaming rule in table {tc} requires a search_string"));
        } else if let Err(e) = rule.compile() {
            errors.push(format!("Invalid column renaming rule in table {tc}: {e}"));
        }
    }

    for (i, co) in tc.column_overrides.iter().enumerate() {
        if co.column.is_empty() {
            errors.push(format!("Missing column name in column override {i} of table {tc}"));
        }
    }

    for (i, ic) in tc.ignored_columns.iter().enumerate() {
        if ic.column.is_empty() {
            errors.push(format!("Missing column name in ignored column {i} of table {tc}"));
        }
    }
}
