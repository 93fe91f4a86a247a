//! Turns one table configuration into introspected tables.

mod columns;
mod keys;

use crate::config::{IgnoredColumn, TableConfiguration};
use crate::error::AbatorError;
use crate::provider::MetadataProvider;
use crate::schema::{ActualTableName, ColumnDefinitions, FullyQualifiedTable, IntrospectedTable};
use crate::typemap::TypeResolver;
use crate::warnings::Warnings;

use columns::{IgnoredColumnReport, TableColumns};

/// The outcome of a metadata lookup whose failure is not fatal.
#[derive(Debug)]
pub enum Lookup<T> {
    Available(T),
    Unavailable(AbatorError),
}

impl<T> From<Result<T, AbatorError>> for Lookup<T> {
    fn from(result: Result<T, AbatorError>) -> Self {
        match result {
            Ok(value) => Lookup::Available(value),
            Err(e) => Lookup::Unavailable(e),
        }
    }
}

pub struct DatabaseIntrospector<'a, P, R> {
    provider: &'a mut P,
    resolver: &'a R,
    warnings: &'a mut Warnings,
}

impl<'a, P: MetadataProvider, R: TypeResolver> DatabaseIntrospector<'a, P, R> {
    pub fn new(provider: &'a mut P, resolver: &'a R, warnings: &'a mut Warnings) -> Self {
        Self {
            provider,
            resolver,
            warnings,
        }
    }

    /// Introspect every physical table matched by `tc`.
    ///
    /// Returns an empty list (with a warning) when nothing matched. Only a
    /// failure of the column lookup itself is an error.
    pub async fn introspect_tables(
        &mut self,
        tc: &TableConfiguration,
    ) -> Result<Vec<IntrospectedTable>, AbatorError> {
        let pattern = columns::lookup_pattern(
            tc,
            self.provider.identifier_case(),
            self.provider.search_string_escape(),
        );
        tracing::debug!("Looking up columns for {pattern:?}");

        let rows = self.provider.columns(&pattern).await?;
        let mut tables = columns::group_by_table(rows);

        if tables.is_empty() {
            self.warnings.push(format!(
                "Table configuration with catalog {}, schema {}, and table {} did not resolve to any tables",
                tc.catalog.as_deref().unwrap_or("null"),
                tc.schema.as_deref().unwrap_or("null"),
                tc.table_name
            ));
            return Ok(Vec::new());
        }

        let report = IgnoredColumnReport::build(&tc.ignored_columns, &tables);
        columns::remove_ignored_columns(tc, &mut tables);

        let renaming = tc
            .column_renaming_rule
            .as_ref()
            .map(|rule| rule.compile())
            .transpose()
            .map_err(|e| {
                AbatorError::InvalidConfiguration(vec![format!(
                    "Invalid column renaming rule in table {tc}: {e}"
                )])
            })?;
        columns::calculate_extra_column_information(
            tc,
            renaming.as_ref(),
            self.resolver,
            &mut tables,
            self.warnings,
        );
        columns::apply_column_overrides(tc, &mut tables);
        columns::calculate_identity_columns(tc, &mut tables);

        let mut introspected = Vec::new();
        for (actual, mut table) in self.calculate_introspected_tables(tc, tables) {
            self.calculate_primary_key(&actual, &mut table).await;
            self.calculate_indexes(&actual, &mut table).await;
            self.calculate_foreign_keys(&actual, &mut table).await;
            // Unmatched ignored columns are reported once, on the first table kept.
            let unmatched: &[&IgnoredColumn] = if introspected.is_empty() {
                report.unmatched()
            } else {
                &[]
            };
            if self.validate_table(tc, &mut table, unmatched) {
                introspected.push(table);
            }
        }

        tracing::debug!("{tc} resolved to {} table(s)", introspected.len());
        Ok(introspected)
    }

    /// Assemble one table per physical table. The catalog and schema the
    /// database returned are only kept when the configuration named them.
    fn calculate_introspected_tables(
        &self,
        tc: &TableConfiguration,
        tables: TableColumns,
    ) -> Vec<(ActualTableName, IntrospectedTable)> {
        let delimit = tc.requires_literal_identifiers();

        tables
            .into_iter()
            .map(|(actual, columns)| {
                let table = FullyQualifiedTable::new(&actual, tc, delimit);
                let mut cds = ColumnDefinitions::new();
                for column in columns {
                    cds.add_column(column);
                }
                (actual, IntrospectedTable::new(table, cds, tc))
            })
            .collect()
    }

    async fn calculate_primary_key(&mut self, actual: &ActualTableName, table: &mut IntrospectedTable) {
        match Lookup::from(self.provider.primary_keys(actual).await) {
            Lookup::Available(names) => {
                for name in names {
                    table.columns.add_primary_key_column(&name);
                }
            }
            Lookup::Unavailable(e) => self.unavailable(table, "primary key", &e),
        }
    }

    async fn calculate_indexes(&mut self, actual: &ActualTableName, table: &mut IntrospectedTable) {
        match Lookup::from(self.provider.index_info(actual).await) {
            Lookup::Available(rows) => {
                for index in keys::group_indexes(rows) {
                    let added = if index.unique {
                        table.columns.add_unique_index(&index.columns)
                    } else {
                        table.columns.add_non_unique_index(&index.columns)
                    };
                    if !added {
                        tracing::debug!("Skipped index {} on {}", index.name, table.table);
                    }
                }
            }
            Lookup::Unavailable(e) => self.unavailable(table, "index", &e),
        }
    }

    async fn calculate_foreign_keys(&mut self, actual: &ActualTableName, table: &mut IntrospectedTable) {
        match Lookup::from(self.provider.imported_keys(actual).await) {
            Lookup::Available(rows) => {
                for fk in keys::group_foreign_keys(rows) {
                    table.columns.add_foreign_key(&fk);
                }
            }
            Lookup::Unavailable(e) => self.unavailable(table, "foreign key", &e),
        }
    }

    fn unavailable(&mut self, table: &mut IntrospectedTable, what: &str, error: &AbatorError) {
        let warning = format!(
            "Cannot obtain {what} information from the database for table {}: {error}",
            table.table
        );
        self.record(table, warning);
    }

    /// Record a warning in the sink and on the table it concerns.
    fn record(&mut self, table: &mut IntrospectedTable, warning: String) {
        table.warnings.push(warning.clone());
        self.warnings.push(warning);
    }

    /// Drop unusable tables and report configured columns that do not exist.
    fn validate_table(
        &mut self,
        tc: &TableConfiguration,
        table: &mut IntrospectedTable,
        unmatched_ignored: &[&IgnoredColumn],
    ) -> bool {
        if !table.columns.has_any_columns() {
            self.warnings
                .push(format!("Table {} contains no columns", table.table));
            return false;
        }
        if !table.columns.has_primary_key_columns() && !table.columns.has_base_columns() {
            self.warnings.push(format!(
                "Table {} does not exist, or contains only BLOB columns",
                table.table
            ));
            return false;
        }

        for co in &tc.column_overrides {
            if table.columns.get_column(&co.column).is_none() {
                let warning = format!(
                    "Column {}, specified as an override column in table {}, does not exist in the table.",
                    co.column, table.table
                );
                self.record(table, warning);
            }
        }

        for ic in unmatched_ignored {
            let warning = format!(
                "Column {}, specified as an ignored column in table {}, does not exist in the table.",
                ic.column, table.table
            );
            self.record(table, warning);
        }

        if let Some(key) = &tc.generated_key {
            if table.columns.get_column(&key.column).is_none() {
                let kind = if key.identity { "an identity" } else { "a generated key" };
                let warning = format!(
                    "Column {}, specified as {kind} column in table {}, does not exist in the table.",
                    key.column, table.table
                );
                self.record(table, warning);
            }
        }

        true
    }
}
