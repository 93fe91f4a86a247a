use std::collections::BTreeSet;

use super::ColumnDefinition;

/// Classified columns of one table.
///
/// Every column lives in exactly one of the primary key, base, or BLOB lists.
/// Key, index, and foreign-key groups reference those columns and are
/// deduplicated on insertion with priority primary key > index > foreign key.
#[derive(Debug, Clone, Default)]
pub struct ColumnDefinitions {
    primary_key_columns: Vec<ColumnDefinition>,
    base_columns: Vec<ColumnDefinition>,
    blob_columns: Vec<ColumnDefinition>,
    has_jdbc_date_columns: bool,
    has_jdbc_time_columns: bool,
    foreign_keys: Vec<Vec<ColumnDefinition>>,
    unique_indexes: Vec<Vec<ColumnDefinition>>,
    non_unique_indexes: Vec<Vec<ColumnDefinition>>,
}

fn key_set(columns: &[ColumnDefinition]) -> BTreeSet<String> {
    columns.iter().map(ColumnDefinition::match_key).collect()
}

/// Order-independent comparison of a resolved group with another column list.
/// A group that resolved to no columns never duplicates anything.
fn same_columns(group: &[ColumnDefinition], other: &[ColumnDefinition]) -> bool {
    !group.is_empty() && key_set(group) == key_set(other)
}

impl ColumnDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: ColumnDefinition) {
        if column.is_jdbc_date_column() {
            self.has_jdbc_date_columns = true;
        }
        if column.is_jdbc_time_column() {
            self.has_jdbc_time_columns = true;
        }

        if column.is_blob_column() {
            self.blob_columns.push(column);
        } else {
            self.base_columns.push(column);
        }
    }

    /// Move the named column into the primary key.
    ///
    /// Base columns are searched first, then BLOB columns. Names that match
    /// nothing (e.g. an ignored column) are skipped.
    pub fn add_primary_key_column(&mut self, column_name: &str) {
        if let Some(pos) = self.base_columns.iter().position(|c| c.matches_name(column_name)) {
            let column = self.base_columns.remove(pos);
            self.primary_key_columns.push(column);
        } else if let Some(pos) = self.blob_columns.iter().position(|c| c.matches_name(column_name)) {
            let column = self.blob_columns.remove(pos);
            self.primary_key_columns.push(column);
        }
    }

    /// Record a unique index. Returns `false` if it was dropped.
    pub fn add_unique_index<S: AsRef<str>>(&mut self, column_names: &[S]) -> bool {
        match self.index_group(column_names) {
            Some(group) => {
                self.unique_indexes.push(group);
                true
            }
            None => false,
        }
    }

    /// Record a non-unique index. Returns `false` if it was dropped.
    pub fn add_non_unique_index<S: AsRef<str>>(&mut self, column_names: &[S]) -> bool {
        match self.index_group(column_names) {
            Some(group) => {
                self.non_unique_indexes.push(group);
                true
            }
            None => false,
        }
    }

    /// Record a foreign key. Returns `false` if it was dropped because the
    /// same column set is already covered by the primary key or an index.
    pub fn add_foreign_key<S: AsRef<str>>(&mut self, column_names: &[S]) -> bool {
        let Some(group) = self.index_group(column_names) else {
            return false;
        };

        let covered = self
            .unique_indexes
            .iter()
            .chain(self.non_unique_indexes.iter())
            .any(|index| same_columns(&group, index));
        if covered {
            tracing::debug!("Dropping foreign key {:?}: same columns as an index", key_set(&group));
            return false;
        }

        self.foreign_keys.push(group);
        true
    }

    /// Resolve names to columns, skipping names that match nothing, and reject
    /// groups that repeat the primary key.
    fn index_group<S: AsRef<str>>(&self, column_names: &[S]) -> Option<Vec<ColumnDefinition>> {
        let group: Vec<ColumnDefinition> = column_names
            .iter()
            .filter_map(|name| self.get_column(name.as_ref()).cloned())
            .collect();

        if same_columns(&group, &self.primary_key_columns) {
            tracing::debug!("Dropping column group: same columns as the primary key");
            return None;
        }

        Some(group)
    }

    /// Find a column by name, searching primary key, base, then BLOB columns.
    pub fn get_column(&self, column_name: &str) -> Option<&ColumnDefinition> {
        self.primary_key_columns
            .iter()
            .chain(self.base_columns.iter())
            .chain(self.blob_columns.iter())
            .find(|c| c.matches_name(column_name))
    }

    pub fn primary_key_columns(&self) -> &[ColumnDefinition] {
        &self.primary_key_columns
    }

    pub fn base_columns(&self) -> &[ColumnDefinition] {
        &self.base_columns
    }

    pub fn blob_columns(&self) -> &[ColumnDefinition] {
        &self.blob_columns
    }

    pub fn foreign_keys(&self) -> &[Vec<ColumnDefinition>] {
        &self.foreign_keys
    }

    pub fn unique_indexes(&self) -> &[Vec<ColumnDefinition>] {
        &self.unique_indexes
    }

    pub fn non_unique_indexes(&self) -> &[Vec<ColumnDefinition>] {
        &self.non_unique_indexes
    }

    /// All columns: primary key, then base, then BLOB.
    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.primary_key_columns
            .iter()
            .chain(self.base_columns.iter())
            .chain(self.blob_columns.iter())
    }

    pub fn has_primary_key_columns(&self) -> bool {
        !self.primary_key_columns.is_empty()
    }

    pub fn has_base_columns(&self) -> bool {
        !self.base_columns.is_empty()
    }

    pub fn has_blob_columns(&self) -> bool {
        !self.blob_columns.is_empty()
    }

    pub fn has_any_columns(&self) -> bool {
        self.has_primary_key_columns() || self.has_base_columns() || self.has_blob_columns()
    }

    pub fn has_jdbc_date_columns(&self) -> bool {
        self.has_jdbc_date_columns
    }

    pub fn has_jdbc_time_columns(&self) -> bool {
        self.has_jdbc_time_columns
    }
}
