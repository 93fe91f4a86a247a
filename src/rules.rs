//! Code generation rules.
//!
//! A [`ModelType`] decides which record classes a table gets. [`Rules`] combines
//! that decision with the table's enabled statements to decide which mapped
//! statements and DAO methods exist.

use serde::Deserialize;

use crate::config::StatementToggles;
use crate::schema::ColumnDefinitions;

/// How columns are spread across generated record classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// One record class holding every column.
    Flat,
    /// Separate key, base record, and BLOB record classes wherever columns exist.
    Hierarchical,
    /// Like hierarchical, but never a class that would hold a single field.
    #[default]
    Conditional,
}

impl ModelType {
    pub fn generate_primary_key_class(self, columns: &ColumnDefinitions) -> bool {
        match self {
            ModelType::Flat => false,
            ModelType::Hierarchical => columns.has_primary_key_columns(),
            ModelType::Conditional => columns.primary_key_columns().len() > 1,
        }
    }

    pub fn generate_base_record_class(self, columns: &ColumnDefinitions) -> bool {
        match self {
            ModelType::Flat => true,
            ModelType::Hierarchical => columns.has_base_columns(),
            // A single key column or a single-field BLOB class folds into the base record.
            ModelType::Conditional => {
                columns.has_base_columns()
                    || columns.primary_key_columns().len() == 1
                    || (columns.has_blob_columns() && !self.generate_record_with_blobs_class(columns))
            }
        }
    }

    pub fn generate_record_with_blobs_class(self, columns: &ColumnDefinitions) -> bool {
        match self {
            ModelType::Flat => false,
            ModelType::Hierarchical => columns.has_blob_columns(),
            ModelType::Conditional => {
                let other_columns = columns.primary_key_columns().len() + columns.base_columns().len();
                other_columns > 1 && columns.blob_columns().len() > 1
            }
        }
    }
}

/// The generation rules of one table.
#[derive(Debug, Clone, Copy)]
pub struct Rules<'a> {
    model_type: ModelType,
    columns: &'a ColumnDefinitions,
    statements: &'a StatementToggles,
}

impl<'a> Rules<'a> {
    pub fn new(
        model_type: ModelType,
        columns: &'a ColumnDefinitions,
        statements: &'a StatementToggles,
    ) -> Self {
        Self {
            model_type,
            columns,
            statements,
        }
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn generate_primary_key_class(&self) -> bool {
        self.model_type.generate_primary_key_class(self.columns)
    }

    pub fn generate_base_record_class(&self) -> bool {
        self.model_type.generate_base_record_class(self.columns)
    }

    pub fn generate_record_with_blobs_class(&self) -> bool {
        self.model_type.generate_record_with_blobs_class(self.columns)
    }

    /// True when BLOB columns get their own statement variants.
    ///
    /// Without a BLOBs class there is a single combined variant that carries
    /// every column.
    fn split_blob_variants(&self) -> bool {
        self.columns.has_blob_columns() && self.generate_record_with_blobs_class()
    }

    fn combined_blobs(&self) -> bool {
        self.columns.has_blob_columns() && !self.split_blob_variants()
    }

    pub fn generate_insert(&self) -> bool {
        self.statements.insert
    }

    pub fn generate_update_by_primary_key_without_blobs(&self) -> bool {
        self.statements.update_by_primary_key
            && self.columns.has_primary_key_columns()
            && (self.columns.has_base_columns() || self.combined_blobs())
    }

    pub fn generate_update_by_primary_key_with_blobs(&self) -> bool {
        self.statements.update_by_primary_key
            && self.columns.has_primary_key_columns()
            && self.split_blob_variants()
    }

    pub fn generate_update_by_primary_key_selective(&self) -> bool {
        self.statements.update_by_primary_key
            && self.columns.has_primary_key_columns()
            && (self.columns.has_base_columns() || self.columns.has_blob_columns())
    }

    pub fn generate_delete_by_primary_key(&self) -> bool {
        self.statements.delete_by_primary_key && self.columns.has_primary_key_columns()
    }

    pub fn generate_select_by_primary_key(&self) -> bool {
        self.statements.select_by_primary_key
            && self.columns.has_primary_key_columns()
            && (self.columns.has_base_columns() || self.columns.has_blob_columns())
    }

    pub fn generate_select_by_example_without_blobs(&self) -> bool {
        self.statements.select_by_example
    }

    pub fn generate_select_by_example_with_blobs(&self) -> bool {
        self.statements.select_by_example && self.split_blob_variants()
    }

    pub fn generate_delete_by_example(&self) -> bool {
        self.statements.delete_by_example
    }

    pub fn generate_count_by_example(&self) -> bool {
        self.statements.count_by_example
    }

    pub fn generate_update_by_example_selective(&self) -> bool {
        self.statements.update_by_example
    }

    pub fn generate_update_by_example_without_blobs(&self) -> bool {
        self.statements.update_by_example
            && (self.columns.has_primary_key_columns()
                || self.columns.has_base_columns()
                || self.combined_blobs())
    }

    pub fn generate_update_by_example_with_blobs(&self) -> bool {
        self.statements.update_by_example && self.split_blob_variants()
    }

    pub fn generate_example_class(&self) -> bool {
        self.statements.select_by_example
            || self.statements.delete_by_example
            || self.statements.count_by_example
            || self.statements.update_by_example
    }

    pub fn generate_base_result_map(&self) -> bool {
        self.statements.select_by_example || self.statements.select_by_primary_key
    }

    pub fn generate_result_map_with_blobs(&self) -> bool {
        self.generate_base_result_map() && self.split_blob_variants()
    }

    pub fn generate_query_by_foreign_keys(&self) -> bool {
        self.statements.select_by_example && !self.columns.foreign_keys().is_empty()
    }

    pub fn generate_count_by_foreign_keys(&self) -> bool {
        self.statements.count_by_example && !self.columns.foreign_keys().is_empty()
    }

    pub fn generate_query_by_non_unique_indexes(&self) -> bool {
        self.statements.select_by_example && !self.columns.non_unique_indexes().is_empty()
    }

    pub fn generate_count_by_non_unique_indexes(&self) -> bool {
        self.statements.count_by_example && !self.columns.non_unique_indexes().is_empty()
    }

    pub fn generate_select_by_unique_indexes(&self) -> bool {
        self.statements.select_by_primary_key && !self.columns.unique_indexes().is_empty()
    }
}
