use std::fmt;

use regex::Regex;
use serde::Deserialize;

use crate::dialect::identity_retrieval_statement;
use crate::naming::MethodNameStyle;
use crate::rules::ModelType;
use crate::schema::{compose_fully_qualified_table_name, names_match, requires_delimiting};

fn enabled() -> bool {
    true
}

/// Which mapped statements the user wants for a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatementToggles {
    #[serde(default = "enabled", rename = "enable_insert")]
    pub insert: bool,
    #[serde(default = "enabled", rename = "enable_select_by_primary_key")]
    pub select_by_primary_key: bool,
    #[serde(default = "enabled", rename = "enable_select_by_example")]
    pub select_by_example: bool,
    #[serde(default = "enabled", rename = "enable_update_by_primary_key")]
    pub update_by_primary_key: bool,
    #[serde(default = "enabled", rename = "enable_delete_by_primary_key")]
    pub delete_by_primary_key: bool,
    #[serde(default = "enabled", rename = "enable_delete_by_example")]
    pub delete_by_example: bool,
    #[serde(default = "enabled", rename = "enable_count_by_example")]
    pub count_by_example: bool,
    #[serde(default = "enabled", rename = "enable_update_by_example")]
    pub update_by_example: bool,
}

impl Default for StatementToggles {
    fn default() -> Self {
        Self {
            insert: true,
            select_by_primary_key: true,
            select_by_example: true,
            update_by_primary_key: true,
            delete_by_primary_key: true,
            delete_by_example: true,
            count_by_example: true,
            update_by_example: true,
        }
    }
}

impl StatementToggles {
    pub fn any_enabled(&self) -> bool {
        self.insert
            || self.select_by_primary_key
            || self.select_by_example
            || self.update_by_primary_key
            || self.delete_by_primary_key
            || self.delete_by_example
            || self.count_by_example
            || self.update_by_example
    }
}

/// A column whose value the database generates on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedKey {
    pub column: String,
    /// Either a literal SQL statement or the name of a known database.
    #[serde(default)]
    pub sql_statement: String,
    #[serde(default)]
    pub identity: bool,
    /// `pre` or `post`: run the statement before or after the insert.
    #[serde(rename = "type")]
    pub key_type: Option<String>,
}

impl GeneratedKey {
    pub fn runtime_sql_statement(&self) -> &str {
        identity_retrieval_statement(&self.sql_statement)
    }

    /// Whether the key is retrieved after the insert. Identity keys default to `post`.
    pub fn is_post(&self) -> bool {
        match self.key_type.as_deref() {
            Some(t) => t == "post",
            None => self.identity,
        }
    }
}

/// A regex search/replace applied to column names before property names are derived.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnRenamingRule {
    pub search_string: String,
    #[serde(default)]
    pub replace_string: String,
}

impl ColumnRenamingRule {
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.search_string)
    }

    /// `replace_string` in the form `Regex::replace_all` expects.
    ///
    /// Group references are written `$1`; a reference takes as many digits as
    /// still name a group of `regex`, so `$12` is group 12 only when that group
    /// exists. A backslash makes the next character literal. A `$` that starts
    /// no reference is kept as text.
    pub fn replacement(&self, regex: &Regex) -> String {
        let groups = regex.captures_len().saturating_sub(1);
        let mut out = String::with_capacity(self.replace_string.len());
        let mut chars = self.replace_string.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('$') => out.push_str("$$"),
                    Some(escaped) => out.push(escaped),
                    None => {}
                },
                '$' => match chars.peek().and_then(|d| d.to_digit(10)) {
                    Some(first) => {
                        chars.next();
                        let mut group = first as usize;
                        while let Some(next) = chars.peek().and_then(|d| d.to_digit(10)) {
                            let extended = group * 10 + next as usize;
                            if extended > groups {
                                break;
                            }
                            group = extended;
                            chars.next();
                        }
                        out.push_str(&format!("${{{group}}}"));
                    }
                    None if chars.peek() == Some(&'{') => out.push('$'),
                    None => out.push_str("$$"),
                },
                _ => out.push(c),
            }
        }
        out
    }
}

/// User overrides for one column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnOverride {
    pub column: String,
    pub property: Option<String>,
    pub java_type: Option<String>,
    pub jdbc_type: Option<String>,
    pub type_handler: Option<String>,
    pub delimited_column_name: Option<bool>,
}

impl ColumnOverride {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Self::default()
        }
    }

    pub fn is_column_name_delimited(&self) -> bool {
        self.delimited_column_name
            .unwrap_or_else(|| requires_delimiting(&self.column))
    }

    pub fn matches(&self, column_name: &str) -> bool {
        names_match(self.is_column_name_delimited(), column_name, &self.column)
    }
}

/// A column to leave out of generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgnoredColumn {
    pub column: String,
    pub delimited_column_name: Option<bool>,
}

impl IgnoredColumn {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            delimited_column_name: None,
        }
    }

    pub fn is_column_name_delimited(&self) -> bool {
        self.delimited_column_name
            .unwrap_or_else(|| requires_delimiting(&self.column))
    }

    pub fn matches(&self, column_name: &str) -> bool {
        names_match(self.is_column_name_delimited(), column_name, &self.column)
    }
}

/// What the user asked for one table entry.
///
/// `schema` and `table_name` may contain SQL `LIKE` wildcards, so one entry
/// can match several physical tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableConfiguration {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    #[serde(default)]
    pub table_name: String,
    pub domain_object_name: Option<String>,
    pub alias: Option<String>,
    pub model_type: Option<ModelType>,
    pub method_names: Option<MethodNameStyle>,
    #[serde(default)]
    pub escape_wildcards: bool,
    #[serde(default)]
    pub delimit_identifiers: bool,
    #[serde(default)]
    pub use_actual_column_names: bool,
    #[serde(default)]
    pub ignore_qualifiers_at_runtime: bool,
    pub runtime_table_name: Option<String>,
    #[serde(flatten)]
    pub statements: StatementToggles,
    pub generated_key: Option<GeneratedKey>,
    pub column_renaming_rule: Option<ColumnRenamingRule>,
    #[serde(default, rename = "column_override")]
    pub column_overrides: Vec<ColumnOverride>,
    #[serde(default, rename = "ignore_column")]
    pub ignored_columns: Vec<IgnoredColumn>,
}

impl TableConfiguration {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type.unwrap_or_default()
    }

    pub fn method_names(&self) -> MethodNameStyle {
        self.method_names.unwrap_or_default()
    }

    pub fn column_override(&self, column_name: &str) -> Option<&ColumnOverride> {
        self.column_overrides.iter().find(|co| co.matches(column_name))
    }

    /// True if identifiers must be passed to the database exactly as written.
    pub fn requires_literal_identifiers(&self) -> bool {
        self.delimit_identifiers
            || [&self.catalog, &self.schema]
                .into_iter()
                .flatten()
                .any(|s| requires_delimiting(s))
            || requires_delimiting(&self.table_name)
    }

    /// Turn empty optional strings into `None`.
    pub(super) fn normalize(&mut self) {
        for field in [
            &mut self.catalog,
            &mut self.schema,
            &mut self.domain_object_name,
            &mut self.alias,
            &mut self.runtime_table_name,
        ] {
            if field.as_deref().is_some_and(str::is_empty) {
                *field = None;
            }
        }
    }
}

impl fmt::Display for TableConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_fully_qualified_table_name(
            self.catalog.as_deref(),
            self.schema.as_deref(),
            &self.table_name,
            '.',
        ))
    }
}
