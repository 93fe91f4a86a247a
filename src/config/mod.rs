//! Configuration loading and validation.

mod table;
mod validation;

pub use table::{
    ColumnOverride, ColumnRenamingRule, GeneratedKey, IgnoredColumn, StatementToggles,
    TableConfiguration,
};

use std::path::Path;

use serde::Deserialize;

use crate::error::AbatorError;
use crate::naming::MethodNameStyle;
use crate::rules::ModelType;

/// Database connection settings. The CLI may override the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionSettings {
    pub url: Option<String>,
    #[serde(default)]
    pub trust_cert: bool,
}

/// Defaults shared by every table entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextSettings {
    #[serde(default)]
    pub default_model_type: ModelType,
    #[serde(default)]
    pub method_names: MethodNameStyle,
    #[serde(default)]
    pub force_big_decimals: bool,
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub context: ContextSettings,
    #[serde(default, rename = "table")]
    pub tables: Vec<TableConfiguration>,
}

impl Configuration {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AbatorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string, apply context defaults and validate.
    pub fn from_toml(content: &str) -> Result<Self, AbatorError> {
        let mut config: Configuration = toml::from_str(content)?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    fn apply_defaults(&mut self) {
        for tc in &mut self.tables {
            tc.normalize();
            tc.model_type.get_or_insert(self.context.default_model_type);
            tc.method_names.get_or_insert(self.context.method_names);
        }
    }

    /// Validate the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), AbatorError> {
        let errors = validation::validate(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AbatorError::InvalidConfiguration(errors))
        }
    }

    /// Keep only the tables named in `filter` (case-insensitive). An empty filter keeps all.
    pub fn retain_tables(&mut self, filter: &[String]) {
        if filter.is_empty() {
            return;
        }
        self.tables
            .retain(|tc| filter.iter().any(|name| name.eq_ignore_ascii_case(&tc.table_name)));
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn test_from_toml_applies_context_defaults() {
        let config = Configuration::from_toml(indoc! {r#"
            [connection]
            url = "postgres://localhost/shop"

            [context]
            default_model_type = "flat"
            method_names = "extended"

            [[table]]
            schema = "public"
            table_name = "orders"
            enable_delete_by_example = false

            [[table.column_override]]
            column = "notes"
            jdbc_type = "CLOB"

            [[table.ignore_column]]
            column = "audit_ts"

            [[table]]
            table_name = "customers"
            model_type = "hierarchical"
            schema = ""
        "#})
        .unwrap();

        assert_eq!(config.connection.url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(config.tables.len(), 2);

        let orders = &config.tables[0];
        assert_eq!(orders.model_type(), ModelType::Flat);
        assert_eq!(orders.method_names(), MethodNameStyle::Extended);
        assert!(!orders.statements.delete_by_example);
        assert!(orders.statements.insert);
        assert_eq!(orders.column_overrides[0].jdbc_type.as_deref(), Some("CLOB"));
        assert_eq!(orders.ignored_columns[0].column, "audit_ts");

        let customers = &config.tables[1];
        assert_eq!(customers.model_type(), ModelType::Hierarchical);
        assert_eq!(customers.schema, None);
    }

    #[test]
    fn test_model_type_defaults_to_conditional() {
        let config = Configuration::from_toml(indoc! {r#"
            [[table]]
            table_name = "orders"
        "#})
        .unwrap();
        assert_eq!(config.tables[0].model_type(), ModelType::Conditional);
        assert_eq!(config.tables[0].method_names(), MethodNameStyle::Default);
        assert!(!config.context.force_big_decimals);
    }

    #[test]
    fn test_invalid_configuration_lists_every_error() {
        let err = Configuration::from_toml(indoc! {r#"
            [[table]]
            schema = "public"

            [[table]]
            table_name = "orders"
            generated_key = { column = "id", type = "during" }
        "#})
        .unwrap_err();

        let AbatorError::InvalidConfiguration(errors) = err else {
            panic!("expected invalid configuration, got {err:?}");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = Configuration::from_toml("[[table]\n").unwrap_err();
        assert!(matches!(err, AbatorError::ConfigParse(_)));
    }

    #[test]
    fn test_retain_tables() {
        let mut config = Configuration {
            tables: vec![TableConfiguration::new("orders"), TableConfiguration::new("customers")],
            ..Configuration::default()
        };
        config.retain_tables(&["ORDERS".to_string()]);
        assert_eq!(config.tables.len(), 1);
        assert_eq!(config.tables[0].table_name, "orders");

        config.retain_tables(&[]);
        assert_eq!(config.tables.len(), 1);
    }
}
