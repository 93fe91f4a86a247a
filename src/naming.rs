//! Names of generated classes, properties, and DAO methods.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::Deserialize;

use crate::rules::Rules;
use crate::schema::{ColumnDefinition, IntrospectedTable};

/// Which method name calculator a table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodNameStyle {
    /// `insert`, `selectByExample`, `queryByGroupId`.
    #[default]
    Default,
    /// Domain object name after the verb: `insertUser`, `selectUserByExample`.
    Extended,
}

/// DAO methods with a fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaoMethod {
    Insert,
    UpdateByPrimaryKeyWithoutBlobs,
    UpdateByPrimaryKeyWithBlobs,
    UpdateByPrimaryKeySelective,
    SelectByPrimaryKey,
    SelectByExampleWithoutBlobs,
    SelectByExampleWithBlobs,
    DeleteByPrimaryKey,
    DeleteByExample,
    CountByExample,
    UpdateByExampleSelective,
    UpdateByExampleWithoutBlobs,
    UpdateByExampleWithBlobs,
}

impl DaoMethod {
    pub const ALL: [DaoMethod; 13] = [
        DaoMethod::Insert,
        DaoMethod::UpdateByPrimaryKeyWithoutBlobs,
        DaoMethod::UpdateByPrimaryKeyWithBlobs,
        DaoMethod::UpdateByPrimaryKeySelective,
        DaoMethod::SelectByPrimaryKey,
        DaoMethod::SelectByExampleWithoutBlobs,
        DaoMethod::SelectByExampleWithBlobs,
        DaoMethod::DeleteByPrimaryKey,
        DaoMethod::DeleteByExample,
        DaoMethod::CountByExample,
        DaoMethod::UpdateByExampleSelective,
        DaoMethod::UpdateByExampleWithoutBlobs,
        DaoMethod::UpdateByExampleWithBlobs,
    ];

    /// Verb and remainder of the method name, before any BLOBs suffix.
    fn parts(self) -> (&'static str, &'static str) {
        match self {
            DaoMethod::Insert => ("insert", ""),
            DaoMethod::UpdateByPrimaryKeyWithoutBlobs | DaoMethod::UpdateByPrimaryKeyWithBlobs => {
                ("update", "ByPrimaryKey")
            }
            DaoMethod::UpdateByPrimaryKeySelective => ("update", "ByPrimaryKeySelective"),
            DaoMethod::SelectByPrimaryKey => ("select", "ByPrimaryKey"),
            DaoMethod::SelectByExampleWithoutBlobs | DaoMethod::SelectByExampleWithBlobs => {
                ("select", "ByExample")
            }
            DaoMethod::DeleteByPrimaryKey => ("delete", "ByPrimaryKey"),
            DaoMethod::DeleteByExample => ("delete", "ByExample"),
            DaoMethod::CountByExample => ("count", "ByExample"),
            DaoMethod::UpdateByExampleSelective => ("update", "ByExampleSelective"),
            DaoMethod::UpdateByExampleWithoutBlobs | DaoMethod::UpdateByExampleWithBlobs => {
                ("update", "ByExample")
            }
        }
    }

    /// The BLOBs suffix, or nothing when the method is the only variant
    /// or when separate record classes make the two variants overloads.
    fn blob_suffix(self, rules: &Rules<'_>) -> &'static str {
        match self {
            DaoMethod::UpdateByPrimaryKeyWithoutBlobs => {
                if !rules.generate_update_by_primary_key_with_blobs() || rules.generate_record_with_blobs_class() {
                    ""
                } else {
                    "WithoutBLOBs"
                }
            }
            DaoMethod::UpdateByPrimaryKeyWithBlobs => {
                if !rules.generate_update_by_primary_key_without_blobs() || rules.generate_record_with_blobs_class() {
                    ""
                } else {
                    "WithBLOBs"
                }
            }
            DaoMethod::SelectByExampleWithoutBlobs => {
                if rules.generate_select_by_example_with_blobs() {
                    "WithoutBLOBs"
                } else {
                    ""
                }
            }
            DaoMethod::SelectByExampleWithBlobs => {
                if rules.generate_select_by_example_without_blobs() {
                    "WithBLOBs"
                } else {
                    ""
                }
            }
            DaoMethod::UpdateByExampleWithoutBlobs => {
                if !rules.generate_update_by_example_with_blobs() || rules.generate_record_with_blobs_class() {
                    ""
                } else {
                    "WithoutBLOBs"
                }
            }
            DaoMethod::UpdateByExampleWithBlobs => {
                if !rules.generate_update_by_example_without_blobs() || rules.generate_record_with_blobs_class() {
                    ""
                } else {
                    "WithBLOBs"
                }
            }
            _ => "",
        }
    }

    pub fn is_generated(self, rules: &Rules<'_>) -> bool {
        match self {
            DaoMethod::Insert => rules.generate_insert(),
            DaoMethod::UpdateByPrimaryKeyWithoutBlobs => rules.generate_update_by_primary_key_without_blobs(),
            DaoMethod::UpdateByPrimaryKeyWithBlobs => rules.generate_update_by_primary_key_with_blobs(),
            DaoMethod::UpdateByPrimaryKeySelective => rules.generate_update_by_primary_key_selective(),
            DaoMethod::SelectByPrimaryKey => rules.generate_select_by_primary_key(),
            DaoMethod::SelectByExampleWithoutBlobs => rules.generate_select_by_example_without_blobs(),
            DaoMethod::SelectByExampleWithBlobs => rules.generate_select_by_example_with_blobs(),
            DaoMethod::DeleteByPrimaryKey => rules.generate_delete_by_primary_key(),
            DaoMethod::DeleteByExample => rules.generate_delete_by_example(),
            DaoMethod::CountByExample => rules.generate_count_by_example(),
            DaoMethod::UpdateByExampleSelective => rules.generate_update_by_example_selective(),
            DaoMethod::UpdateByExampleWithoutBlobs => rules.generate_update_by_example_without_blobs(),
            DaoMethod::UpdateByExampleWithBlobs => rules.generate_update_by_example_with_blobs(),
        }
    }
}

/// Accessors generated for foreign-key and index column groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    QueryByForeignKey,
    CountByForeignKey,
    QueryByNonUniqueIndex,
    CountByNonUniqueIndex,
    SelectByUniqueIndex,
}

impl AccessorKind {
    /// Verb and the name used when the group has no columns.
    fn parts(self) -> (&'static str, &'static str) {
        match self {
            AccessorKind::QueryByForeignKey => ("query", "ForeignKey"),
            AccessorKind::CountByForeignKey => ("count", "ForeignKey"),
            AccessorKind::QueryByNonUniqueIndex => ("query", "NonUniqueIndex"),
            AccessorKind::CountByNonUniqueIndex => ("count", "NonUniqueIndex"),
            AccessorKind::SelectByUniqueIndex => ("select", "UniqueIndex"),
        }
    }
}

/// Calculates DAO method names for a table.
pub trait MethodNameCalculator: Sync {
    fn method_name(&self, table: &IntrospectedTable, method: DaoMethod) -> String;

    /// Name of an accessor over an ordered column group.
    fn accessor_name(&self, table: &IntrospectedTable, kind: AccessorKind, columns: &[ColumnDefinition]) -> String;
}

#[derive(Debug, Default)]
pub struct DefaultMethodNameCalculator;

impl MethodNameCalculator for DefaultMethodNameCalculator {
    fn method_name(&self, table: &IntrospectedTable, method: DaoMethod) -> String {
        let (verb, rest) = method.parts();
        format!("{verb}{rest}{}", method.blob_suffix(&table.rules()))
    }

    fn accessor_name(&self, _table: &IntrospectedTable, kind: AccessorKind, columns: &[ColumnDefinition]) -> String {
        let (verb, fallback) = kind.parts();
        format!("{verb}By{}", composite_or(columns, fallback))
    }
}

#[derive(Debug, Default)]
pub struct ExtendedMethodNameCalculator;

impl MethodNameCalculator for ExtendedMethodNameCalculator {
    fn method_name(&self, table: &IntrospectedTable, method: DaoMethod) -> String {
        let (verb, rest) = method.parts();
        format!(
            "{verb}{}{rest}{}",
            table.table.domain_object_name,
            method.blob_suffix(&table.rules())
        )
    }

    fn accessor_name(&self, table: &IntrospectedTable, kind: AccessorKind, columns: &[ColumnDefinition]) -> String {
        let (verb, fallback) = kind.parts();
        format!(
            "{verb}{}By{}",
            table.table.domain_object_name,
            composite_or(columns, fallback)
        )
    }
}

static DEFAULT_CALCULATOR: DefaultMethodNameCalculator = DefaultMethodNameCalculator;
static EXTENDED_CALCULATOR: ExtendedMethodNameCalculator = ExtendedMethodNameCalculator;

pub fn calculator(style: MethodNameStyle) -> &'static dyn MethodNameCalculator {
    match style {
        MethodNameStyle::Default => &DEFAULT_CALCULATOR,
        MethodNameStyle::Extended => &EXTENDED_CALCULATOR,
    }
}

/// Join the columns' property names, each with an initial capital, with `And`.
fn composite_or(columns: &[ColumnDefinition], fallback: &str) -> String {
    if columns.is_empty() {
        return fallback.to_string();
    }
    columns
        .iter()
        .map(|c| to_init_cap(&c.java_property))
        .collect::<Vec<_>>()
        .join("And")
}

/// Upper-case the first character.
pub fn to_init_cap(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a column name to a camelCase property name.
/// e.g. "FIRST_NAME" -> "firstName"
pub fn camel_case_property(column_name: &str) -> String {
    column_name.to_lower_camel_case()
}

/// Keep the column name as the property name, made usable as an identifier.
///
/// Whitespace becomes `_`; a leading capital followed by a lower-case letter
/// is lowered (`Name` -> `name`, but `URL` stays `URL`).
pub fn valid_property_name(column_name: &str) -> String {
    let cleaned: String = column_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    let mut chars = cleaned.chars();
    match (chars.next(), chars.next()) {
        (Some(first), None) => first.to_lowercase().collect(),
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase() => {
            first.to_lowercase().chain(cleaned.chars().skip(1)).collect()
        }
        _ => cleaned,
    }
}

/// Convert a table name to a PascalCase domain object name.
/// e.g. "order_items" -> "OrderItems"
pub fn domain_object_name(table_name: &str) -> String {
    table_name.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ModelType;
    use crate::testutil::{blob_column, test_column, test_table};

    fn id_name_photo(model: ModelType) -> IntrospectedTable {
        let mut table = test_table(
            "person",
            vec![test_column("id"), test_column("name"), blob_column("photo")],
        );
        table.columns.add_primary_key_column("id");
        table.model_type = model;
        table
    }

    fn name_of(table: &IntrospectedTable, method: DaoMethod) -> String {
        DefaultMethodNameCalculator.method_name(table, method)
    }

    #[test]
    fn test_fixed_names() {
        let table = id_name_photo(ModelType::Hierarchical);
        assert_eq!(name_of(&table, DaoMethod::Insert), "insert");
        assert_eq!(name_of(&table, DaoMethod::DeleteByPrimaryKey), "deleteByPrimaryKey");
        assert_eq!(name_of(&table, DaoMethod::DeleteByExample), "deleteByExample");
        assert_eq!(name_of(&table, DaoMethod::SelectByPrimaryKey), "selectByPrimaryKey");
        assert_eq!(
            name_of(&table, DaoMethod::UpdateByPrimaryKeySelective),
            "updateByPrimaryKeySelective"
        );
        assert_eq!(name_of(&table, DaoMethod::CountByExample), "countByExample");
        assert_eq!(
            name_of(&table, DaoMethod::UpdateByExampleSelective),
            "updateByExampleSelective"
        );
    }

    #[test]
    fn test_both_select_variants_are_suffixed_and_distinct() {
        let table = id_name_photo(ModelType::Hierarchical);
        let without = name_of(&table, DaoMethod::SelectByExampleWithoutBlobs);
        let with = name_of(&table, DaoMethod::SelectByExampleWithBlobs);
        assert_eq!(without, "selectByExampleWithoutBLOBs");
        assert_eq!(with, "selectByExampleWithBLOBs");
        assert_ne!(without, with);
    }

    #[test]
    fn test_single_variant_collapses() {
        let table = id_name_photo(ModelType::Flat);
        let rules = table.rules();
        assert!(!DaoMethod::SelectByExampleWithBlobs.is_generated(&rules));
        assert_eq!(name_of(&table, DaoMethod::SelectByExampleWithoutBlobs), "selectByExample");
        assert_eq!(name_of(&table, DaoMethod::UpdateByPrimaryKeyWithoutBlobs), "updateByPrimaryKey");
        assert_eq!(name_of(&table, DaoMethod::UpdateByExampleWithoutBlobs), "updateByExample");
    }

    #[test]
    fn test_blobs_class_makes_updates_overloads() {
        let table = id_name_photo(ModelType::Hierarchical);
        assert_eq!(name_of(&table, DaoMethod::UpdateByPrimaryKeyWithBlobs), "updateByPrimaryKey");
        assert_eq!(name_of(&table, DaoMethod::UpdateByPrimaryKeyWithoutBlobs), "updateByPrimaryKey");
        assert_eq!(name_of(&table, DaoMethod::UpdateByExampleWithBlobs), "updateByExample");
    }

    #[test]
    fn test_composite_accessor_names() {
        let table = test_table("member", vec![test_column("group_id"), test_column("user_name")]);
        let fk = table.columns.base_columns().to_vec();
        let calc = DefaultMethodNameCalculator;

        let first = calc.accessor_name(&table, AccessorKind::QueryByForeignKey, &fk);
        assert_eq!(first, "queryByGroupIdAndUserName");
        assert_eq!(calc.accessor_name(&table, AccessorKind::QueryByForeignKey, &fk), first);
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::CountByNonUniqueIndex, &fk),
            "countByGroupIdAndUserName"
        );
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::SelectByUniqueIndex, &fk[..1]),
            "selectByGroupId"
        );

        let reversed: Vec<ColumnDefinition> = fk.iter().rev().cloned().collect();
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::QueryByForeignKey, &reversed),
            "queryByUserNameAndGroupId"
        );
    }

    #[test]
    fn test_empty_group_fallbacks() {
        let table = test_table("member", vec![test_column("id")]);
        let calc = DefaultMethodNameCalculator;
        assert_eq!(calc.accessor_name(&table, AccessorKind::QueryByForeignKey, &[]), "queryByForeignKey");
        assert_eq!(calc.accessor_name(&table, AccessorKind::CountByForeignKey, &[]), "countByForeignKey");
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::QueryByNonUniqueIndex, &[]),
            "queryByNonUniqueIndex"
        );
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::CountByNonUniqueIndex, &[]),
            "countByNonUniqueIndex"
        );
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::SelectByUniqueIndex, &[]),
            "selectByUniqueIndex"
        );
    }

    #[test]
    fn test_extended_names() {
        let table = id_name_photo(ModelType::Hierarchical);
        let calc = calculator(MethodNameStyle::Extended);
        assert_eq!(calc.method_name(&table, DaoMethod::Insert), "insertPerson");
        assert_eq!(
            calc.method_name(&table, DaoMethod::SelectByExampleWithBlobs),
            "selectPersonByExampleWithBLOBs"
        );
        assert_eq!(
            calc.method_name(&table, DaoMethod::UpdateByPrimaryKeySelective),
            "updatePersonByPrimaryKeySelective"
        );
        let name = table.columns.base_columns().to_vec();
        assert_eq!(
            calc.accessor_name(&table, AccessorKind::QueryByNonUniqueIndex, &name),
            "queryPersonByName"
        );
    }

    #[test]
    fn test_property_names() {
        assert_eq!(camel_case_property("FIRST_NAME"), "firstName");
        assert_eq!(camel_case_property("order id"), "orderId");
        assert_eq!(valid_property_name("Name"), "name");
        assert_eq!(valid_property_name("URL"), "URL");
        assert_eq!(valid_property_name("order id"), "order_id");
        assert_eq!(valid_property_name("X"), "x");
        assert_eq!(to_init_cap("groupId"), "GroupId");
        assert_eq!(to_init_cap(""), "");
        assert_eq!(domain_object_name("order_items"), "OrderItems");
    }
}
