//! The generation plan of one table: every class, field, import, result map
//! and DAO method a downstream generator would emit.

use crate::naming::{AccessorKind, DaoMethod};
use crate::rules::{ModelType, Rules};
use crate::schema::{ColumnDefinition, IntrospectedTable};

use super::imports::{short_name, ImportCollector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    PrimaryKey,
    BaseRecord,
    RecordWithBlobs,
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    pub property: String,
    /// Fully qualified Java type.
    pub java_type: String,
    /// Column name as written in SQL.
    pub column: String,
    pub jdbc_type_name: String,
}

impl FieldPlan {
    fn new(column: &ColumnDefinition) -> Self {
        Self {
            property: column.java_property.clone(),
            java_type: column.java_type().unwrap_or("java.lang.Object").to_string(),
            column: column.escaped_column_name(),
            jdbc_type_name: column.jdbc_type_name().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ClassPlan {
    pub kind: ClassKind,
    pub name: String,
    pub superclass: Option<String>,
    pub imports: ImportCollector,
    pub fields: Vec<FieldPlan>,
}

impl ClassPlan {
    fn new(kind: ClassKind, name: String, superclass: Option<String>, columns: &[&ColumnDefinition]) -> Self {
        let fields: Vec<FieldPlan> = columns.iter().map(|c| FieldPlan::new(c)).collect();
        let mut imports = ImportCollector::new();
        for field in &fields {
            imports.add(&field.java_type);
        }
        Self {
            kind,
            name,
            superclass,
            imports,
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPlan {
    pub name: String,
    /// Parameter types (short names), or `Type property` pairs for accessors.
    pub parameters: Vec<String>,
}

impl MethodPlan {
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(", "))
    }
}

#[derive(Debug)]
pub struct GeneratedKeyPlan {
    pub column: String,
    pub java_type: Option<String>,
    pub post: bool,
    pub identity: bool,
    pub sql_statement: String,
}

/// Everything planned for one introspected table.
#[derive(Debug)]
pub struct TablePlan {
    pub table: String,
    pub runtime_table: String,
    pub model_type: ModelType,
    pub classes: Vec<ClassPlan>,
    pub result_maps: Vec<&'static str>,
    pub dao_interface: String,
    pub methods: Vec<MethodPlan>,
    pub generated_key: Option<GeneratedKeyPlan>,
    pub warnings: Vec<String>,
}

/// Class names of one table, present only when the rules generate the class.
struct ClassNames {
    key: Option<String>,
    base: Option<String>,
    blobs: Option<String>,
    example: Option<String>,
}

impl ClassNames {
    fn new(domain: &str, rules: &Rules<'_>) -> Self {
        Self {
            key: rules.generate_primary_key_class().then(|| format!("{domain}Key")),
            base: rules.generate_base_record_class().then(|| domain.to_string()),
            blobs: rules
                .generate_record_with_blobs_class()
                .then(|| format!("{domain}WithBLOBs")),
            example: rules.generate_example_class().then(|| format!("{domain}Example")),
        }
    }

    /// The class holding every column.
    fn all_fields(&self) -> String {
        self.blobs
            .as_ref()
            .or(self.base.as_ref())
            .or(self.key.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    /// The class holding every column except the BLOBs of a separate BLOBs class.
    fn without_blobs(&self) -> String {
        self.base
            .as_ref()
            .or(self.key.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    /// The class holding the primary key columns.
    fn key_holder(&self) -> String {
        self.key
            .as_ref()
            .or(self.base.as_ref())
            .or(self.blobs.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    fn example(&self) -> String {
        self.example.clone().unwrap_or_default()
    }
}

impl TablePlan {
    pub fn build(table: &IntrospectedTable) -> Self {
        let rules = table.rules();
        let domain = &table.table.domain_object_name;
        let names = ClassNames::new(domain, &rules);

        Self {
            table: table.table.to_string(),
            runtime_table: table.table.aliased_fully_qualified_table_name_at_runtime(),
            model_type: rules.model_type(),
            classes: plan_classes(table, &names),
            result_maps: plan_result_maps(&rules),
            dao_interface: format!("{domain}DAO"),
            methods: plan_methods(table, &rules, &names),
            generated_key: plan_generated_key(table),
            warnings: table.warnings.clone(),
        }
    }

    pub fn class(&self, kind: ClassKind) -> Option<&ClassPlan> {
        self.classes.iter().find(|c| c.kind == kind)
    }
}

fn plan_classes(table: &IntrospectedTable, names: &ClassNames) -> Vec<ClassPlan> {
    let columns = &table.columns;
    let mut classes = Vec::new();

    if let Some(name) = &names.key {
        let fields: Vec<&ColumnDefinition> = columns.primary_key_columns().iter().collect();
        classes.push(ClassPlan::new(ClassKind::PrimaryKey, name.clone(), None, &fields));
    }

    if let Some(name) = &names.base {
        let mut fields: Vec<&ColumnDefinition> = Vec::new();
        if names.key.is_none() {
            fields.extend(columns.primary_key_columns());
        }
        fields.extend(columns.base_columns());
        if names.blobs.is_none() {
            fields.extend(columns.blob_columns());
        }
        classes.push(ClassPlan::new(
            ClassKind::BaseRecord,
            name.clone(),
            names.key.clone(),
            &fields,
        ));
    }

    if let Some(name) = &names.blobs {
        let fields: Vec<&ColumnDefinition> = columns.blob_columns().iter().collect();
        let superclass = names.base.clone().or_else(|| names.key.clone());
        classes.push(ClassPlan::new(
            ClassKind::RecordWithBlobs,
            name.clone(),
            superclass,
            &fields,
        ));
    }

    if let Some(name) = &names.example {
        let mut example = ClassPlan::new(ClassKind::Example, name.clone(), None, &[]);
        example.imports.add("java.util.ArrayList");
        example.imports.add("java.util.List");
        if columns.has_jdbc_date_columns() || columns.has_jdbc_time_columns() {
            example.imports.add("java.util.Date");
            example.imports.add("java.util.Iterator");
        }
        classes.push(example);
    }

    classes
}

fn plan_result_maps(rules: &Rules<'_>) -> Vec<&'static str> {
    let mut maps = Vec::new();
    if rules.generate_base_result_map() {
        maps.push("BaseResultMap");
    }
    if rules.generate_result_map_with_blobs() {
        maps.push("ResultMapWithBLOBs");
    }
    maps
}

fn plan_methods(table: &IntrospectedTable, rules: &Rules<'_>, names: &ClassNames) -> Vec<MethodPlan> {
    let calculator = table.method_name_calculator();
    let mut methods = Vec::new();

    for method in DaoMethod::ALL {
        if !method.is_generated(rules) {
            continue;
        }
        let parameters = match method {
            DaoMethod::Insert
            | DaoMethod::UpdateByPrimaryKeySelective
            | DaoMethod::UpdateByPrimaryKeyWithBlobs => vec![names.all_fields()],
            DaoMethod::UpdateByPrimaryKeyWithoutBlobs => vec![names.without_blobs()],
            DaoMethod::SelectByPrimaryKey | DaoMethod::DeleteByPrimaryKey => vec![names.key_holder()],
            DaoMethod::SelectByExampleWithoutBlobs
            | DaoMethod::SelectByExampleWithBlobs
            | DaoMethod::DeleteByExample
            | DaoMethod::CountByExample => vec![names.example()],
            DaoMethod::UpdateByExampleSelective | DaoMethod::UpdateByExampleWithBlobs => {
                vec![names.all_fields(), names.example()]
            }
            DaoMethod::UpdateByExampleWithoutBlobs => vec![names.without_blobs(), names.example()],
        };
        methods.push(MethodPlan {
            name: calculator.method_name(table, method),
            parameters,
        });
    }

    let columns = &table.columns;
    let mut accessors = |kind: AccessorKind, groups: &[Vec<ColumnDefinition>]| {
        for group in groups {
            methods.push(MethodPlan {
                name: calculator.accessor_name(table, kind, group),
                parameters: group.iter().map(accessor_parameter).collect(),
            });
        }
    };

    if rules.generate_query_by_foreign_keys() {
        accessors(AccessorKind::QueryByForeignKey, columns.foreign_keys());
    }
    if rules.generate_count_by_foreign_keys() {
        accessors(AccessorKind::CountByForeignKey, columns.foreign_keys());
    }
    if rules.generate_query_by_non_unique_indexes() {
        accessors(AccessorKind::QueryByNonUniqueIndex, columns.non_unique_indexes());
    }
    if rules.generate_count_by_non_unique_indexes() {
        accessors(AccessorKind::CountByNonUniqueIndex, columns.non_unique_indexes());
    }
    if rules.generate_select_by_unique_indexes() {
        accessors(AccessorKind::SelectByUniqueIndex, columns.unique_indexes());
    }

    methods
}

fn accessor_parameter(column: &ColumnDefinition) -> String {
    let java_type = column.java_type().unwrap_or("java.lang.Object");
    format!("{} {}", short_name(java_type), column.java_property)
}

fn plan_generated_key(table: &IntrospectedTable) -> Option<GeneratedKeyPlan> {
    let key = table.generated_key.as_ref()?;
    let column = table.columns.get_column(&key.column);
    Some(GeneratedKeyPlan {
        column: column
            .map(|c| c.actual_column_name.clone())
            .unwrap_or_else(|| key.column.clone()),
        java_type: column.and_then(|c| c.java_type()).map(str::to_string),
        post: key.is_post(),
        identity: key.identity,
        sql_statement: key.runtime_sql_statement().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratedKey, StatementToggles};
    use crate::naming::MethodNameStyle;
    use crate::schema::ResolvedType;
    use crate::testutil::{blob_column, test_column, test_table};

    fn person(model: ModelType) -> IntrospectedTable {
        let mut table = test_table(
            "person",
            vec![test_column("id"), test_column("name"), blob_column("photo")],
        );
        table.columns.add_primary_key_column("id");
        table.model_type = model;
        table
    }

    fn class_names(plan: &TablePlan) -> Vec<&str> {
        plan.classes.iter().map(|c| c.name.as_str()).collect()
    }

    fn signatures(plan: &TablePlan) -> Vec<String> {
        plan.methods.iter().map(MethodPlan::signature).collect()
    }

    fn field_names(class: &ClassPlan) -> Vec<&str> {
        class.fields.iter().map(|f| f.property.as_str()).collect()
    }

    #[test]
    fn test_hierarchical_classes() {
        let plan = TablePlan::build(&person(ModelType::Hierarchical));
        assert_eq!(
            class_names(&plan),
            ["PersonKey", "Person", "PersonWithBLOBs", "PersonExample"]
        );

        let key = plan.class(ClassKind::PrimaryKey).unwrap();
        assert_eq!(field_names(key), ["id"]);
        assert_eq!(key.superclass, None);

        let base = plan.class(ClassKind::BaseRecord).unwrap();
        assert_eq!(field_names(base), ["name"]);
        assert_eq!(base.superclass.as_deref(), Some("PersonKey"));

        let blobs = plan.class(ClassKind::RecordWithBlobs).unwrap();
        assert_eq!(field_names(blobs), ["photo"]);
        assert_eq!(blobs.superclass.as_deref(), Some("Person"));
        assert!(blobs.imports.is_empty());

        assert_eq!(plan.result_maps, ["BaseResultMap", "ResultMapWithBLOBs"]);
    }

    #[test]
    fn test_flat_class_holds_every_column() {
        let plan = TablePlan::build(&person(ModelType::Flat));
        assert_eq!(class_names(&plan), ["Person", "PersonExample"]);
        let base = plan.class(ClassKind::BaseRecord).unwrap();
        assert_eq!(field_names(base), ["id", "name", "photo"]);
        assert_eq!(plan.result_maps, ["BaseResultMap"]);
    }

    #[test]
    fn test_hierarchical_methods() {
        let plan = TablePlan::build(&person(ModelType::Hierarchical));
        assert_eq!(
            signatures(&plan),
            [
                "insert(PersonWithBLOBs)",
                "updateByPrimaryKey(Person)",
                "updateByPrimaryKey(PersonWithBLOBs)",
                "updateByPrimaryKeySelective(PersonWithBLOBs)",
                "selectByPrimaryKey(PersonKey)",
                "selectByExampleWithoutBLOBs(PersonExample)",
                "selectByExampleWithBLOBs(PersonExample)",
                "deleteByPrimaryKey(PersonKey)",
                "deleteByExample(PersonExample)",
                "countByExample(PersonExample)",
                "updateByExampleSelective(PersonWithBLOBs, PersonExample)",
                "updateByExample(Person, PersonExample)",
                "updateByExample(PersonWithBLOBs, PersonExample)",
            ]
        );
        assert_eq!(plan.dao_interface, "PersonDAO");
    }

    #[test]
    fn test_conditional_two_key_columns_only() {
        let mut table = test_table("link", vec![test_column("left_id"), test_column("right_id")]);
        table.columns.add_primary_key_column("left_id");
        table.columns.add_primary_key_column("right_id");

        let plan = TablePlan::build(&table);
        assert_eq!(class_names(&plan), ["LinkKey", "LinkExample"]);
        assert_eq!(
            signatures(&plan),
            [
                "insert(LinkKey)",
                "selectByExample(LinkExample)",
                "deleteByPrimaryKey(LinkKey)",
                "deleteByExample(LinkExample)",
                "countByExample(LinkExample)",
                "updateByExampleSelective(LinkKey, LinkExample)",
                "updateByExample(LinkKey, LinkExample)",
            ]
        );
        assert!(!signatures(&plan).iter().any(|s| s.starts_with("selectByPrimaryKey")));
    }

    #[test]
    fn test_accessors_follow_rules() {
        let mut table = test_table(
            "orders",
            vec![test_column("id"), test_column("customer_id"), test_column("number")],
        );
        table.columns.add_primary_key_column("id");
        table.columns.add_unique_index(&["number"]);
        table.columns.add_foreign_key(&["customer_id"]);

        let plan = TablePlan::build(&table);
        let sigs = signatures(&plan);
        assert!(sigs.contains(&"queryByCustomerId(Integer customerId)".to_string()));
        assert!(sigs.contains(&"countByCustomerId(Integer customerId)".to_string()));
        assert!(sigs.contains(&"selectByNumber(Integer number)".to_string()));

        table.statements = StatementToggles {
            select_by_example: false,
            select_by_primary_key: false,
            ..StatementToggles::default()
        };
        let sigs = signatures(&TablePlan::build(&table));
        assert!(!sigs.iter().any(|s| s.starts_with("queryBy")));
        assert!(!sigs.iter().any(|s| s.starts_with("selectBy")));
        assert!(sigs.contains(&"countByCustomerId(Integer customerId)".to_string()));
    }

    #[test]
    fn test_extended_method_names() {
        let mut table = person(ModelType::Flat);
        table.method_names = MethodNameStyle::Extended;
        let plan = TablePlan::build(&table);
        assert_eq!(plan.methods[0].name, "insertPerson");
        assert!(plan.methods.iter().any(|m| m.name == "selectPersonByExample"));
    }

    #[test]
    fn test_imports_per_class() {
        let mut created = test_column("created");
        created.resolved_type = Some(ResolvedType {
            java_type: "java.util.Date".into(),
            jdbc_type_name: "DATE".into(),
        });
        let mut table = test_table("event", vec![test_column("id"), created]);
        table.columns.add_primary_key_column("id");

        let plan = TablePlan::build(&table);
        let base = plan.class(ClassKind::BaseRecord).unwrap();
        assert_eq!(base.imports.render(), "import java.util.Date;");
        let example = plan.class(ClassKind::Example).unwrap();
        assert_eq!(
            example.imports.render(),
            "import java.util.ArrayList;\nimport java.util.Date;\nimport java.util.Iterator;\nimport java.util.List;"
        );
    }

    #[test]
    fn test_generated_key() {
        let mut table = person(ModelType::Conditional);
        table.generated_key = Some(GeneratedKey {
            column: "ID".into(),
            sql_statement: "MySQL".into(),
            identity: true,
            key_type: None,
        });
        let key = TablePlan::build(&table).generated_key.unwrap();
        assert_eq!(key.column, "id");
        assert_eq!(key.java_type.as_deref(), Some("java.lang.Integer"));
        assert!(key.post);
        assert_eq!(key.sql_statement, "SELECT LAST_INSERT_ID()");
    }
}
