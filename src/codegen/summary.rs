use crate::schema::IntrospectedTable;

use super::plan::TablePlan;
use super::{model_type_name, Generator};

/// One line per table: its classes and how many DAO methods it gets.
pub struct SummaryGenerator;

impl Generator for SummaryGenerator {
    fn generate(&self, tables: &[IntrospectedTable]) -> String {
        let mut out = String::new();
        for table in tables {
            let plan = TablePlan::build(table);
            let classes: Vec<&str> = plan.classes.iter().map(|c| c.name.as_str()).collect();
            out.push_str(&format!(
                "{} [{}] classes: {}; methods: {}; warnings: {}\n",
                plan.table,
                model_type_name(plan.model_type),
                classes.join(", "),
                plan.methods.len(),
                plan.warnings.len()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{blob_column, test_column, test_table};

    #[test]
    fn test_summary_line() {
        let mut table = test_table(
            "person",
            vec![test_column("id"), test_column("name"), blob_column("photo")],
        );
        table.columns.add_primary_key_column("id");

        let output = SummaryGenerator.generate(&[table]);
        insta::assert_snapshot!(
            output,
            @"person [conditional] classes: Person, PersonExample; methods: 10; warnings: 0"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(SummaryGenerator.generate(&[]), "");
    }
}
