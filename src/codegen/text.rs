use crate::schema::IntrospectedTable;

use super::imports::short_name;
use super::plan::{ClassPlan, TablePlan};
use super::{model_type_name, Generator};

/// Renders the full generation plan of every table.
pub struct PlanGenerator;

impl Generator for PlanGenerator {
    fn generate(&self, tables: &[IntrospectedTable]) -> String {
        tables
            .iter()
            .map(|table| render_table(&TablePlan::build(table)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_table(plan: &TablePlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("table {}\n", plan.table));
    out.push_str(&format!("  runtime name: {}\n", plan.runtime_table));
    out.push_str(&format!("  model type: {}\n", model_type_name(plan.model_type)));

    for class in &plan.classes {
        render_class(&mut out, class);
    }

    if !plan.result_maps.is_empty() {
        out.push_str(&format!("  result maps: {}\n", plan.result_maps.join(", ")));
    }

    if let Some(key) = &plan.generated_key {
        let java_type = key.java_type.as_deref().map(short_name).unwrap_or("?");
        let timing = if key.post { "post" } else { "pre" };
        let identity = if key.identity { ", identity" } else { "" };
        out.push_str(&format!(
            "  generated key: {} {java_type} ({timing}{identity}): {}\n",
            key.column, key.sql_statement
        ));
    }

    out.push_str(&format!("  interface {}\n", plan.dao_interface));
    for method in &plan.methods {
        out.push_str(&format!("    {}\n", method.signature()));
    }

    for warning in &plan.warnings {
        out.push_str(&format!("  warning: {warning}\n"));
    }

    out
}

fn render_class(out: &mut String, class: &ClassPlan) {
    match &class.superclass {
        Some(superclass) => out.push_str(&format!("  class {} extends {superclass}\n", class.name)),
        None => out.push_str(&format!("  class {}\n", class.name)),
    }

    let imports = class.imports.render();
    for line in imports.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("    {line}\n"));
        }
    }

    for field in &class.fields {
        out.push_str(&format!(
            "    {}: {} <- {} {}\n",
            field.property,
            short_name(&field.java_type),
            field.column,
            field.jdbc_type_name
        ));
    }
}
