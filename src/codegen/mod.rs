pub mod imports;
pub mod plan;
pub mod summary;
pub mod text;

use crate::error::AbatorError;
use crate::rules::ModelType;
use crate::schema::IntrospectedTable;

/// Trait for plan renderers.
pub trait Generator {
    fn generate(&self, tables: &[IntrospectedTable]) -> String;
}

/// Look up a generator by its command-line name.
pub fn generator(name: &str) -> Result<Box<dyn Generator>, AbatorError> {
    match name {
        "plan" => Ok(Box::new(text::PlanGenerator)),
        "summary" => Ok(Box::new(summary::SummaryGenerator)),
        other => Err(AbatorError::UnknownGenerator(other.to_string())),
    }
}

pub fn model_type_name(model_type: ModelType) -> &'static str {
    match model_type {
        ModelType::Flat => "flat",
        ModelType::Hierarchical => "hierarchical",
        ModelType::Conditional => "conditional",
    }
}
