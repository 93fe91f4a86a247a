use std::collections::{BTreeMap, BTreeSet};

/// Collects and renders Java import statements.
///
/// Groups imports by top-level package and sorts them for deterministic output.
/// Types that never need an import (`java.lang`, primitives, arrays) are skipped.
#[derive(Debug, Default)]
pub struct ImportCollector {
    /// top-level package -> set of fully qualified types
    imports: BTreeMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import for a fully qualified type, if it needs one.
    pub fn add(&mut self, fully_qualified_type: &str) {
        if !needs_import(fully_qualified_type) {
            return;
        }
        let root = fully_qualified_type
            .split('.')
            .next()
            .unwrap_or(fully_qualified_type);
        self.imports
            .entry(root.to_string())
            .or_default()
            .insert(fully_qualified_type.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Render the import statements, with a blank line between package groups.
    pub fn render(&self) -> String {
        let (java, other): (Vec<_>, Vec<_>) = self
            .imports
            .iter()
            .partition(|(root, _)| *root == "java" || *root == "javax");

        java.into_iter()
            .chain(other)
            .map(|(_, types)| {
                types
                    .iter()
                    .map(|t| format!("import {t};"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn needs_import(fully_qualified_type: &str) -> bool {
    if fully_qualified_type.ends_with("[]") || !fully_qualified_type.contains('.') {
        return false;
    }
    match fully_qualified_type.strip_prefix("java.lang.") {
        Some(rest) => rest.contains('.'),
        None => true,
    }
}

/// The unqualified name of a type (`java.util.Date` -> `Date`).
pub fn short_name(fully_qualified_type: &str) -> &str {
    fully_qualified_type
        .rsplit('.')
        .next()
        .unwrap_or(fully_qualified_type)
}
