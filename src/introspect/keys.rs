use crate::provider::{ImportedKeyColumn, IndexColumn};

/// One index's columns, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

/// Group consecutive index rows by index name.
///
/// Uniqueness is taken from the first row of each group.
pub fn group_indexes(rows: Vec<IndexColumn>) -> Vec<IndexGroup> {
    let mut groups: Vec<IndexGroup> = Vec::new();

    for row in rows {
        match groups.last_mut() {
            Some(group) if group.name == row.index_name => group.columns.push(row.column_name),
            _ => groups.push(IndexGroup {
                name: row.index_name,
                unique: !row.non_unique,
                columns: vec![row.column_name],
            }),
        }
    }

    groups
}

/// Group consecutive foreign-key rows by constraint name, each group in key order.
pub fn group_foreign_keys(rows: Vec<ImportedKeyColumn>) -> Vec<Vec<String>> {
    let mut groups: Vec<(String, Vec<ImportedKeyColumn>)> = Vec::new();

    for row in rows {
        match groups.last_mut() {
            Some((name, columns)) if *name == row.fk_name => columns.push(row),
            _ => groups.push((row.fk_name.clone(), vec![row])),
        }
    }

    groups
        .into_iter()
        .map(|(_, mut columns)| {
            columns.sort_by_key(|c| c.key_seq);
            columns.into_iter().map(|c| c.column_name).collect()
        })
        .collect()
}
