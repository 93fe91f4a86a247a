use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AbatorError;
use crate::schema::ActualTableName;
use crate::typemap;

use super::{IdentifierCase, ImportedKeyColumn, IndexColumn, MetadataProvider, RawColumn, TablePattern};

/// PostgreSQL metadata via `information_schema` and `pg_catalog`.
pub struct PgProvider {
    pool: PgPool,
}

impl PgProvider {
    pub async fn connect(url: &str) -> Result<Self, AbatorError> {
        let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
        Ok(Self { pool })
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

impl MetadataProvider for PgProvider {
    fn identifier_case(&self) -> IdentifierCase {
        IdentifierCase::Lower
    }

    fn search_string_escape(&self) -> &str {
        "\\"
    }

    async fn columns(&mut self, pattern: &TablePattern) -> Result<Vec<RawColumn>, AbatorError> {
        // Backslash is the default LIKE escape in PostgreSQL. The catalog is
        // always the connected database, so it is not part of the lookup.
        let rows = sqlx::query_as::<_, ColumnRow>(
            r#"
            SELECT c.table_schema::text AS table_schema, c.table_name::text AS table_name,
                   c.column_name::text AS column_name, c.udt_name::text AS udt_name,
                   COALESCE(c.character_maximum_length, c.numeric_precision, 0)::int4 AS length,
                   COALESCE(c.numeric_scale, 0)::int4 AS scale,
                   c.is_nullable = 'YES' AS is_nullable
            FROM information_schema.columns c
            WHERE c.table_schema LIKE $1 AND c.table_name LIKE $2
            ORDER BY c.table_schema, c.table_name, c.ordinal_position
            "#,
        )
        .bind(pattern.schema_pattern.as_deref().unwrap_or("%"))
        .bind(pattern.table_pattern.as_str())
        .fetch_all(&self.pool)
        .await?;

        let columns = rows
            .into_iter()
            .map(|row| RawColumn {
                table: ActualTableName::new(None, Some(row.table_schema), row.table_name),
                jdbc_type: typemap::pg::jdbc_type(&row.udt_name),
                column_name: row.column_name,
                type_name: row.udt_name,
                length: row.length,
                scale: row.scale,
                nullable: row.is_nullable,
            })
            .collect();

        Ok(columns)
    }

    async fn primary_keys(&mut self, table: &ActualTableName) -> Result<Vec<String>, AbatorError> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT kcu.column_name::text AS column_name
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                USING (constraint_name, table_schema, table_name)
            WHERE ($1::text = '' OR tc.table_schema = $1) AND tc.table_name = $2
                AND tc.constraint_type = 'PRIMARY KEY'
            ORDER BY kcu.ordinal_position
            "#,
        )
        .bind(table.schema.as_deref().unwrap_or(""))
        .bind(table.table_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn index_info(&mut self, table: &ActualTableName) -> Result<Vec<IndexColumn>, AbatorError> {
        let rows = sqlx::query_as::<_, IndexRow>(
            r#"
            SELECT i.relname::text AS index_name, NOT ix.indisunique AS non_unique,
                   a.attname::text AS column_name
            FROM pg_index ix
            JOIN pg_class t ON t.oid = ix.indrelid
            JOIN pg_class i ON i.oid = ix.indexrelid
            JOIN pg_namespace n ON n.oid = t.relnamespace
            JOIN LATERAL unnest(ix.indkey::int2[]) WITH ORDINALITY AS k(attnum, ord) ON true
            JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = k.attnum
            WHERE ($1::text = '' OR n.nspname = $1) AND t.relname = $2
            ORDER BY non_unique, index_name, k.ord
            "#,
        )
        .bind(table.schema.as_deref().unwrap_or(""))
        .bind(table.table_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| IndexColumn {
                index_name: row.index_name,
                column_name: row.column_name,
                non_unique: row.non_unique,
            })
            .collect())
    }

    async fn imported_keys(
        &mut self,
        table: &ActualTableName,
    ) -> Result<Vec<ImportedKeyColumn>, AbatorError> {
        let rows = sqlx::query_as::<_, FkRow>(
            r#"
            SELECT tc.constraint_name::text AS fk_name, kcu.column_name::text AS column_name,
                   kcu.ordinal_position::int4 AS key_seq
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                ON kcu.constraint_name = tc.constraint_name
                AND kcu.table_schema = tc.table_schema
                AND kcu.table_name = tc.table_name
            WHERE ($1::text = '' OR tc.table_schema = $1) AND tc.table_name = $2
                AND tc.constraint_type = 'FOREIGN KEY'
            ORDER BY tc.constraint_name, kcu.ordinal_position
            "#,
        )
        .bind(table.schema.as_deref().unwrap_or(""))
        .bind(table.table_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ImportedKeyColumn {
                fk_name: row.fk_name,
                column_name: row.column_name,
                key_seq: row.key_seq,
            })
            .collect())
    }
}

#[derive(sqlx::FromRow)]
struct ColumnRow {
    table_schema: String,
    table_name: String,
    column_name: String,
    udt_name: String,
    length: i32,
    scale: i32,
    is_nullable: bool,
}

#[derive(sqlx::FromRow)]
struct IndexRow {
    index_name: String,
    non_unique: bool,
    column_name: String,
}

#[derive(sqlx::FromRow)]
struct FkRow {
    fk_name: String,
    column_name: String,
    key_seq: i32,
}
