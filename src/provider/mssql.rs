use tiberius::{Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::error::AbatorError;
use crate::schema::ActualTableName;
use crate::typemap;

use super::{IdentifierCase, ImportedKeyColumn, IndexColumn, MetadataProvider, RawColumn, TablePattern};

/// SQL Server metadata via `INFORMATION_SCHEMA` and the `sys` catalog views.
pub struct MssqlProvider {
    client: Client<Compat<TcpStream>>,
}

impl MssqlProvider {
    /// Establish a connection to a SQL Server instance.
    pub async fn connect(
        host: &str,
        port: u16,
        database: &str,
        user: &str,
        password: &str,
        trust_cert: bool,
    ) -> Result<Self, AbatorError> {
        let mut config = Config::new();
        config.host(host);
        config.port(port);
        config.database(database);
        config.authentication(tiberius::AuthMethod::sql_server(user, password));
        config.encryption(EncryptionLevel::Required);
        if trust_cert {
            config.trust_cert();
        }

        let tcp = TcpStream::connect(config.get_addr()).await.map_err(|e| {
            AbatorError::Connection(format!("TCP connection to {host}:{port} failed: {e}"))
        })?;
        tcp.set_nodelay(true)
            .map_err(|e| AbatorError::Connection(format!("Failed to set TCP_NODELAY: {e}")))?;

        let client = Client::connect(config, tcp.compat_write()).await?;
        Ok(Self { client })
    }
}

impl MetadataProvider for MssqlProvider {
    fn identifier_case(&self) -> IdentifierCase {
        IdentifierCase::AsIs
    }

    fn search_string_escape(&self) -> &str {
        "\\"
    }

    async fn columns(&mut self, pattern: &TablePattern) -> Result<Vec<RawColumn>, AbatorError> {
        let query = r#"
            SELECT
                c.TABLE_CATALOG,
                c.TABLE_SCHEMA,
                c.TABLE_NAME,
                c.COLUMN_NAME,
                c.DATA_TYPE,
                c.CHARACTER_MAXIMUM_LENGTH,
                CAST(c.NUMERIC_PRECISION AS INT) AS NUMERIC_PRECISION,
                c.NUMERIC_SCALE,
                CASE WHEN c.IS_NULLABLE = 'YES' THEN 1 ELSE 0 END AS is_nullable
            FROM INFORMATION_SCHEMA.COLUMNS c
            WHERE (@P1 = '' OR c.TABLE_CATALOG = @P1)
              AND c.TABLE_SCHEMA LIKE @P2 ESCAPE '\'
              AND c.TABLE_NAME LIKE @P3 ESCAPE '\'
            ORDER BY c.TABLE_SCHEMA, c.TABLE_NAME, c.ORDINAL_POSITION
        "#;

        let catalog = pattern.catalog.as_deref().unwrap_or("");
        let schema = pattern.schema_pattern.as_deref().unwrap_or("%");
        let table = pattern.table_pattern.as_str();

        let stream = self.client.query(query, &[&catalog, &schema, &table]).await?;
        let rows = stream.into_first_result().await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let data_type = row
                .get::<&str, _>("DATA_TYPE")
                .unwrap_or("")
                .to_lowercase();
            let char_max_len: Option<i32> = row.get::<i32, _>("CHARACTER_MAXIMUM_LENGTH");
            let precision: Option<i32> = row.get::<i32, _>("NUMERIC_PRECISION");

            columns.push(RawColumn {
                table: ActualTableName::new(
                    row.get::<&str, _>("TABLE_CATALOG").map(str::to_string),
                    row.get::<&str, _>("TABLE_SCHEMA").map(str::to_string),
                    row.get::<&str, _>("TABLE_NAME").unwrap_or(""),
                ),
                column_name: row.get::<&str, _>("COLUMN_NAME").unwrap_or("").to_string(),
                jdbc_type: typemap::mssql::jdbc_type(&data_type, char_max_len),
                type_name: data_type,
                length: char_max_len.or(precision).unwrap_or(0),
                scale: row.get::<i32, _>("NUMERIC_SCALE").unwrap_or(0),
                nullable: row.get::<i32, _>("is_nullable").unwrap_or(0) == 1,
            });
        }

        Ok(columns)
    }

    async fn primary_keys(&mut self, table: &ActualTableName) -> Result<Vec<String>, AbatorError> {
        let query = r#"
            SELECT kcu.COLUMN_NAME
            FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc
            JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
                ON kcu.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
                AND kcu.TABLE_SCHEMA = tc.TABLE_SCHEMA
                AND kcu.TABLE_NAME = tc.TABLE_NAME
            WHERE (@P1 = '' OR tc.TABLE_SCHEMA = @P1)
              AND tc.TABLE_NAME = @P2
              AND tc.CONSTRAINT_TYPE = 'PRIMARY KEY'
            ORDER BY kcu.ORDINAL_POSITION
        "#;

        let schema = table.schema.as_deref().unwrap_or("");
        let name = table.table_name.as_str();
        let stream = self.client.query(query, &[&schema, &name]).await?;
        let rows = stream.into_first_result().await?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get::<&str, _>("COLUMN_NAME").map(str::to_string))
            .collect())
    }

    async fn index_info(&mut self, table: &ActualTableName) -> Result<Vec<IndexColumn>, AbatorError> {
        // Unlike the constraint lookups, sys.indexes includes the primary key's index.
        let query = r#"
            SELECT
                i.name AS index_name,
                i.is_unique,
                COL_NAME(ic.object_id, ic.column_id) AS column_name
            FROM sys.indexes i
            JOIN sys.index_columns ic
                ON ic.object_id = i.object_id AND ic.index_id = i.index_id
            WHERE i.object_id = OBJECT_ID(QUOTENAME(@P1) + '.' + QUOTENAME(@P2))
              AND i.type <> 0
              AND ic.key_ordinal > 0
            ORDER BY i.is_unique DESC, i.name, ic.key_ordinal
        "#;

        let schema = table.schema.as_deref().unwrap_or("dbo");
        let name = table.table_name.as_str();
        let stream = self.client.query(query, &[&schema, &name]).await?;
        let rows = stream.into_first_result().await?;

        Ok(rows
            .iter()
            .map(|row| IndexColumn {
                index_name: row.get::<&str, _>("index_name").unwrap_or("").to_string(),
                column_name: row.get::<&str, _>("column_name").unwrap_or("").to_string(),
                non_unique: !row.get::<bool, _>("is_unique").unwrap_or(false),
            })
            .collect())
    }

    async fn imported_keys(
        &mut self,
        table: &ActualTableName,
    ) -> Result<Vec<ImportedKeyColumn>, AbatorError> {
        let query = r#"
            SELECT
                fk.name AS fk_name,
                COL_NAME(fkc.parent_object_id, fkc.parent_column_id) AS column_name,
                fkc.constraint_column_id AS key_seq
            FROM sys.foreign_keys fk
            JOIN sys.foreign_key_columns fkc
                ON fkc.constraint_object_id = fk.object_id
            WHERE fk.parent_object_id = OBJECT_ID(QUOTENAME(@P1) + '.' + QUOTENAME(@P2))
            ORDER BY fk.name, fkc.constraint_column_id
        "#;

        let schema = table.schema.as_deref().unwrap_or("dbo");
        let name = table.table_name.as_str();
        let stream = self.client.query(query, &[&schema, &name]).await?;
        let rows = stream.into_first_result().await?;

        Ok(rows
            .iter()
            .map(|row| ImportedKeyColumn {
                fk_name: row.get::<&str, _>("fk_name").unwrap_or("").to_string(),
                column_name: row.get::<&str, _>("column_name").unwrap_or("").to_string(),
                key_seq: row.get::<i32, _>("key_seq").unwrap_or(0),
            })
            .collect())
    }
}
