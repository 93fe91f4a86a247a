use crate::schema::JdbcType;

/// Map a SQL Server `DATA_TYPE` to the JDBC type the SQL Server driver reports.
///
/// `max_length` is `CHARACTER_MAXIMUM_LENGTH`; `-1` marks the `(max)` variants,
/// which the driver reports as long types.
pub fn jdbc_type(data_type: &str, max_length: Option<i32>) -> JdbcType {
    let is_max = max_length == Some(-1);

    match data_type {
        "bit" => JdbcType::Bit,
        "tinyint" => JdbcType::TinyInt,
        "smallint" => JdbcType::SmallInt,
        "int" => JdbcType::Integer,
        "bigint" => JdbcType::BigInt,
        "real" => JdbcType::Real,
        "float" => JdbcType::Double,
        "decimal" | "money" | "smallmoney" => JdbcType::Decimal,
        "numeric" => JdbcType::Numeric,
        "char" | "nchar" | "uniqueidentifier" => JdbcType::Char,
        "varchar" | "nvarchar" if is_max => JdbcType::LongVarchar,
        "varchar" | "nvarchar" => JdbcType::Varchar,
        "text" | "ntext" | "xml" => JdbcType::LongVarchar,
        "binary" | "timestamp" | "rowversion" => JdbcType::Binary,
        "varbinary" if is_max => JdbcType::LongVarBinary,
        "varbinary" => JdbcType::VarBinary,
        "image" => JdbcType::LongVarBinary,
        "date" => JdbcType::Date,
        "time" => JdbcType::Time,
        "datetime" | "datetime2" | "smalldatetime" | "datetimeoffset" => JdbcType::Timestamp,
        // sql_variant, hierarchyid, geometry, geography
        _ => JdbcType::Other,
    }
}
