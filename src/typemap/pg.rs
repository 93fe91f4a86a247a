use crate::schema::JdbcType;

/// Map a PostgreSQL `udt_name` to the JDBC type the PostgreSQL driver reports.
pub fn jdbc_type(udt_name: &str) -> JdbcType {
    // Array types are reported with a leading underscore
    if udt_name.starts_with('_') {
        return JdbcType::Array;
    }

    match udt_name {
        "bool" => JdbcType::Bit,
        "int2" | "smallserial" => JdbcType::SmallInt,
        "int4" | "serial" | "oid" => JdbcType::Integer,
        "int8" | "bigserial" => JdbcType::BigInt,
        "float4" => JdbcType::Real,
        "float8" | "money" => JdbcType::Double,
        "numeric" => JdbcType::Numeric,
        "char" | "bpchar" => JdbcType::Char,
        "varchar" | "text" | "name" | "citext" => JdbcType::Varchar,
        "bytea" => JdbcType::Binary,
        "date" => JdbcType::Date,
        "time" | "timetz" => JdbcType::Time,
        "timestamp" | "timestamptz" => JdbcType::Timestamp,
        // uuid, json, jsonb, inet, cidr, interval, domains and user types
        _ => JdbcType::Other,
    }
}
