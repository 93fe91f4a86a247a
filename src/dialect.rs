/// Resolve a generated-key `sql_statement` that names a known database
/// to the statement that retrieves the last identity value.
///
/// Anything that is not a recognised name is returned unchanged, so a literal
/// statement such as `SELECT currval('user_seq')` passes straight through.
pub fn identity_retrieval_statement(sql_statement: &str) -> &str {
    match sql_statement.to_ascii_uppercase().as_str() {
        "DB2" | "CLOUDSCAPE" | "DERBY" => "VALUES IDENTITY_VAL_LOCAL()",
        "MYSQL" => "SELECT LAST_INSERT_ID()",
        "SQLSERVER" => "SELECT SCOPE_IDENTITY()",
        "HSQLDB" => "CALL IDENTITY()",
        "SYBASE" => "SELECT @@IDENTITY",
        "DB2_MF" => "SELECT IDENTITY_VAL_LOCAL() FROM SYSIBM.SYSDUMMY1",
        _ => sql_statement,
    }
}
