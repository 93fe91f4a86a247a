pub mod mssql;
pub mod pg;

use thiserror::Error;

use crate::schema::{ColumnDefinition, JdbcType, ResolvedType};

/// Raised when a column's JDBC type has no Java mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported JDBC type {}", .0.name())]
pub struct UnsupportedType(pub JdbcType);

/// Chooses the Java type for a column.
pub trait TypeResolver {
    fn resolve(&self, column: &ColumnDefinition) -> Result<ResolvedType, UnsupportedType>;
}

/// The standard JDBC to Java mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeResolver {
    /// Map every DECIMAL and NUMERIC column to `java.math.BigDecimal`.
    pub force_big_decimals: bool,
}

impl DefaultTypeResolver {
    pub fn new(force_big_decimals: bool) -> Self {
        Self { force_big_decimals }
    }

    fn decimal_type(&self, column: &ColumnDefinition) -> &'static str {
        if column.scale > 0 || column.length > 18 || self.force_big_decimals {
            "java.math.BigDecimal"
        } else if column.length > 9 {
            "java.lang.Long"
        } else if column.length > 4 {
            "java.lang.Integer"
        } else {
            "java.lang.Short"
        }
    }
}

impl TypeResolver for DefaultTypeResolver {
    fn resolve(&self, column: &ColumnDefinition) -> Result<ResolvedType, UnsupportedType> {
        let java_type = match column.jdbc_type {
            JdbcType::BigInt => "java.lang.Long",
            JdbcType::Bit | JdbcType::Boolean => "java.lang.Boolean",
            JdbcType::Char | JdbcType::Varchar | JdbcType::LongVarchar | JdbcType::Clob => {
                "java.lang.String"
            }
            JdbcType::Date | JdbcType::Time | JdbcType::Timestamp => "java.util.Date",
            JdbcType::Decimal | JdbcType::Numeric => self.decimal_type(column),
            JdbcType::Double | JdbcType::Float => "java.lang.Double",
            JdbcType::Integer => "java.lang.Integer",
            JdbcType::Real => "java.lang.Float",
            JdbcType::SmallInt => "java.lang.Short",
            JdbcType::TinyInt => "java.lang.Byte",
            JdbcType::Binary | JdbcType::VarBinary | JdbcType::LongVarBinary | JdbcType::Blob => {
                "byte[]"
            }
            JdbcType::Null
            | JdbcType::Other
            | JdbcType::JavaObject
            | JdbcType::Distinct
            | JdbcType::Struct
            | JdbcType::Array
            | JdbcType::Ref
            | JdbcType::DataLink => return Err(UnsupportedType(column.jdbc_type)),
        };

        Ok(ResolvedType {
            java_type: java_type.to_string(),
            jdbc_type_name: column.jdbc_type.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(jdbc_type: JdbcType) -> Result<ResolvedType, UnsupportedType> {
        DefaultTypeResolver::default().resolve(&ColumnDefinition::new("c", jdbc_type))
    }

    fn decimal(length: i32, scale: i32, force: bool) -> String {
        let mut col = ColumnDefinition::new("amount", JdbcType::Decimal);
        col.length = length;
        col.scale = scale;
        DefaultTypeResolver::new(force).resolve(&col).unwrap().java_type
    }

    #[test]
    fn test_simple_types() {
        assert_eq!(resolve(JdbcType::Integer).unwrap().java_type, "java.lang.Integer");
        assert_eq!(resolve(JdbcType::Varchar).unwrap().java_type, "java.lang.String");
        assert_eq!(resolve(JdbcType::Clob).unwrap().java_type, "java.lang.String");
        assert_eq!(resolve(JdbcType::Timestamp).unwrap().java_type, "java.util.Date");
        assert_eq!(resolve(JdbcType::Boolean).unwrap().java_type, "java.lang.Boolean");
        assert_eq!(resolve(JdbcType::TinyInt).unwrap().java_type, "java.lang.Byte");

        let blob = resolve(JdbcType::LongVarBinary).unwrap();
        assert_eq!(blob.java_type, "byte[]");
        assert_eq!(blob.jdbc_type_name, "LONGVARBINARY");
    }

    #[test]
    fn test_decimal_sizes() {
        assert_eq!(decimal(10, 2, false), "java.math.BigDecimal");
        assert_eq!(decimal(19, 0, false), "java.math.BigDecimal");
        assert_eq!(decimal(18, 0, false), "java.lang.Long");
        assert_eq!(decimal(9, 0, false), "java.lang.Integer");
        assert_eq!(decimal(4, 0, false), "java.lang.Short");
        assert_eq!(decimal(4, 0, true), "java.math.BigDecimal");
    }

    #[test]
    fn test_unsupported_types() {
        for jdbc_type in [JdbcType::Other, JdbcType::Array, JdbcType::Struct, JdbcType::Null] {
            assert_eq!(resolve(jdbc_type), Err(UnsupportedType(jdbc_type)));
        }
        assert_eq!(
            UnsupportedType(JdbcType::Other).to_string(),
            "Unsupported JDBC type OTHER"
        );
    }
}
