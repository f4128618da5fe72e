use super::Value;
use crate::schema::db::JdbcType;

/// A literal value together with its declared JDBC type.
///
/// The type matters at render time: NULL literals in a select list are
/// always cast to their declared type, and some dialects cast all select
/// list literals to keep result metadata well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub jdbc_type: JdbcType,
}

impl Literal {
    pub fn new(value: impl Into<Value>, jdbc_type: JdbcType) -> Literal {
        Literal {
            value: value.into(),
            jdbc_type,
        }
    }

    pub fn null(jdbc_type: JdbcType) -> Literal {
        Literal {
            value: Value::Null,
            jdbc_type,
        }
    }
}
