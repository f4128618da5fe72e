use super::Value;
use crate::schema::db::JdbcType;

/// A bind-parameter marker.
///
/// The value travels with the node so the walker can capture a binder at
/// first occurrence; the binder list order therefore always matches the
/// placeholder order in the rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub value: Value,
    pub jdbc_type: Option<JdbcType>,
}

impl Parameter {
    pub fn new(value: impl Into<Value>) -> Parameter {
        Parameter {
            value: value.into(),
            jdbc_type: None,
        }
    }

    pub fn typed(value: impl Into<Value>, jdbc_type: JdbcType) -> Parameter {
        Parameter {
            value: value.into(),
            jdbc_type: Some(jdbc_type),
        }
    }
}
