use loam_core::schema::db::JdbcType;
use loam_core::stmt::Value;
use loam_core::{Error, Result};

/// One captured bind parameter, in placeholder order.
///
/// Binders are captured at the parameter's first render occurrence, so the
/// vector's order always matches the placeholder order in the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterBinder {
    Value(Value, Option<JdbcType>),

    /// A synthesized binder combining a fetch count and an offset into a
    /// single bound value, used when the dialect's fetch syntax must carry
    /// `fetch + offset` in one placeholder.
    OffsetPlusFetch { offset: Value, fetch: Value },
}

impl ParameterBinder {
    /// Resolves the value actually sent to the driver.
    pub fn bind_value(&self) -> Result<Value> {
        match self {
            Self::Value(value, _) => Ok(value.clone()),
            Self::OffsetPlusFetch { offset, fetch } => {
                let (Some(offset), Some(fetch)) = (offset.as_i64(), fetch.as_i64()) else {
                    return Err(Error::invalid_mapping(
                        "offset and fetch parameters must bind integer values",
                    ));
                };
                Ok(Value::I64(offset + fetch))
            }
        }
    }

    pub fn jdbc_type(&self) -> Option<JdbcType> {
        match self {
            Self::Value(_, jdbc_type) => *jdbc_type,
            Self::OffsetPlusFetch { .. } => Some(JdbcType::BigInt),
        }
    }
}
