/// The JDBC-level type of a column or expression.
///
/// This is the vocabulary the renderer uses for CAST target names and the
/// binders use for value coercion hints. Storage-specific refinements
/// (lengths, precisions) belong to the external DDL layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JdbcType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Double,
    Decimal,
    Varchar,
    Timestamp,
    Date,
    Binary,
}

impl JdbcType {
    /// Returns `true` for types that order/compare numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::SmallInt | Self::Integer | Self::BigInt | Self::Double | Self::Decimal
        )
    }
}
