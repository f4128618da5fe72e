use crate::schema::db::JdbcType;

/// A reference to a column (or read formula) of a table reference.
///
/// Formula-backed references carry a raw SQL fragment in `expression`; the
/// fragment is inlined verbatim at render time and is never treated as an
/// identifier to be qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    /// The identification variable of the owning table reference.
    pub qualifier: String,

    /// Column name, or the raw fragment when `is_formula`.
    pub expression: String,

    pub is_formula: bool,

    pub jdbc_type: JdbcType,
}

impl ColumnReference {
    pub fn column(
        qualifier: impl Into<String>,
        name: impl Into<String>,
        jdbc_type: JdbcType,
    ) -> ColumnReference {
        ColumnReference {
            qualifier: qualifier.into(),
            expression: name.into(),
            is_formula: false,
            jdbc_type,
        }
    }

    pub fn formula(
        qualifier: impl Into<String>,
        fragment: impl Into<String>,
        jdbc_type: JdbcType,
    ) -> ColumnReference {
        ColumnReference {
            qualifier: qualifier.into(),
            expression: fragment.into(),
            is_formula: true,
            jdbc_type,
        }
    }
}
