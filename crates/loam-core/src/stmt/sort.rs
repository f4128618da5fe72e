use super::Expr;

#[derive(Debug, Clone)]
pub struct SortSpecification {
    pub expr: Expr,
    pub direction: SortDirection,
    pub null_precedence: NullPrecedence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Where NULL sorts relative to non-NULL values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPrecedence {
    /// Dialect default; renders nothing.
    #[default]
    None,
    First,
    Last,
}

impl SortSpecification {
    pub fn asc(expr: impl Into<Expr>) -> SortSpecification {
        SortSpecification {
            expr: expr.into(),
            direction: SortDirection::Ascending,
            null_precedence: NullPrecedence::None,
        }
    }

    pub fn desc(expr: impl Into<Expr>) -> SortSpecification {
        SortSpecification {
            expr: expr.into(),
            direction: SortDirection::Descending,
            null_precedence: NullPrecedence::None,
        }
    }
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn reverse(&self) -> SortDirection {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}
