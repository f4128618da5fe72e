use super::Expr;

#[derive(Debug, Clone)]
pub struct ComparisonPredicate {
    pub lhs: Expr,
    pub op: ComparisonOperator,
    pub rhs: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonPredicate {
    pub fn new(lhs: impl Into<Expr>, op: ComparisonOperator, rhs: impl Into<Expr>) -> Self {
        ComparisonPredicate {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns `true` for `=` and `<>`, whose tuple expansion has no
    /// ordering asymmetry.
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// The operator with its operands swapped (not the boolean negation).
    pub fn invert(&self) -> ComparisonOperator {
        match self {
            Self::Equal => Self::Equal,
            Self::NotEqual => Self::NotEqual,
            Self::LessThan => Self::GreaterThan,
            Self::LessThanOrEqual => Self::GreaterThanOrEqual,
            Self::GreaterThan => Self::LessThan,
            Self::GreaterThanOrEqual => Self::LessThanOrEqual,
        }
    }

    /// The boolean negation of the operator.
    pub fn negate(&self) -> ComparisonOperator {
        match self {
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
            Self::LessThan => Self::GreaterThanOrEqual,
            Self::LessThanOrEqual => Self::GreaterThan,
            Self::GreaterThan => Self::LessThanOrEqual,
            Self::GreaterThanOrEqual => Self::LessThan,
        }
    }

    /// Strips the equality component: `<=` becomes `<`, `>=` becomes `>`.
    pub fn sharpen(&self) -> ComparisonOperator {
        match self {
            Self::LessThanOrEqual => Self::LessThan,
            Self::GreaterThanOrEqual => Self::GreaterThan,
            other => *other,
        }
    }
}
