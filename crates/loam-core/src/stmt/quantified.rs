use super::{ComparisonOperator, Expr, QueryPart};

/// `lhs op ANY|ALL (subquery)`.
#[derive(Debug, Clone)]
pub struct QuantifiedComparison {
    pub lhs: Expr,
    pub op: ComparisonOperator,
    pub quantifier: Quantifier,
    pub subquery: QueryPart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Any,
    All,
}

impl Quantifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::All => "ALL",
        }
    }
}
