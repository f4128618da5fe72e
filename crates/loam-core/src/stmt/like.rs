use super::Expr;

/// `expr [NOT] LIKE pattern [ESCAPE c]`.
#[derive(Debug, Clone)]
pub struct LikePredicate {
    pub expr: Expr,
    pub pattern: Expr,
    pub escape: Option<char>,
    pub negated: bool,
}
