use super::Expr;

#[derive(Debug, Clone)]
pub struct BetweenPredicate {
    pub expr: Expr,
    pub lower: Expr,
    pub upper: Expr,
    pub negated: bool,
}
