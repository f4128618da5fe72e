use super::Expr;

/// `expr [NOT] IN (e1, e2, ...)`.
///
/// The tested expression may be a tuple; how (and whether) a tuple IN-list
/// renders natively is a walker decision.
#[derive(Debug, Clone)]
pub struct InListPredicate {
    pub expr: Expr,
    pub list: Vec<Expr>,
    pub negated: bool,
}

impl InListPredicate {
    pub fn new(expr: impl Into<Expr>, list: Vec<Expr>) -> InListPredicate {
        InListPredicate {
            expr: expr.into(),
            list,
            negated: false,
        }
    }
}
