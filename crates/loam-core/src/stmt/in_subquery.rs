use super::{Expr, QueryPart};

/// `expr [NOT] IN (subquery)`.
#[derive(Debug, Clone)]
pub struct InSubqueryPredicate {
    pub expr: Expr,
    pub subquery: Box<QueryPart>,
    pub negated: bool,
}
