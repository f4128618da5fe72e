use super::{Expr, Predicate};

/// A searched CASE expression: `CASE WHEN p THEN e ... ELSE o END`.
#[derive(Debug, Clone)]
pub struct CaseSearched {
    pub whens: Vec<CaseWhen>,
    pub otherwise: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct CaseWhen {
    pub predicate: Predicate,
    pub result: Expr,
}
