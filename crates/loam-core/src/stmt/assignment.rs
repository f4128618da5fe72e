use super::{ColumnReference, Expr};

/// One `column = expr` element of an UPDATE SET clause.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: ColumnReference,
    pub value: Expr,
}
