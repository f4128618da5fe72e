use super::Expr;

/// `expr IS [NOT] NULL`.
///
/// A separate node from comparison because SQL null comparison semantics
/// differ from `=`/`<>`.
#[derive(Debug, Clone)]
pub struct NullnessPredicate {
    pub expr: Expr,
    pub negated: bool,
}
