use super::QueryPart;

/// `[NOT] EXISTS (subquery)`.
#[derive(Debug, Clone)]
pub struct ExistsPredicate {
    pub subquery: Box<QueryPart>,
    pub negated: bool,
}
