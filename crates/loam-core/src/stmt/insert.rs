use super::{ColumnReference, CteContainer, Expr, QueryPart, TableReference};

#[derive(Debug, Clone)]
pub struct Insert {
    pub with: Option<CteContainer>,
    pub target: TableReference,

    /// Target columns, in the positional order `source` rows follow.
    pub columns: Vec<String>,

    pub source: InsertSource,
    pub returning: Vec<ColumnReference>,
}

#[derive(Debug, Clone)]
pub enum InsertSource {
    /// `VALUES (..), (..)`
    Values(Vec<Vec<Expr>>),

    /// `INSERT ... SELECT`
    Select(Box<QueryPart>),
}
