use super::{ColumnReference, CteContainer, Predicate, TableReference};

#[derive(Debug, Clone)]
pub struct Delete {
    pub with: Option<CteContainer>,
    pub target: TableReference,
    pub predicate: Option<Predicate>,
    pub returning: Vec<ColumnReference>,
}
