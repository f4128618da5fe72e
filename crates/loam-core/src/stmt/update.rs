use super::{Assignment, ColumnReference, CteContainer, Predicate, TableReference};

#[derive(Debug, Clone)]
pub struct Update {
    pub with: Option<CteContainer>,
    pub target: TableReference,
    pub assignments: Vec<Assignment>,
    pub predicate: Option<Predicate>,
    pub returning: Vec<ColumnReference>,
}
