use super::{CteContainer, QueryPart};

/// A top-level SELECT statement.
#[derive(Debug, Clone)]
pub struct Select {
    pub with: Option<CteContainer>,
    pub query: QueryPart,
}

impl Select {
    pub fn new(query: impl Into<QueryPart>) -> Select {
        Select {
            with: None,
            query: query.into(),
        }
    }
}
