use super::{Expr, FetchClauseType, QueryPart, SetOperator, SortSpecification};

/// N query parts combined by a set operator.
///
/// The group's own ORDER BY and OFFSET/FETCH bind looser than any member
/// part's: they apply to the combined result.
#[derive(Debug, Clone)]
pub struct QueryGroup {
    pub set_operator: SetOperator,
    pub parts: Vec<QueryPart>,
    pub sorts: Vec<SortSpecification>,
    pub offset: Option<Expr>,
    pub fetch: Option<Expr>,
    pub fetch_clause_type: FetchClauseType,
}

impl QueryGroup {
    pub fn new(set_operator: SetOperator, parts: Vec<QueryPart>) -> QueryGroup {
        QueryGroup {
            set_operator,
            parts,
            sorts: vec![],
            offset: None,
            fetch: None,
            fetch_clause_type: FetchClauseType::RowsOnly,
        }
    }
}
