use super::{NullPrecedence, QueryPart, SortDirection};

/// The WITH clause: a list of common table expressions.
#[derive(Debug, Clone, Default)]
pub struct CteContainer {
    pub ctes: Vec<CteStatement>,
}

impl CteContainer {
    /// The container renders `WITH RECURSIVE` iff any member CTE needs
    /// recursion.
    pub fn is_recursive(&self) -> bool {
        self.ctes.iter().any(|cte| cte.recursive)
    }
}

/// One `name (columns) AS (definition)` element, optionally followed by
/// SEARCH and CYCLE clauses.
#[derive(Debug, Clone)]
pub struct CteStatement {
    pub name: String,
    pub columns: Vec<String>,
    pub definition: Box<QueryPart>,
    pub recursive: bool,
    pub search: Option<SearchClause>,
    pub cycle: Option<CycleClause>,
}

/// `SEARCH DEPTH|BREADTH FIRST BY a, b SET ord`.
#[derive(Debug, Clone)]
pub struct SearchClause {
    pub kind: SearchKind,
    pub by: Vec<SearchBySpec>,
    pub set_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Depth,
    Breadth,
}

#[derive(Debug, Clone)]
pub struct SearchBySpec {
    pub column: String,
    pub direction: SortDirection,
    pub null_precedence: NullPrecedence,
}

/// `CYCLE a, b SET mark TO 'v1' DEFAULT 'v2' [USING path]`.
#[derive(Debug, Clone)]
pub struct CycleClause {
    pub columns: Vec<String>,
    pub mark_column: String,
    pub mark_value: String,
    pub no_mark_value: String,
}

impl CteStatement {
    pub fn new(name: impl Into<String>, definition: QueryPart) -> CteStatement {
        CteStatement {
            name: name.into(),
            columns: vec![],
            definition: Box::new(definition),
            recursive: false,
            search: None,
            cycle: None,
        }
    }
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Depth => "DEPTH",
            Self::Breadth => "BREADTH",
        }
    }
}
