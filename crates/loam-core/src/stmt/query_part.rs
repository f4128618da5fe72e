use super::{Expr, FetchClauseType, QueryGroup, QuerySpec, SortSpecification};

/// Either a single query spec or a set-operator combination of parts.
#[derive(Debug, Clone)]
pub enum QueryPart {
    Spec(QuerySpec),
    Group(QueryGroup),
}

impl QueryPart {
    pub fn sorts(&self) -> &[SortSpecification] {
        match self {
            Self::Spec(spec) => &spec.sorts,
            Self::Group(group) => &group.sorts,
        }
    }

    pub fn offset_expr(&self) -> Option<&Expr> {
        match self {
            Self::Spec(spec) => spec.offset.as_ref(),
            Self::Group(group) => group.offset.as_ref(),
        }
    }

    pub fn fetch_expr(&self) -> Option<&Expr> {
        match self {
            Self::Spec(spec) => spec.fetch.as_ref(),
            Self::Group(group) => group.fetch.as_ref(),
        }
    }

    pub fn fetch_clause_type(&self) -> FetchClauseType {
        match self {
            Self::Spec(spec) => spec.fetch_clause_type,
            Self::Group(group) => group.fetch_clause_type,
        }
    }

    pub fn has_offset_or_fetch(&self) -> bool {
        self.offset_expr().is_some() || self.fetch_expr().is_some()
    }

    pub fn as_spec(&self) -> Option<&QuerySpec> {
        match self {
            Self::Spec(spec) => Some(spec),
            _ => None,
        }
    }
}

impl From<QuerySpec> for QueryPart {
    fn from(value: QuerySpec) -> Self {
        Self::Spec(value)
    }
}

impl From<QueryGroup> for QueryPart {
    fn from(value: QueryGroup) -> Self {
        Self::Group(value)
    }
}
