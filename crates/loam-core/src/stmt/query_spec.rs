use super::{Expr, FetchClauseType, Predicate, SortSpecification, TableGroup};

/// One `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... ORDER BY ...
/// OFFSET/FETCH` block.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub select: SelectClause,
    pub from: FromClause,
    pub where_clause: Option<Predicate>,
    pub group_by: Vec<Expr>,
    pub having: Option<Predicate>,
    pub sorts: Vec<SortSpecification>,
    pub offset: Option<Expr>,
    pub fetch: Option<Expr>,
    pub fetch_clause_type: FetchClauseType,
}

#[derive(Debug, Clone, Default)]
pub struct SelectClause {
    pub distinct: bool,
    pub items: Vec<SelectItem>,
}

#[derive(Debug, Clone)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FromClause {
    pub table_groups: Vec<TableGroup>,
}

impl QuerySpec {
    pub fn new(select: SelectClause, from: FromClause) -> QuerySpec {
        QuerySpec {
            select,
            from,
            where_clause: None,
            group_by: vec![],
            having: None,
            sorts: vec![],
            offset: None,
            fetch: None,
            fetch_clause_type: FetchClauseType::RowsOnly,
        }
    }

    /// Resolves a GROUP BY expression that names a select alias (or a
    /// 1-based position) back to the underlying select-item expression.
    ///
    /// Used when the dialect cannot reference select aliases in GROUP BY.
    pub fn resolve_aliased_expression<'a>(&'a self, expr: &'a Expr) -> &'a Expr {
        match expr {
            Expr::SelfRendering(text) => {
                if let Ok(position) = text.parse::<usize>() {
                    if let Some(item) = self.select.items.get(position.wrapping_sub(1)) {
                        return &item.expr;
                    }
                }
                for item in &self.select.items {
                    if item.alias.as_deref() == Some(text.as_str()) {
                        return &item.expr;
                    }
                }
                expr
            }
            _ => expr,
        }
    }
}

impl SelectItem {
    pub fn expr(expr: impl Into<Expr>) -> SelectItem {
        SelectItem {
            expr: expr.into(),
            alias: None,
        }
    }

    pub fn aliased(expr: impl Into<Expr>, alias: impl Into<String>) -> SelectItem {
        SelectItem {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }
}
