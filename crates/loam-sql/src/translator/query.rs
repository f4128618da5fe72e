use super::pagination::{self, LimitExpr};
use super::{Clause, Formatter, ToSql};

use loam_core::stmt::{
    JoinType, NullPrecedence, QueryGroup, QueryPart, QuerySpec, SortDirection,
    SortSpecification, TableGroup, TableGroupJoin,
};
use loam_core::Result;

impl ToSql for &QueryPart {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            QueryPart::Spec(spec) => pagination::render_query_spec(spec, f),
            QueryPart::Group(group) => render_query_group(group, f),
        }
    }
}

/// Options threaded into the spec body by the pagination strategy.
#[derive(Default)]
pub(super) struct BodyOpts<'a> {
    /// Rendered right after `SELECT [DISTINCT]`, e.g. `TOP (n)`.
    pub top: Option<TopHead<'a>>,

    /// Row-numbering items appended to the select list.
    pub window: Option<WindowItems<'a>>,

    /// Set when the sorts move into the window's OVER clause.
    pub suppress_sorts: bool,
}

pub(super) struct TopHead<'a> {
    pub limit: LimitExpr<'a>,
    pub percent: bool,
    pub with_ties: bool,
}

pub(super) struct WindowItems<'a> {
    /// `row_number` or `rank`
    pub function: &'static str,
    pub sorts: &'a [SortSpecification],

    /// Adds `count(*) OVER () AS cnt_` for percentage bounds.
    pub with_count: bool,
}

pub(super) fn render_spec_body(
    spec: &QuerySpec,
    f: &mut Formatter<'_>,
    opts: BodyOpts<'_>,
) -> Result<()> {
    f.with_clause(Clause::Select, |f| {
        fmt!(f, "SELECT ");
        if spec.select.distinct {
            fmt!(f, "DISTINCT ");
        }
        if let Some(top) = &opts.top {
            // The count is a fetch expression, not a select item; keep it
            // out of the select-clause casting rules.
            f.with_clause(Clause::Fetch, |f| {
                fmt!(f, "TOP (");
                pagination::render_limit_expr(&top.limit, f)?;
                fmt!(f, ")");
                Ok(())
            })?;
            if top.percent {
                fmt!(f, " PERCENT");
            }
            if top.with_ties {
                fmt!(f, " WITH TIES");
            }
            fmt!(f, " ");
        }

        if spec.select.items.is_empty() {
            fmt!(f, "*");
        }
        let mut separator = "";
        for item in &spec.select.items {
            fmt!(f, separator item.expr);
            if let Some(alias) = &item.alias {
                fmt!(f, " AS " alias);
            }
            separator = ", ";
        }

        if let Some(window) = &opts.window {
            fmt!(f, ", " window.function "() OVER (ORDER BY ");
            if window.sorts.is_empty() {
                fmt!(f, "(SELECT 0)");
            } else {
                render_sort_specifications(window.sorts, f)?;
            }
            fmt!(f, ") AS rn_");
            if window.with_count {
                fmt!(f, ", count(*) OVER () AS cnt_");
            }
        }
        Ok(())
    })?;

    if !spec.from.table_groups.is_empty() {
        f.with_clause(Clause::From, |f| {
            fmt!(f, " FROM ");
            let mut separator = "";
            for group in &spec.from.table_groups {
                fmt!(f, separator);
                render_table_group(group, f)?;
                separator = ", ";
            }
            Ok(())
        })?;
    }

    if let Some(predicate) = &spec.where_clause {
        if !predicate.is_empty() {
            f.with_clause(Clause::Where, |f| {
                fmt!(f, " WHERE " predicate);
                Ok(())
            })?;
        }
    }

    if !spec.group_by.is_empty() {
        f.with_clause(Clause::GroupBy, |f| {
            fmt!(f, " GROUP BY ");
            let mut separator = "";
            for expr in &spec.group_by {
                let expr = if f.dialect().supports_select_alias_in_group_by {
                    expr
                } else {
                    spec.resolve_aliased_expression(expr)
                };
                fmt!(f, separator expr);
                separator = ", ";
            }
            Ok(())
        })?;
    }

    if let Some(predicate) = &spec.having {
        if !predicate.is_empty() {
            f.with_clause(Clause::Having, |f| {
                fmt!(f, " HAVING " predicate);
                Ok(())
            })?;
        }
    }

    if !opts.suppress_sorts && !spec.sorts.is_empty() {
        f.with_clause(Clause::OrderBy, |f| {
            fmt!(f, " ORDER BY ");
            render_sort_specifications(&spec.sorts, f)
        })?;
    }

    Ok(())
}

fn render_query_group(group: &QueryGroup, f: &mut Formatter<'_>) -> Result<()> {
    let operator = group.set_operator.as_str();

    let mut first = true;
    for part in &group.parts {
        if !first {
            fmt!(f, " " operator " ");
        }
        first = false;

        // A member carrying its own sorts or limits must keep them inside
        // parentheses; otherwise they would bind to the whole group.
        let parenthesize = match part {
            QueryPart::Spec(spec) => {
                !spec.sorts.is_empty() || spec.offset.is_some() || spec.fetch.is_some()
            }
            QueryPart::Group(_) => true,
        };
        if parenthesize {
            fmt!(f, "(" part ")");
        } else {
            fmt!(f, part);
        }
    }

    if !group.sorts.is_empty() {
        f.with_clause(Clause::OrderBy, |f| {
            fmt!(f, " ORDER BY ");
            render_sort_specifications(&group.sorts, f)
        })?;
    }

    pagination::render_group_tail(group, f)
}

// ---------------------------------------------------------------------------
// FROM clause
// ---------------------------------------------------------------------------

fn render_table_group(group: &TableGroup, f: &mut Formatter<'_>) -> Result<()> {
    fmt!(f, group.primary.table_expression " " group.primary.identification_variable);
    for join in &group.joins {
        render_table_group_join(join, f)?;
    }
    Ok(())
}

fn render_table_group_join(join: &TableGroupJoin, f: &mut Formatter<'_>) -> Result<()> {
    let join_kind = join.join_type.as_str();
    let primary = &join.joined.primary;
    fmt!(f, " " join_kind " " primary.table_expression " " primary.identification_variable);

    match &join.predicate {
        Some(predicate) if !predicate.is_empty() => {
            fmt!(f, " ON " predicate);
        }
        _ if join.join_type != JoinType::Cross => {
            fmt!(f, " ON 1 = 1");
        }
        _ => {}
    }

    for nested in &join.joined.joins {
        render_table_group_join(nested, f)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

pub(super) fn render_sort_specifications(
    sorts: &[SortSpecification],
    f: &mut Formatter<'_>,
) -> Result<()> {
    let mut separator = "";
    for sort in sorts {
        fmt!(f, separator);
        render_sort(sort, f)?;
        separator = ", ";
    }
    Ok(())
}

fn render_sort(sort: &SortSpecification, f: &mut Formatter<'_>) -> Result<()> {
    if sort.null_precedence != NullPrecedence::None && !f.dialect().supports_null_precedence {
        // Emulate with a leading nullness sort key.
        let (when_null, otherwise) = match sort.null_precedence {
            NullPrecedence::First => ("0", "1"),
            _ => ("1", "0"),
        };
        fmt!(f, "CASE WHEN " sort.expr " IS NULL THEN " when_null " ELSE " otherwise " END, ");
        render_sort_expr(sort, f)?;
        return Ok(());
    }

    render_sort_expr(sort, f)?;
    if sort.null_precedence != NullPrecedence::None {
        let precedence = match sort.null_precedence {
            NullPrecedence::First => " NULLS FIRST",
            _ => " NULLS LAST",
        };
        fmt!(f, precedence);
    }
    Ok(())
}

fn render_sort_expr(sort: &SortSpecification, f: &mut Formatter<'_>) -> Result<()> {
    fmt!(f, sort.expr);
    if sort.direction == SortDirection::Descending {
        fmt!(f, " DESC");
    }
    Ok(())
}
