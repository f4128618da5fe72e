use super::query::{render_spec_body, BodyOpts, TopHead, WindowItems};
use super::{Clause, Formatter, ToSql};

use crate::dialect::PaginationStrategy;
use crate::params::ParameterBinder;

use loam_core::stmt::{Expr, FetchClauseType, QueryGroup, QuerySpec, Value};
use loam_core::{Error, Result};

/// The count rendered by a fetch-carrying clause: either the fetch
/// expression itself or the synthesized `fetch + offset`.
pub(super) enum LimitExpr<'a> {
    Expr(&'a Expr),
    Sum { fetch: &'a Expr, offset: &'a Expr },
}

pub(super) fn render_query_spec(spec: &QuerySpec, f: &mut Formatter<'_>) -> Result<()> {
    if spec.offset.is_none() && spec.fetch.is_none() {
        return render_spec_body(spec, f, BodyOpts::default());
    }

    match f.dialect().pagination {
        PaginationStrategy::OffsetFetch => {
            render_spec_body(spec, f, BodyOpts::default())?;
            render_offset_fetch_tail(
                spec.offset.as_ref(),
                spec.fetch.as_ref(),
                spec.fetch_clause_type,
                f,
            )
        }
        PaginationStrategy::LimitOffset => {
            render_spec_body(spec, f, BodyOpts::default())?;
            render_limit_tail(
                spec.offset.as_ref(),
                spec.fetch.as_ref(),
                spec.fetch_clause_type,
                f,
            )
        }
        PaginationStrategy::Top => render_top(spec, f),
        PaginationStrategy::WindowFunction => render_window_emulation(spec, f),
    }
}

pub(super) fn render_group_tail(group: &QueryGroup, f: &mut Formatter<'_>) -> Result<()> {
    if group.offset.is_none() && group.fetch.is_none() {
        return Ok(());
    }

    match f.dialect().pagination {
        PaginationStrategy::OffsetFetch => render_offset_fetch_tail(
            group.offset.as_ref(),
            group.fetch.as_ref(),
            group.fetch_clause_type,
            f,
        ),
        PaginationStrategy::LimitOffset => render_limit_tail(
            group.offset.as_ref(),
            group.fetch.as_ref(),
            group.fetch_clause_type,
            f,
        ),
        PaginationStrategy::Top | PaginationStrategy::WindowFunction => {
            Err(Error::unsupported_construct(
                "offset/fetch on a set-operation query requires native limit syntax",
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Native syntaxes
// ---------------------------------------------------------------------------

fn render_offset_fetch_tail(
    offset: Option<&Expr>,
    fetch: Option<&Expr>,
    fetch_clause_type: FetchClauseType,
    f: &mut Formatter<'_>,
) -> Result<()> {
    if fetch_clause_type.with_ties() && !f.dialect().supports_with_ties {
        return Err(Error::unsupported_construct(
            "dialect does not support FETCH ... WITH TIES",
        ));
    }
    if fetch_clause_type.is_percent() && !f.dialect().supports_fetch_percent {
        return Err(Error::unsupported_construct(
            "dialect does not support FETCH ... PERCENT",
        ));
    }

    if let Some(offset) = offset {
        f.with_clause(Clause::Offset, |f| {
            fmt!(f, " OFFSET " offset " ROWS");
            Ok(())
        })?;
    }
    if let Some(fetch) = fetch {
        f.with_clause(Clause::Fetch, |f| {
            fmt!(f, " FETCH FIRST " fetch);
            if fetch_clause_type.is_percent() {
                fmt!(f, " PERCENT");
            }
            if fetch_clause_type.with_ties() {
                fmt!(f, " ROWS WITH TIES");
            } else {
                fmt!(f, " ROWS ONLY");
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn render_limit_tail(
    offset: Option<&Expr>,
    fetch: Option<&Expr>,
    fetch_clause_type: FetchClauseType,
    f: &mut Formatter<'_>,
) -> Result<()> {
    // The LIMIT strategy was picked for a dialect whose only syntax is
    // plain row counts; a tree asking for PERCENT or WITH TIES here is a
    // strategy-selection bug, not a missing feature.
    if fetch_clause_type != FetchClauseType::RowsOnly {
        return Err(Error::capability_violation(
            "LIMIT pagination cannot render PERCENT or WITH TIES fetches",
        ));
    }

    match fetch {
        Some(fetch) => f.with_clause(Clause::Fetch, |f| {
            fmt!(f, " LIMIT " fetch);
            Ok(())
        })?,
        // Offset without fetch still needs a LIMIT: the largest signed
        // 64-bit count stands in for "all rows".
        None => fmt!(f, " LIMIT 9223372036854775807"),
    }
    if let Some(offset) = offset {
        f.with_clause(Clause::Offset, |f| {
            fmt!(f, " OFFSET " offset);
            Ok(())
        })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TOP and row-numbering emulations
// ---------------------------------------------------------------------------

fn render_top(spec: &QuerySpec, f: &mut Formatter<'_>) -> Result<()> {
    let fetch_clause_type = spec.fetch_clause_type;

    match (&spec.offset, &spec.fetch) {
        (None, Some(fetch)) => render_spec_body(
            spec,
            f,
            BodyOpts {
                top: Some(TopHead {
                    limit: LimitExpr::Expr(fetch),
                    percent: fetch_clause_type.is_percent(),
                    with_ties: fetch_clause_type.with_ties(),
                }),
                ..Default::default()
            },
        ),
        (Some(offset), fetch) => {
            if fetch_clause_type.is_percent() {
                return Err(Error::unsupported_construct(
                    "PERCENT fetch cannot be combined with an offset",
                ));
            }

            // The fetch count is rewritten to `fetch + offset`; the skip
            // happens in the row-numbering wrapper.
            let top = fetch.as_ref().map(|fetch| TopHead {
                limit: LimitExpr::Sum { fetch, offset },
                percent: false,
                with_ties: fetch_clause_type.with_ties(),
            });

            fmt!(f, "SELECT * FROM (");
            render_spec_body(
                spec,
                f,
                BodyOpts {
                    top,
                    window: Some(WindowItems {
                        function: "row_number",
                        sorts: &spec.sorts,
                        with_count: false,
                    }),
                    suppress_sorts: false,
                },
            )?;
            fmt!(f, ") r_ WHERE r_.rn_ > ");
            f.with_clause(Clause::Offset, |f| {
                fmt!(f, offset);
                Ok(())
            })
        }
        (None, None) => render_spec_body(spec, f, BodyOpts::default()),
    }
}

fn render_window_emulation(spec: &QuerySpec, f: &mut Formatter<'_>) -> Result<()> {
    let fetch_clause_type = spec.fetch_clause_type;
    if fetch_clause_type.is_percent() && spec.offset.is_some() {
        return Err(Error::unsupported_construct(
            "PERCENT fetch cannot be combined with an offset",
        ));
    }

    // WITH TIES keeps equal sort keys together, which is exactly rank().
    let function = if fetch_clause_type.with_ties() {
        "rank"
    } else {
        "row_number"
    };

    fmt!(f, "SELECT * FROM (");
    render_spec_body(
        spec,
        f,
        BodyOpts {
            top: None,
            window: Some(WindowItems {
                function,
                sorts: &spec.sorts,
                with_count: fetch_clause_type.is_percent(),
            }),
            suppress_sorts: true,
        },
    )?;
    fmt!(f, ") r_ WHERE ");

    if fetch_clause_type.is_percent() {
        let fetch = spec
            .fetch
            .as_ref()
            .ok_or_else(|| Error::invalid_mapping("PERCENT fetch without a fetch expression"))?;
        return f.with_clause(Clause::Fetch, |f| {
            fmt!(f, "r_.rn_ <= ceiling(r_.cnt_ * " fetch " / 100)");
            Ok(())
        });
    }

    match (&spec.fetch, &spec.offset) {
        (Some(fetch), Some(offset)) => {
            fmt!(f, "r_.rn_ <= ");
            f.with_clause(Clause::Fetch, |f| {
                render_limit_expr(&LimitExpr::Sum { fetch, offset }, f)
            })?;
            fmt!(f, " AND r_.rn_ > ");
            f.with_clause(Clause::Offset, |f| {
                fmt!(f, offset);
                Ok(())
            })
        }
        (Some(fetch), None) => f.with_clause(Clause::Fetch, |f| {
            fmt!(f, "r_.rn_ <= " fetch);
            Ok(())
        }),
        (None, Some(offset)) => f.with_clause(Clause::Offset, |f| {
            fmt!(f, "r_.rn_ > " offset);
            Ok(())
        }),
        (None, None) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// fetch + offset synthesis
// ---------------------------------------------------------------------------

pub(super) fn render_limit_expr(limit: &LimitExpr<'_>, f: &mut Formatter<'_>) -> Result<()> {
    match limit {
        LimitExpr::Expr(expr) => expr.to_sql(f),
        LimitExpr::Sum { fetch, offset } => render_fetch_plus_offset(fetch, offset, f),
    }
}

/// Renders `fetch + offset` as a single count. Two literals fold into one
/// literal; any parameter involvement synthesizes a combined binder that
/// sums the values at bind time.
fn render_fetch_plus_offset(fetch: &Expr, offset: &Expr, f: &mut Formatter<'_>) -> Result<()> {
    if let (Some(fetch), Some(offset)) = (fetch.as_literal(), offset.as_literal()) {
        if let (Some(fetch), Some(offset)) = (fetch.value.as_i64(), offset.value.as_i64()) {
            let sum = fetch + offset;
            fmt!(f, sum);
            return Ok(());
        }
    }

    let fetch = count_value(fetch)?;
    let offset = count_value(offset)?;
    f.bind(ParameterBinder::OffsetPlusFetch { offset, fetch });
    Ok(())
}

fn count_value(expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Literal(literal) => Ok(literal.value.clone()),
        Expr::Parameter(parameter) => Ok(parameter.value.clone()),
        _ => Err(Error::unsupported_construct(
            "fetch and offset expressions must be literals or parameters",
        )),
    }
}
