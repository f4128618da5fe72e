use super::{Clause, Comma, Formatter, ToSql};

use loam_core::stmt::{
    ComparisonOperator, ComparisonPredicate, Expr, InListPredicate, InSubqueryPredicate,
    Junction, Literal, Predicate, QuantifiedComparison, Quantifier, QueryPart,
    SortDirection, SortSpecification,
};
use loam_core::schema::db::JdbcType;
use loam_core::{Error, Result};

impl ToSql for &Predicate {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Predicate::Comparison(comparison) => render_comparison(comparison, f),
            Predicate::Between(between) => {
                let not = if between.negated { " NOT" } else { "" };
                fmt!(f, between.expr not " BETWEEN " between.lower " AND " between.upper);
                Ok(())
            }
            Predicate::InList(in_list) => render_in_list(in_list, f),
            Predicate::InSubquery(in_subquery) => render_in_subquery(in_subquery, f),
            Predicate::Exists(exists) => {
                let not = if exists.negated { "NOT " } else { "" };
                let subquery = &*exists.subquery;
                f.depth += 1;
                let result = (|f: &mut Formatter<'_>| {
                    fmt!(f, not "EXISTS (" subquery ")");
                    Ok(())
                })(f);
                f.depth -= 1;
                result
            }
            Predicate::Junction(junction) => render_junction(junction, f),
            Predicate::Negated(inner) => {
                if inner.is_empty() {
                    return Ok(());
                }
                let inner = &**inner;
                fmt!(f, "NOT (" inner ")");
                Ok(())
            }
            Predicate::Nullness(nullness) => {
                let tail = if nullness.negated {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                };
                fmt!(f, nullness.expr tail);
                Ok(())
            }
            Predicate::Like(like) => {
                let not = if like.negated { " NOT" } else { "" };
                fmt!(f, like.expr not " LIKE " like.pattern);
                if let Some(escape) = like.escape {
                    let escape = escape.to_string();
                    fmt!(f, " ESCAPE '" escape "'");
                }
                Ok(())
            }
            Predicate::Grouped(inner) => {
                if inner.is_empty() {
                    return Ok(());
                }
                let inner = &**inner;
                fmt!(f, "(" inner ")");
                Ok(())
            }
            Predicate::Quantified(quantified) => render_quantified(quantified, f),
            Predicate::SelfRendering(text) | Predicate::FilterFragment(text) => {
                f.dst.push_str(text);
                Ok(())
            }
        }
    }
}

fn render_junction(junction: &Junction, f: &mut Formatter<'_>) -> Result<()> {
    let non_empty: Vec<&Predicate> = junction
        .predicates
        .iter()
        .filter(|p| !p.is_empty())
        .collect();

    // The empty junction renders nothing at all.
    let mut separator = "";
    for predicate in non_empty {
        fmt!(f, separator);

        // A nested multi-element junction needs parentheses to keep its
        // grouping against this junction's separator.
        let nested_multi = matches!(
            predicate,
            Predicate::Junction(j) if j.predicates.iter().filter(|p| !p.is_empty()).count() > 1
        );
        if nested_multi {
            fmt!(f, "(" predicate ")");
        } else {
            fmt!(f, predicate);
        }
        separator = junction.nature.separator();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Comparisons, including tuple emulation
// ---------------------------------------------------------------------------

fn render_comparison(comparison: &ComparisonPredicate, f: &mut Formatter<'_>) -> Result<()> {
    let op = comparison.op;

    if let Some(lhs) = comparison.lhs.as_tuple() {
        if lhs.exprs.len() > 1 {
            if let Some(rhs) = comparison.rhs.as_tuple() {
                if lhs.exprs.len() != rhs.exprs.len() {
                    return Err(Error::invalid_mapping(format!(
                        "tuple comparison arity mismatch: {} vs {}",
                        lhs.exprs.len(),
                        rhs.exprs.len()
                    )));
                }

                if !f.dialect().row_value.constructor {
                    let emulated = emulate_tuple_comparison(
                        &lhs.exprs,
                        &rhs.exprs,
                        op,
                        f.current_clause() == Some(Clause::Where),
                    );
                    return emulated.to_sql(f);
                }
            } else if !f.dialect().row_value.constructor {
                // Tuple against a subquery row cannot be decomposed.
                return Err(Error::unsupported_construct(
                    "dialect does not support row-value comparisons against subqueries",
                ));
            }
        }
    }

    let op = op.as_str();
    fmt!(f, comparison.lhs " " op " " comparison.rhs);
    Ok(())
}

/// Expands a tuple comparison into scalar comparisons.
///
/// Equality operators expand to per-column AND/OR chains. Ordering
/// operators expand lexicographically; in WHERE position the sargable form
/// is used so the leading column stays an index range
/// (`a >= 1 AND NOT (a = 1 AND b <= 2)` for `(a, b) > (1, 2)`).
fn emulate_tuple_comparison(
    lhs: &[Expr],
    rhs: &[Expr],
    op: ComparisonOperator,
    sargable: bool,
) -> Predicate {
    match op {
        ComparisonOperator::Equal => Junction::conjunction(column_comparisons(lhs, rhs, op))
            .into_predicate()
            .grouped(),
        ComparisonOperator::NotEqual => Junction::disjunction(column_comparisons(lhs, rhs, op))
            .into_predicate()
            .grouped(),
        _ if sargable => sargable_ordering(lhs, rhs, op),
        _ => lexicographic_ordering(lhs, rhs, op),
    }
}

fn column_comparisons(lhs: &[Expr], rhs: &[Expr], op: ComparisonOperator) -> Vec<Predicate> {
    lhs.iter()
        .zip(rhs)
        .map(|(l, r)| ComparisonPredicate::new(l.clone(), op, r.clone()).into())
        .collect()
}

/// `(x1, x2) op (y1, y2)` as
/// `(x1 op' y1 OR (x1 = y1 AND x2 op y2))`, `op'` being the strict form.
fn lexicographic_ordering(lhs: &[Expr], rhs: &[Expr], op: ComparisonOperator) -> Predicate {
    if lhs.len() == 1 {
        return ComparisonPredicate::new(lhs[0].clone(), op, rhs[0].clone()).into();
    }

    let head = ComparisonPredicate::new(lhs[0].clone(), op.sharpen(), rhs[0].clone());
    let tie = ComparisonPredicate::new(lhs[0].clone(), ComparisonOperator::Equal, rhs[0].clone());
    let rest = lexicographic_ordering(&lhs[1..], &rhs[1..], op);

    Junction::disjunction(vec![
        head.into(),
        Junction::conjunction(vec![tie.into(), rest]).into_predicate(),
    ])
    .into_predicate()
    .grouped()
}

/// The index-friendly form: the leading column is compared with the
/// inclusive operator, the excluded boundary is carved out with NOT.
fn sargable_ordering(lhs: &[Expr], rhs: &[Expr], op: ComparisonOperator) -> Predicate {
    if lhs.len() == 1 {
        return ComparisonPredicate::new(lhs[0].clone(), op, rhs[0].clone()).into();
    }

    let head = ComparisonPredicate::new(lhs[0].clone(), widen(op), rhs[0].clone());
    let tie = ComparisonPredicate::new(lhs[0].clone(), ComparisonOperator::Equal, rhs[0].clone());
    let excluded = sargable_ordering(&lhs[1..], &rhs[1..], op.negate());

    Junction::conjunction(vec![
        head.into(),
        Junction::conjunction(vec![tie.into(), excluded])
            .into_predicate()
            .negate(),
    ])
    .into_predicate()
}

fn widen(op: ComparisonOperator) -> ComparisonOperator {
    match op {
        ComparisonOperator::LessThan => ComparisonOperator::LessThanOrEqual,
        ComparisonOperator::GreaterThan => ComparisonOperator::GreaterThanOrEqual,
        other => other,
    }
}

trait IntoPredicate {
    fn into_predicate(self) -> Predicate;
}

impl IntoPredicate for Junction {
    fn into_predicate(self) -> Predicate {
        Predicate::Junction(self)
    }
}

// ---------------------------------------------------------------------------
// IN predicates
// ---------------------------------------------------------------------------

fn render_in_list(in_list: &InListPredicate, f: &mut Formatter<'_>) -> Result<()> {
    if in_list.list.is_empty() {
        // An empty IN list is a constant; never emit `IN ()`.
        let constant = if in_list.negated { "1 = 1" } else { "1 = 0" };
        fmt!(f, constant);
        return Ok(());
    }

    if let Some(tuple) = in_list.expr.as_tuple() {
        match tuple.exprs.len() {
            0 => {
                return Err(Error::invalid_mapping("IN predicate over an empty tuple"));
            }
            1 => {
                // Arity 1 degrades to a scalar IN list.
                let scalars: Vec<&Expr> = in_list
                    .list
                    .iter()
                    .map(|e| match e.as_tuple() {
                        Some(t) if t.exprs.len() == 1 => &t.exprs[0],
                        _ => e,
                    })
                    .collect();
                let not = if in_list.negated { " NOT" } else { "" };
                let list = Comma(scalars);
                fmt!(f, tuple.exprs[0] not " IN (" list ")");
                return Ok(());
            }
            arity => {
                for element in &in_list.list {
                    if element.arity() != arity {
                        return Err(Error::invalid_mapping(
                            "IN list element arity does not match the tested tuple",
                        ));
                    }
                }

                if f.dialect().row_value.in_list {
                    // Native row-value IN list.
                } else if f.dialect().row_value.in_subquery {
                    return render_tuple_in_list_as_union(in_list, f);
                } else {
                    return render_tuple_in_list_emulated(in_list, f);
                }
            }
        }
    }

    let not = if in_list.negated { " NOT" } else { "" };
    let list = Comma(&in_list.list);
    fmt!(f, in_list.expr not " IN (" list ")");
    Ok(())
}

/// `(a, b) IN ((1, 2), (3, 4))` as
/// `(a, b) IN (SELECT 1, 2 UNION ALL SELECT 3, 4)`.
fn render_tuple_in_list_as_union(in_list: &InListPredicate, f: &mut Formatter<'_>) -> Result<()> {
    let not = if in_list.negated { " NOT" } else { "" };
    fmt!(f, in_list.expr not " IN (");

    let mut separator = "";
    for element in &in_list.list {
        fmt!(f, separator "SELECT ");
        match element.as_tuple() {
            Some(row) => {
                let fields = Comma(&row.exprs);
                fmt!(f, fields);
            }
            None => fmt!(f, element),
        }
        separator = " UNION ALL ";
    }

    fmt!(f, ")");
    Ok(())
}

/// OR-chained per-row equality emulation.
fn render_tuple_in_list_emulated(in_list: &InListPredicate, f: &mut Formatter<'_>) -> Result<()> {
    let lhs = match in_list.expr.as_tuple() {
        Some(t) => &t.exprs,
        None => {
            return Err(Error::invalid_mapping(
                "emulated tuple IN list over a non-tuple expression",
            ))
        }
    };

    let rows: Vec<Predicate> = in_list
        .list
        .iter()
        .map(|element| match element.as_tuple() {
            Some(row) => Ok(Junction::conjunction(column_comparisons(
                lhs,
                &row.exprs,
                ComparisonOperator::Equal,
            ))
            .into_predicate()),
            None => Err(Error::invalid_mapping(
                "emulated tuple IN list element is not a tuple",
            )),
        })
        .collect::<Result<_>>()?;

    let disjunction = Junction::disjunction(rows).into_predicate();
    let predicate = if in_list.negated {
        disjunction.negate()
    } else {
        disjunction.grouped()
    };
    predicate.to_sql(f)
}

fn render_in_subquery(in_subquery: &InSubqueryPredicate, f: &mut Formatter<'_>) -> Result<()> {
    if in_subquery.expr.arity() > 1 && !f.dialect().row_value.in_subquery {
        return Err(Error::unsupported_construct(
            "dialect does not support row-value IN subqueries",
        ));
    }

    let not = if in_subquery.negated { " NOT" } else { "" };
    let subquery = &*in_subquery.subquery;
    f.depth += 1;
    let result = (|f: &mut Formatter<'_>| {
        fmt!(f, in_subquery.expr not " IN (" subquery ")");
        Ok(())
    })(f);
    f.depth -= 1;
    result
}

// ---------------------------------------------------------------------------
// Quantified comparisons
// ---------------------------------------------------------------------------

fn render_quantified(quantified: &QuantifiedComparison, f: &mut Formatter<'_>) -> Result<()> {
    let arity = quantified.lhs.arity();

    if arity == 1 || f.dialect().row_value.quantified {
        let op = quantified.op.as_str();
        let quantifier = quantified.quantifier.as_str();
        f.depth += 1;
        let result = (|f: &mut Formatter<'_>| {
            fmt!(f, quantified.lhs " " op " " quantifier " (" quantified.subquery ")");
            Ok(())
        })(f);
        f.depth -= 1;
        return result;
    }

    if quantified.op.is_equality() {
        return render_quantified_as_exists(quantified, f);
    }

    if f.dialect().row_value.constructor {
        return render_quantified_as_extremal_row(quantified, f);
    }

    Err(Error::unsupported_construct(
        "dialect cannot express a quantified row-value comparison",
    ))
}

/// EQ/NE quantified tuples become EXISTS with the comparison folded into
/// the subquery's WHERE clause. This decomposes to scalar comparisons, so
/// it works without any row-value support.
fn render_quantified_as_exists(
    quantified: &QuantifiedComparison,
    f: &mut Formatter<'_>,
) -> Result<()> {
    let spec = match &quantified.subquery {
        QueryPart::Spec(spec) => spec,
        QueryPart::Group(_) => {
            return Err(Error::unsupported_construct(
                "quantified comparison against a set-operation subquery",
            ))
        }
    };

    let lhs = match quantified.lhs.as_tuple() {
        Some(t) => &t.exprs,
        None => {
            return Err(Error::invalid_mapping(
                "quantified tuple emulation over a non-tuple expression",
            ))
        }
    };
    if spec.select.items.len() != lhs.len() {
        return Err(Error::invalid_mapping(
            "quantified comparison arity does not match the subquery select list",
        ));
    }

    // ANY keeps the operator; ALL holds iff no counterexample row exists.
    let (negated, op) = match (quantified.quantifier, quantified.op) {
        (Quantifier::Any, op) => (false, op),
        (Quantifier::All, op) => (true, op.negate()),
    };

    let comparisons: Vec<Predicate> = spec
        .select
        .items
        .iter()
        .zip(lhs)
        .map(|(item, l)| {
            ComparisonPredicate::new(item.expr.clone(), op, l.clone()).into()
        })
        .collect();
    let comparison = match op {
        ComparisonOperator::Equal => Junction::conjunction(comparisons).into_predicate(),
        _ => Junction::disjunction(comparisons).into_predicate().grouped(),
    };

    let mut inner = spec.clone();
    inner.where_clause = Some(match inner.where_clause.take() {
        Some(existing) => Junction::conjunction(vec![existing, comparison]).into_predicate(),
        None => comparison,
    });

    let not = if negated { "NOT " } else { "" };
    f.depth += 1;
    let result = (|f: &mut Formatter<'_>| {
        let inner = QueryPart::Spec(inner);
        fmt!(f, not "EXISTS (" inner ")");
        Ok(())
    })(f);
    f.depth -= 1;
    result
}

/// Ordering quantifiers on row-value dialects compare against the extremal
/// row: the subquery is sorted towards the bound and limited to one row.
fn render_quantified_as_extremal_row(
    quantified: &QuantifiedComparison,
    f: &mut Formatter<'_>,
) -> Result<()> {
    let spec = match &quantified.subquery {
        QueryPart::Spec(spec) => spec,
        QueryPart::Group(_) => {
            return Err(Error::unsupported_construct(
                "quantified comparison against a set-operation subquery",
            ))
        }
    };

    let towards_max = match (quantified.op, quantified.quantifier) {
        (
            ComparisonOperator::GreaterThan | ComparisonOperator::GreaterThanOrEqual,
            Quantifier::All,
        ) => true,
        (ComparisonOperator::LessThan | ComparisonOperator::LessThanOrEqual, Quantifier::Any) => {
            true
        }
        _ => false,
    };
    let direction = if towards_max {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let mut inner = spec.clone();
    inner.sorts = inner
        .select
        .items
        .iter()
        .map(|item| SortSpecification {
            expr: item.expr.clone(),
            direction,
            null_precedence: Default::default(),
        })
        .collect();
    inner.offset = None;
    inner.fetch = Some(Expr::Literal(Literal::new(1i64, JdbcType::BigInt)));
    inner.fetch_clause_type = Default::default();

    let op = quantified.op.as_str();
    f.depth += 1;
    let result = (|f: &mut Formatter<'_>| {
        let inner = QueryPart::Spec(inner);
        fmt!(f, quantified.lhs " " op " (" inner ")");
        Ok(())
    })(f);
    f.depth -= 1;
    result
}
