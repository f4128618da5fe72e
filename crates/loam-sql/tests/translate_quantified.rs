use loam_core::schema::db::JdbcType;
use loam_core::stmt::{
    ColumnReference, ComparisonOperator, ComparisonPredicate, Expr, FromClause, Predicate,
    QuantifiedComparison, Quantifier, QuerySpec, Select, SelectClause, SelectItem, SqlTuple,
    Statement, TableGroup, TableReference,
};
use loam_core::NavigablePath;
use loam_sql::{Dialect, Translator};
use pretty_assertions::assert_eq;

fn column(qualifier: &str, name: &str) -> Expr {
    ColumnReference::column(qualifier, name, JdbcType::BigInt).into()
}

fn tuple(exprs: Vec<Expr>) -> Expr {
    SqlTuple::new(exprs).into()
}

fn lines_spec(items: Vec<SelectItem>) -> QuerySpec {
    QuerySpec::new(
        SelectClause {
            distinct: false,
            items,
        },
        FromClause {
            table_groups: vec![TableGroup::new(
                NavigablePath::root("OrderLine"),
                TableReference::new("order_lines", "t1"),
            )],
        },
    )
}

fn pair_subquery() -> QuerySpec {
    lines_spec(vec![
        SelectItem::expr(column("t1", "a")),
        SelectItem::expr(column("t1", "b")),
    ])
}

fn quantified(
    lhs: Expr,
    op: ComparisonOperator,
    quantifier: Quantifier,
    subquery: QuerySpec,
) -> Predicate {
    Predicate::Quantified(Box::new(QuantifiedComparison {
        lhs,
        op,
        quantifier,
        subquery: subquery.into(),
    }))
}

fn where_clause(dialect: Dialect, predicate: Predicate) -> String {
    let mut spec = QuerySpec::new(
        SelectClause {
            distinct: false,
            items: vec![SelectItem::expr(column("t0", "id"))],
        },
        FromClause {
            table_groups: vec![TableGroup::new(
                NavigablePath::root("Order"),
                TableReference::new("orders", "t0"),
            )],
        },
    );
    spec.where_clause = Some(predicate);
    let statement = Statement::from(Select::new(spec));
    let sql = Translator::new(dialect).translate(&statement).unwrap().sql;
    sql.split_once(" WHERE ").map(|(_, t)| t.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Native rendering
// ---------------------------------------------------------------------------

#[test]
fn scalar_quantified_is_always_native() {
    let predicate = quantified(
        column("t0", "a"),
        ComparisonOperator::GreaterThan,
        Quantifier::All,
        lines_spec(vec![SelectItem::expr(column("t1", "a"))]),
    );
    assert_eq!(
        where_clause(Dialect::SQLSERVER, predicate),
        "t0.a > ALL (SELECT t1.a FROM order_lines t1)"
    );
}

#[test]
fn row_value_quantified_renders_natively_when_supported() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::Equal,
        Quantifier::Any,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::ANSI, predicate),
        "(t0.a, t0.b) = ANY (SELECT t1.a, t1.b FROM order_lines t1)"
    );
}

// ---------------------------------------------------------------------------
// EXISTS emulation for equality quantifiers
// ---------------------------------------------------------------------------

#[test]
fn eq_any_becomes_exists() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::Equal,
        Quantifier::Any,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "EXISTS (SELECT t1.a, t1.b FROM order_lines t1 WHERE t1.a = t0.a AND t1.b = t0.b)"
    );
}

#[test]
fn eq_all_becomes_not_exists_of_counterexample() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::Equal,
        Quantifier::All,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "NOT EXISTS (SELECT t1.a, t1.b FROM order_lines t1 \
         WHERE (t1.a <> t0.a OR t1.b <> t0.b))"
    );
}

#[test]
fn ne_any_becomes_exists_of_difference() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::NotEqual,
        Quantifier::Any,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "EXISTS (SELECT t1.a, t1.b FROM order_lines t1 \
         WHERE (t1.a <> t0.a OR t1.b <> t0.b))"
    );
}

#[test]
fn exists_emulation_conjoins_existing_where() {
    let mut subquery = pair_subquery();
    subquery.where_clause = Some(
        ComparisonPredicate::new(
            column("t1", "qty"),
            ComparisonOperator::GreaterThan,
            Expr::literal(0i64, JdbcType::BigInt),
        )
        .into(),
    );
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::Equal,
        Quantifier::Any,
        subquery,
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "EXISTS (SELECT t1.a, t1.b FROM order_lines t1 \
         WHERE t1.qty > 0 AND (t1.a = t0.a AND t1.b = t0.b))"
    );
}

#[test]
fn exists_emulation_checks_select_list_arity() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::Equal,
        Quantifier::Any,
        lines_spec(vec![SelectItem::expr(column("t1", "a"))]),
    );
    let mut spec = QuerySpec::new(
        SelectClause {
            distinct: false,
            items: vec![SelectItem::expr(column("t0", "id"))],
        },
        FromClause {
            table_groups: vec![TableGroup::new(
                NavigablePath::root("Order"),
                TableReference::new("orders", "t0"),
            )],
        },
    );
    spec.where_clause = Some(predicate);
    let statement = Statement::from(Select::new(spec));

    let err = Translator::new(Dialect::POSTGRESQL)
        .translate(&statement)
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

// ---------------------------------------------------------------------------
// Extremal-row emulation for ordering quantifiers
// ---------------------------------------------------------------------------

#[test]
fn gt_all_compares_against_the_maximum_row() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::GreaterThan,
        Quantifier::All,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "(t0.a, t0.b) > (SELECT t1.a, t1.b FROM order_lines t1 \
         ORDER BY t1.a DESC, t1.b DESC FETCH FIRST 1 ROWS ONLY)"
    );
}

#[test]
fn ge_any_compares_against_the_minimum_row() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::GreaterThanOrEqual,
        Quantifier::Any,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "(t0.a, t0.b) >= (SELECT t1.a, t1.b FROM order_lines t1 \
         ORDER BY t1.a, t1.b FETCH FIRST 1 ROWS ONLY)"
    );
}

#[test]
fn lt_any_compares_against_the_maximum_row() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::LessThan,
        Quantifier::Any,
        pair_subquery(),
    );
    assert_eq!(
        where_clause(Dialect::POSTGRESQL, predicate),
        "(t0.a, t0.b) < (SELECT t1.a, t1.b FROM order_lines t1 \
         ORDER BY t1.a DESC, t1.b DESC FETCH FIRST 1 ROWS ONLY)"
    );
}

#[test]
fn ordering_quantifier_rejected_without_row_values() {
    let predicate = quantified(
        tuple(vec![column("t0", "a"), column("t0", "b")]),
        ComparisonOperator::GreaterThan,
        Quantifier::All,
        pair_subquery(),
    );
    let mut spec = QuerySpec::new(
        SelectClause {
            distinct: false,
            items: vec![SelectItem::expr(column("t0", "id"))],
        },
        FromClause {
            table_groups: vec![TableGroup::new(
                NavigablePath::root("Order"),
                TableReference::new("orders", "t0"),
            )],
        },
    );
    spec.where_clause = Some(predicate);
    let statement = Statement::from(Select::new(spec));

    let err = Translator::new(Dialect::SQLSERVER)
        .translate(&statement)
        .unwrap_err();
    assert!(err.is_unsupported_construct());
}
