use loam_core::schema::db::JdbcType;
use loam_core::stmt::{
    ColumnReference, ComparisonOperator, ComparisonPredicate, Expr, FromClause, Junction,
    Literal, Parameter, QuerySpec, Select, SelectClause, SelectItem, Statement, TableGroup,
    TableReference, Value,
};
use loam_core::NavigablePath;
use loam_sql::{Dialect, ParameterBinder, Translator};
use pretty_assertions::assert_eq;

fn column(name: &str) -> Expr {
    ColumnReference::column("t0", name, JdbcType::BigInt).into()
}

fn orders_spec(items: Vec<SelectItem>) -> QuerySpec {
    QuerySpec::new(
        SelectClause {
            distinct: false,
            items,
        },
        FromClause {
            table_groups: vec![TableGroup::new(
                NavigablePath::root("Order"),
                TableReference::new("orders", "t0"),
            )],
        },
    )
}

fn translate(dialect: Dialect, spec: QuerySpec) -> loam_sql::Translation {
    let statement = Statement::from(Select::new(spec));
    Translator::new(dialect).translate(&statement).unwrap()
}

// ---------------------------------------------------------------------------
// Placeholder styles
// ---------------------------------------------------------------------------

#[test]
fn binder_order_matches_placeholder_order() {
    let mut spec = orders_spec(vec![SelectItem::expr(column("id"))]);
    spec.where_clause = Some(
        Junction::conjunction(vec![
            ComparisonPredicate::new(
                column("a"),
                ComparisonOperator::Equal,
                Expr::parameter(1i64),
            )
            .into(),
            ComparisonPredicate::new(
                column("b"),
                ComparisonOperator::Equal,
                Expr::parameter(2i64),
            )
            .into(),
        ])
        .into(),
    );

    let translation = translate(Dialect::ANSI, spec);
    assert_eq!(
        translation.sql,
        "SELECT t0.id FROM orders t0 WHERE t0.a = ? AND t0.b = ?"
    );
    assert_eq!(
        translation.binders,
        vec![
            ParameterBinder::Value(Value::I64(1), None),
            ParameterBinder::Value(Value::I64(2), None),
        ]
    );
}

#[test]
fn numbered_placeholders_count_up() {
    let mut spec = orders_spec(vec![SelectItem::expr(column("id"))]);
    spec.where_clause = Some(
        Junction::conjunction(vec![
            ComparisonPredicate::new(
                column("a"),
                ComparisonOperator::Equal,
                Expr::parameter(1i64),
            )
            .into(),
            ComparisonPredicate::new(
                column("b"),
                ComparisonOperator::Equal,
                Expr::parameter(2i64),
            )
            .into(),
        ])
        .into(),
    );

    let translation = translate(Dialect::POSTGRESQL, spec);
    assert_eq!(
        translation.sql,
        "SELECT t0.id FROM orders t0 WHERE t0.a = $1 AND t0.b = $2"
    );
}

// ---------------------------------------------------------------------------
// Select-clause casting
// ---------------------------------------------------------------------------

#[test]
fn null_literal_in_select_is_always_cast() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::Literal(Literal::null(
        JdbcType::Varchar,
    )))]);
    assert_eq!(
        translate(Dialect::ANSI, spec).sql,
        "SELECT CAST(NULL AS varchar) FROM orders t0"
    );
}

#[test]
fn plain_literal_in_select_is_not_cast_by_default() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::literal(5i64, JdbcType::BigInt))]);
    assert_eq!(translate(Dialect::ANSI, spec).sql, "SELECT 5 FROM orders t0");
}

#[test]
fn literals_are_cast_when_the_dialect_requires_it() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::literal(5i64, JdbcType::BigInt))]);
    assert_eq!(
        translate(Dialect::SQLSERVER, spec).sql,
        "SELECT CAST(5 AS bigint) FROM orders t0"
    );
}

#[test]
fn typed_parameter_in_select_is_cast_when_required() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::Parameter(Parameter::typed(
        5i64,
        JdbcType::BigInt,
    )))]);

    let translation = translate(Dialect::SQLSERVER, spec);
    assert_eq!(
        translation.sql,
        "SELECT CAST(? AS bigint) FROM orders t0"
    );
    assert_eq!(
        translation.binders,
        vec![ParameterBinder::Value(Value::I64(5), Some(JdbcType::BigInt))]
    );
}

#[test]
fn untyped_parameter_in_select_stays_uncast() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::parameter(5i64))]);
    assert_eq!(
        translate(Dialect::SQLSERVER, spec).sql,
        "SELECT ? FROM orders t0"
    );
}

#[test]
fn mysql_uses_its_own_cast_vocabulary() {
    let spec = orders_spec(vec![SelectItem::expr(Expr::Literal(Literal::null(
        JdbcType::Timestamp,
    )))]);
    assert_eq!(
        translate(Dialect::MYSQL, spec).sql,
        "SELECT CAST(NULL AS datetime) FROM orders t0"
    );
}

#[test]
fn parameter_outside_select_is_never_cast() {
    let mut spec = orders_spec(vec![SelectItem::expr(column("id"))]);
    spec.where_clause = Some(
        ComparisonPredicate::new(
            column("id"),
            ComparisonOperator::Equal,
            Expr::Parameter(Parameter::typed(5i64, JdbcType::BigInt)),
        )
        .into(),
    );
    assert_eq!(
        translate(Dialect::SQLSERVER, spec).sql,
        "SELECT t0.id FROM orders t0 WHERE t0.id = ?"
    );
}

// ---------------------------------------------------------------------------
// Combined offset + fetch binder
// ---------------------------------------------------------------------------

#[test]
fn offset_plus_fetch_binds_the_sum() {
    let binder = ParameterBinder::OffsetPlusFetch {
        offset: Value::I64(5),
        fetch: Value::I64(10),
    };
    assert_eq!(binder.bind_value().unwrap(), Value::I64(15));
    assert_eq!(binder.jdbc_type(), Some(JdbcType::BigInt));
}

#[test]
fn offset_plus_fetch_rejects_non_integer_values() {
    let binder = ParameterBinder::OffsetPlusFetch {
        offset: Value::String("five".to_string()),
        fetch: Value::I64(10),
    };
    assert!(binder.bind_value().unwrap_err().is_invalid_mapping());
}
