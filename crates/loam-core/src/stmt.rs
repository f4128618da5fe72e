mod assignment;
pub use assignment::Assignment;

mod between;
pub use between::BetweenPredicate;

mod case;
pub use case::{CaseSearched, CaseWhen};

mod column_reference;
pub use column_reference::ColumnReference;

mod comparison;
pub use comparison::{ComparisonOperator, ComparisonPredicate};

mod cte;
pub use cte::{
    CteContainer, CteStatement, CycleClause, SearchBySpec, SearchClause, SearchKind,
};

mod delete;
pub use delete::Delete;

mod exists;
pub use exists::ExistsPredicate;

mod expr;
pub use expr::Expr;

mod expr_arith;
pub use expr_arith::{ArithmeticOperator, ExprArith};

mod fetch_clause;
pub use fetch_clause::FetchClauseType;

mod function;
pub use function::{FunctionCall, Over};

mod in_list;
pub use in_list::InListPredicate;

mod in_subquery;
pub use in_subquery::InSubqueryPredicate;

mod insert;
pub use insert::{Insert, InsertSource};

mod junction;
pub use junction::{Junction, JunctionNature};

mod like;
pub use like::LikePredicate;

mod literal;
pub use literal::Literal;

mod nullness;
pub use nullness::NullnessPredicate;

mod parameter;
pub use parameter::Parameter;

mod predicate;
pub use predicate::Predicate;

mod quantified;
pub use quantified::{QuantifiedComparison, Quantifier};

mod query_group;
pub use query_group::QueryGroup;

mod query_part;
pub use query_part::QueryPart;

mod query_spec;
pub use query_spec::{FromClause, QuerySpec, SelectClause, SelectItem};

mod select;
pub use select::Select;

mod set_op;
pub use set_op::SetOperator;

mod sort;
pub use sort::{NullPrecedence, SortDirection, SortSpecification};

mod table_group;
pub use table_group::{JoinType, TableGroup, TableGroupJoin, TableReference};

mod tuple;
pub use tuple::SqlTuple;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

use std::fmt;

/// A complete SQL statement, the root of the AST.
///
/// The tree is a closed algebraic representation: it records intent (e.g.
/// "offset/fetch of type ROWS_WITH_TIES") and carries no dialect-specific
/// decisions. Everything dialect-specific happens in the walker at render
/// time. The tree is never mutated during rendering.
#[derive(Clone)]
pub enum Statement {
    /// Query the database
    Select(Select),

    /// Create one or more rows
    Insert(Insert),

    /// Update one or more existing rows
    Update(Update),

    /// Delete one or more existing rows
    Delete(Delete),
}

impl Statement {
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Consumes `self` and returns the inner [`Select`].
    ///
    /// # Panics
    ///
    /// If `self` is not a [`Statement::Select`].
    pub fn unwrap_select(self) -> Select {
        match self {
            Self::Select(select) => select,
            v => panic!("expected `Select`, found {v:#?}"),
        }
    }

    pub fn cte_container(&self) -> Option<&CteContainer> {
        match self {
            Self::Select(stmt) => stmt.with.as_ref(),
            Self::Insert(stmt) => stmt.with.as_ref(),
            Self::Update(stmt) => stmt.with.as_ref(),
            Self::Delete(stmt) => stmt.with.as_ref(),
        }
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(v) => v.fmt(f),
            Self::Insert(v) => v.fmt(f),
            Self::Update(v) => v.fmt(f),
            Self::Delete(v) => v.fmt(f),
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
