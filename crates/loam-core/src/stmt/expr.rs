use super::{
    CaseSearched, ColumnReference, ExprArith, FunctionCall, Literal, Parameter, QueryPart,
    SqlTuple,
};

/// An SQL expression.
///
/// A closed sum type: the walker matches exhaustively, so adding a variant
/// is a compile-time error at every render site rather than a silent
/// default.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Reference to a column or read formula
    ColumnReference(ColumnReference),

    /// A typed literal
    Literal(Literal),

    /// A bind parameter
    Parameter(Parameter),

    /// A row-value constructor `(a, b, ...)`
    Tuple(SqlTuple),

    /// A searched CASE expression
    Case(Box<CaseSearched>),

    /// A function call, possibly windowed
    Function(FunctionCall),

    /// Binary arithmetic, used e.g. for synthesized `fetch + offset`
    Arith(Box<ExprArith>),

    /// A scalar subquery
    Subquery(Box<QueryPart>),

    /// A raw fragment emitted verbatim
    SelfRendering(String),
}

impl Expr {
    pub fn literal(value: impl Into<super::Value>, jdbc_type: crate::schema::db::JdbcType) -> Expr {
        Expr::Literal(Literal::new(value, jdbc_type))
    }

    pub fn parameter(value: impl Into<super::Value>) -> Expr {
        Expr::Parameter(Parameter::new(value))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&SqlTuple> {
        match self {
            Self::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// The tuple arity of the expression: tuples report their field count,
    /// every other expression is a scalar of arity one.
    pub fn arity(&self) -> usize {
        match self {
            Self::Tuple(tuple) => tuple.exprs.len(),
            _ => 1,
        }
    }
}

impl From<ColumnReference> for Expr {
    fn from(value: ColumnReference) -> Self {
        Self::ColumnReference(value)
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<Parameter> for Expr {
    fn from(value: Parameter) -> Self {
        Self::Parameter(value)
    }
}

impl From<SqlTuple> for Expr {
    fn from(value: SqlTuple) -> Self {
        Self::Tuple(value)
    }
}

impl From<FunctionCall> for Expr {
    fn from(value: FunctionCall) -> Self {
        Self::Function(value)
    }
}
