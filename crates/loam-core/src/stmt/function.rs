use super::{Expr, SortSpecification};

/// A function call, optionally windowed with an OVER clause.
///
/// The function name is opaque to the walker; the catalog of built-in
/// functions is an external lookup table consulted before the AST is
/// built.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub over: Option<Over>,
}

/// An `OVER (PARTITION BY ... ORDER BY ...)` window.
#[derive(Debug, Clone, Default)]
pub struct Over {
    pub partitions: Vec<Expr>,
    pub sorts: Vec<SortSpecification>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> FunctionCall {
        FunctionCall {
            name: name.into(),
            args,
            over: None,
        }
    }

    pub fn windowed(name: impl Into<String>, args: Vec<Expr>, over: Over) -> FunctionCall {
        FunctionCall {
            name: name.into(),
            args,
            over: Some(over),
        }
    }
}
