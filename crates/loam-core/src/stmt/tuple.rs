use super::Expr;

/// A row-value constructor `(a, b, ...)`.
///
/// Whether this renders as native row-value syntax or as an emulated
/// boolean expansion is decided by the walker against the dialect, never
/// here.
#[derive(Debug, Clone)]
pub struct SqlTuple {
    pub exprs: Vec<Expr>,
}

impl SqlTuple {
    pub fn new(exprs: Vec<Expr>) -> SqlTuple {
        SqlTuple { exprs }
    }
}

impl FromIterator<Expr> for SqlTuple {
    fn from_iter<T: IntoIterator<Item = Expr>>(iter: T) -> Self {
        SqlTuple {
            exprs: iter.into_iter().collect(),
        }
    }
}
