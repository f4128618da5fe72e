use super::{
    BetweenPredicate, ComparisonPredicate, ExistsPredicate, Expr, InListPredicate,
    InSubqueryPredicate, Junction, LikePredicate, NullnessPredicate, QuantifiedComparison,
};

/// A boolean-valued AST node.
#[derive(Debug, Clone)]
pub enum Predicate {
    Comparison(ComparisonPredicate),

    Between(BetweenPredicate),

    InList(InListPredicate),

    InSubquery(InSubqueryPredicate),

    Exists(ExistsPredicate),

    /// AND/OR over sub-predicates. An empty junction renders nothing.
    Junction(Junction),

    /// `NOT (p)`
    Negated(Box<Predicate>),

    /// `expr IS [NOT] NULL`
    Nullness(NullnessPredicate),

    Like(LikePredicate),

    /// Explicit grouping parentheses
    Grouped(Box<Predicate>),

    /// Quantified (ANY/ALL) comparison against a subquery
    Quantified(Box<QuantifiedComparison>),

    /// A raw boolean fragment emitted verbatim
    SelfRendering(String),

    /// An externally supplied filter restriction fragment, appended to the
    /// WHERE clause of the owning table group
    FilterFragment(String),
}

impl Predicate {
    pub fn negate(self) -> Predicate {
        Predicate::Negated(Box::new(self))
    }

    pub fn grouped(self) -> Predicate {
        Predicate::Grouped(Box::new(self))
    }

    /// Returns `true` when the predicate renders no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Junction(junction) => junction.is_empty(),
            Self::Grouped(inner) | Self::Negated(inner) => inner.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(expr: Expr) -> Predicate {
        Predicate::Nullness(NullnessPredicate {
            expr,
            negated: false,
        })
    }

    pub fn is_not_null(expr: Expr) -> Predicate {
        Predicate::Nullness(NullnessPredicate {
            expr,
            negated: true,
        })
    }
}

impl From<ComparisonPredicate> for Predicate {
    fn from(value: ComparisonPredicate) -> Self {
        Self::Comparison(value)
    }
}

impl From<Junction> for Predicate {
    fn from(value: Junction) -> Self {
        Self::Junction(value)
    }
}

impl From<InListPredicate> for Predicate {
    fn from(value: InListPredicate) -> Self {
        Self::InList(value)
    }
}
