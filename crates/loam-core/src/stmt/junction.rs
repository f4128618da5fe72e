use super::Predicate;

/// AND/OR over a list of sub-predicates.
///
/// The empty junction is the normalized form of "no predicate": it renders
/// nothing rather than a vacuous boolean literal, so empty parentheses can
/// never reach the SQL text.
#[derive(Debug, Clone)]
pub struct Junction {
    pub nature: JunctionNature,
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionNature {
    Conjunction,
    Disjunction,
}

impl Junction {
    pub fn conjunction(predicates: Vec<Predicate>) -> Junction {
        Junction {
            nature: JunctionNature::Conjunction,
            predicates,
        }
    }

    pub fn disjunction(predicates: Vec<Predicate>) -> Junction {
        Junction {
            nature: JunctionNature::Disjunction,
            predicates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.iter().all(|p| p.is_empty())
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }
}

impl JunctionNature {
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Conjunction => " AND ",
            Self::Disjunction => " OR ",
        }
    }
}
