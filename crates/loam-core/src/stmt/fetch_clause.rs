/// The declared semantics of a FETCH clause.
///
/// The tree records the requested type; which syntax (or emulation) is used
/// to honor it is decided per dialect by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchClauseType {
    #[default]
    RowsOnly,
    RowsWithTies,
    Percent,
    PercentWithTies,
}

impl FetchClauseType {
    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent | Self::PercentWithTies)
    }

    pub fn with_ties(&self) -> bool {
        matches!(self, Self::RowsWithTies | Self::PercentWithTies)
    }
}
