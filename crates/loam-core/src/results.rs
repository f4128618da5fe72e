use crate::stmt::{ColumnReference, TableGroup, TableReference};
use crate::{NavigablePath, Result};

use indexmap::IndexMap;

/// When a fetched association is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTiming {
    /// Read from the current result set row.
    Immediate,

    /// Loaded on demand after the owning result is materialized.
    Delayed,
}

/// A top-level (non-fetch) selection of one model part.
#[derive(Debug, Clone)]
pub struct DomainResult {
    pub path: NavigablePath,
    pub result_variable: Option<String>,

    /// Value positions within the JDBC row, in the part's selectable order.
    pub selections: Vec<ResultSelection>,
}

/// A fetched sub-part hanging off a parent result or fetch.
#[derive(Debug, Clone)]
pub struct Fetch {
    pub fetched_path: NavigablePath,
    pub timing: FetchTiming,

    /// Whether the fetched columns participate in the select list. A
    /// delayed fetch may still be "selected" when its key columns ride
    /// along for later loading.
    pub selected: bool,

    pub selections: Vec<ResultSelection>,
}

/// One resolved position in the JDBC result row.
#[derive(Debug, Clone)]
pub struct ResultSelection {
    /// Zero-based values-array position. Identical expressions share a
    /// position; distinct expressions get first-use-ordered positions.
    pub position: usize,

    pub expression: ColumnReference,
}

/// Per-translation state threaded through domain-result and fetch creation.
///
/// This is the controlled side channel model parts may write to while
/// `generate_fetch` stays pure with respect to the parts themselves: table
/// groups land in the from-clause registry, selections in the resolver.
#[derive(Default)]
pub struct DomainResultCreationState {
    from_clause: FromClauseAccess,
    selections: SelectionResolver,
}

impl DomainResultCreationState {
    pub fn new() -> DomainResultCreationState {
        DomainResultCreationState::default()
    }

    pub fn from_clause(&mut self) -> &mut FromClauseAccess {
        &mut self.from_clause
    }

    pub fn from_clause_ref(&self) -> &FromClauseAccess {
        &self.from_clause
    }

    /// Resolves a selection position for the expression, reusing the
    /// position if the same (qualifier, expression) pair was already
    /// selected.
    pub fn resolve_selection(&mut self, expression: ColumnReference) -> ResultSelection {
        let position = self.selections.resolve(&expression);
        ResultSelection {
            position,
            expression,
        }
    }

    pub fn selection_count(&self) -> usize {
        self.selections.resolved.len()
    }
}

/// Registry of table groups keyed by navigable path.
///
/// Registration order is preserved; the renderer walks groups in first-use
/// order, which keeps join ordering stable across translations of the same
/// statement.
#[derive(Default)]
pub struct FromClauseAccess {
    table_groups: IndexMap<NavigablePath, TableGroup>,
    alias_counter: usize,
}

impl FromClauseAccess {
    pub fn find_table_group(&self, path: &NavigablePath) -> Option<&TableGroup> {
        self.table_groups.get(path)
    }

    /// Returns the table group registered for `path`, or registers the one
    /// produced by `create`.
    pub fn resolve_table_group(
        &mut self,
        path: &NavigablePath,
        create: impl FnOnce(&mut FromClauseAccess) -> Result<TableGroup>,
    ) -> Result<&TableGroup> {
        if !self.table_groups.contains_key(path) {
            let group = create(self)?;
            self.table_groups.insert(path.clone(), group);
        }
        Ok(&self.table_groups[path])
    }

    pub fn register_table_group(&mut self, group: TableGroup) {
        self.table_groups.insert(group.path.clone(), group);
    }

    /// Generates the next identification variable (`t0`, `t1`, ...).
    pub fn generate_identification_variable(&mut self) -> String {
        let alias = format!("t{}", self.alias_counter);
        self.alias_counter += 1;
        alias
    }

    pub fn new_table_reference(&mut self, table_expression: impl Into<String>) -> TableReference {
        let alias = self.generate_identification_variable();
        TableReference::new(table_expression, alias)
    }

    pub fn table_groups(&self) -> impl Iterator<Item = &TableGroup> {
        self.table_groups.values()
    }
}

#[derive(Default)]
struct SelectionResolver {
    resolved: IndexMap<(String, String), usize>,
}

impl SelectionResolver {
    fn resolve(&mut self, expression: &ColumnReference) -> usize {
        let key = (expression.qualifier.clone(), expression.expression.clone());
        let next = self.resolved.len();
        *self.resolved.entry(key).or_insert(next)
    }
}
