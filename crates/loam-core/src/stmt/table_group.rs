use super::Predicate;
use crate::NavigablePath;

/// The FROM-clause join graph rooted at one table reference.
///
/// Table groups are registered under their navigable path during result
/// and fetch creation, so the same path always resolves to the same group
/// (and the same identification variable) within one translation.
#[derive(Debug, Clone)]
pub struct TableGroup {
    pub path: NavigablePath,
    pub primary: TableReference,
    pub joins: Vec<TableGroupJoin>,
}

#[derive(Debug, Clone)]
pub struct TableGroupJoin {
    pub join_type: JoinType,
    pub joined: TableGroup,
    pub predicate: Option<Predicate>,
}

/// A physical table expression plus its identification variable (alias).
#[derive(Debug, Clone, PartialEq)]
pub struct TableReference {
    pub table_expression: String,
    pub identification_variable: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Cross,
}

impl TableGroup {
    pub fn new(path: NavigablePath, primary: TableReference) -> TableGroup {
        TableGroup {
            path,
            primary,
            joins: vec![],
        }
    }

    /// Visits this group's table reference and every joined group's,
    /// depth-first.
    pub fn visit_table_references(&self, f: &mut impl FnMut(&TableReference)) {
        f(&self.primary);
        for join in &self.joins {
            join.joined.visit_table_references(f);
        }
    }
}

impl TableReference {
    pub fn new(
        table_expression: impl Into<String>,
        identification_variable: impl Into<String>,
    ) -> TableReference {
        TableReference {
            table_expression: table_expression.into(),
            identification_variable: identification_variable.into(),
        }
    }
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}
