#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

// Fragment renderers
mod cte;
mod expr;
mod pagination;
mod predicate;
mod query;
mod statement;

use crate::dialect::{Dialect, PlaceholderStyle};
use crate::params::ParameterBinder;

use loam_core::schema::db::Schema;
use loam_core::stmt::Statement;
use loam_core::Result;

/// Renders a statement tree to SQL text for one dialect.
///
/// The translator itself is stateless across calls; all walker state lives
/// in the per-call [`Formatter`] and is dropped when `translate` returns.
#[derive(Debug)]
pub struct Translator<'a> {
    /// Physical schema, when available for validation lookups.
    schema: Option<&'a Schema>,

    dialect: Dialect,
}

/// The product of one translation.
#[derive(Debug)]
pub struct Translation {
    pub sql: String,

    /// Bind parameters, in placeholder order.
    pub binders: Vec<ParameterBinder>,

    /// Tables written by the statement, in first-reference order.
    pub affected_tables: Vec<String>,
}

/// The clause currently being rendered. Pushed and popped symmetrically;
/// rendering decisions (qualification, casting) inspect the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Offset,
    Fetch,
    Set,
    Values,
    Returning,
    Over,
}

pub(crate) struct Formatter<'a> {
    /// Handle to the translator
    translator: &'a Translator<'a>,

    /// Where the SQL text is written
    dst: &'a mut String,

    /// Captured binders, in first-occurrence order
    binders: &'a mut Vec<ParameterBinder>,

    /// Tables written by the statement, first-reference order, deduped
    affected_tables: &'a mut Vec<String>,

    /// Clause stack; the top is the clause being rendered
    clauses: Vec<Clause>,

    /// Query nesting depth, for subquery parenthesization decisions
    depth: usize,

    /// The identification variable of the DML target, when rendering an
    /// UPDATE or DELETE. Column references under this qualifier render
    /// unqualified.
    dml_target_alias: Option<String>,
}

impl<'a> Translator<'a> {
    pub fn new(dialect: Dialect) -> Translator<'static> {
        Translator {
            schema: None,
            dialect,
        }
    }

    pub fn with_schema(schema: &'a Schema, dialect: Dialect) -> Translator<'a> {
        Translator {
            schema: Some(schema),
            dialect,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema
    }

    pub fn translate(&self, statement: &Statement) -> Result<Translation> {
        let mut sql = String::new();
        let mut binders = vec![];
        let mut affected_tables = vec![];

        let mut fmt = Formatter {
            translator: self,
            dst: &mut sql,
            binders: &mut binders,
            affected_tables: &mut affected_tables,
            clauses: vec![],
            depth: 0,
            dml_target_alias: None,
        };

        statement.to_sql(&mut fmt)?;

        tracing::debug!(
            sql = %sql,
            binders = binders.len(),
            "translated statement"
        );

        Ok(Translation {
            sql,
            binders,
            affected_tables,
        })
    }
}

impl Formatter<'_> {
    fn dialect(&self) -> &Dialect {
        &self.translator.dialect
    }

    fn current_clause(&self) -> Option<Clause> {
        self.clauses.last().copied()
    }

    fn in_select_clause(&self) -> bool {
        self.current_clause() == Some(Clause::Select)
    }

    /// Renders `fragment` with `clause` on top of the stack.
    fn with_clause(
        &mut self,
        clause: Clause,
        fragment: impl FnOnce(&mut Formatter<'_>) -> Result<()>,
    ) -> Result<()> {
        self.clauses.push(clause);
        let result = fragment(self);
        self.clauses.pop();
        result
    }

    /// Captures a binder and writes its placeholder.
    fn bind(&mut self, binder: ParameterBinder) {
        self.binders.push(binder);
        match self.dialect().placeholder {
            PlaceholderStyle::Positional => self.dst.push('?'),
            PlaceholderStyle::Numbered => {
                self.dst.push('$');
                self.dst.push_str(&self.binders.len().to_string());
            }
        }
    }

    fn mark_affected(&mut self, table: &str) {
        if !self.affected_tables.iter().any(|t| t == table) {
            self.affected_tables.push(table.to_string());
        }
    }
}
