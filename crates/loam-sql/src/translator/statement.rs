use super::{Clause, Comma, Formatter, ToSql};

use loam_core::stmt::{
    ColumnReference, CteContainer, Delete, Insert, InsertSource, Predicate, Select, Statement,
    Update,
};
use loam_core::Result;

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Statement::Select(select) => select.to_sql(f),
            Statement::Insert(insert) => insert.to_sql(f),
            Statement::Update(update) => update.to_sql(f),
            Statement::Delete(delete) => delete.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        render_with(&self.with, f)?;
        fmt!(f, self.query);
        Ok(())
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        render_with(&self.with, f)?;
        f.mark_affected(&self.target.table_expression);
        f.dml_target_alias = Some(self.target.identification_variable.clone());

        fmt!(f, "INSERT INTO " self.target.table_expression);
        if !self.columns.is_empty() {
            let columns = Comma(&self.columns);
            fmt!(f, " (" columns ")");
        }

        match &self.source {
            InsertSource::Values(rows) => {
                f.with_clause(Clause::Values, |f| {
                    fmt!(f, " VALUES ");
                    let mut separator = "";
                    for row in rows {
                        let fields = Comma(row);
                        fmt!(f, separator "(" fields ")");
                        separator = ", ";
                    }
                    Ok(())
                })?;
            }
            InsertSource::Select(query) => {
                let query = &**query;
                fmt!(f, " " query);
            }
        }

        render_returning(&self.returning, f)?;
        f.dml_target_alias = None;
        Ok(())
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        render_with(&self.with, f)?;
        f.mark_affected(&self.target.table_expression);
        f.dml_target_alias = Some(self.target.identification_variable.clone());

        fmt!(f, "UPDATE " self.target.table_expression);
        f.with_clause(Clause::Set, |f| {
            fmt!(f, " SET ");
            let mut separator = "";
            for assignment in &self.assignments {
                fmt!(f, separator assignment.column " = " assignment.value);
                separator = ", ";
            }
            Ok(())
        })?;

        render_dml_predicate(&self.predicate, f)?;
        render_returning(&self.returning, f)?;
        f.dml_target_alias = None;
        Ok(())
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        render_with(&self.with, f)?;
        f.mark_affected(&self.target.table_expression);
        f.dml_target_alias = Some(self.target.identification_variable.clone());

        fmt!(f, "DELETE FROM " self.target.table_expression);
        render_dml_predicate(&self.predicate, f)?;
        render_returning(&self.returning, f)?;
        f.dml_target_alias = None;
        Ok(())
    }
}

fn render_with(with: &Option<CteContainer>, f: &mut Formatter<'_>) -> Result<()> {
    if let Some(with) = with {
        if !with.ctes.is_empty() {
            fmt!(f, with " ");
        }
    }
    Ok(())
}

fn render_dml_predicate(predicate: &Option<Predicate>, f: &mut Formatter<'_>) -> Result<()> {
    if let Some(predicate) = predicate {
        if !predicate.is_empty() {
            f.with_clause(Clause::Where, |f| {
                fmt!(f, " WHERE " predicate);
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn render_returning(returning: &[ColumnReference], f: &mut Formatter<'_>) -> Result<()> {
    if returning.is_empty() {
        return Ok(());
    }
    f.with_clause(Clause::Returning, |f| {
        let columns = Comma(returning);
        fmt!(f, " RETURNING " columns);
        Ok(())
    })
}
