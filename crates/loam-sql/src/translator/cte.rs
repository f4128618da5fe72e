use super::{Comma, Formatter, ToSql};

use loam_core::stmt::{
    CteContainer, CteStatement, CycleClause, SearchClause, SortDirection,
};
use loam_core::Result;

impl ToSql for &CteContainer {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        // RECURSIVE is a property of the WITH clause as a whole.
        if self.is_recursive() {
            fmt!(f, "WITH RECURSIVE ");
        } else {
            fmt!(f, "WITH ");
        }

        let mut separator = "";
        for cte in &self.ctes {
            fmt!(f, separator cte);
            separator = ", ";
        }
        Ok(())
    }
}

impl ToSql for &CteStatement {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, self.name);
        if !self.columns.is_empty() {
            let columns = Comma(&self.columns);
            fmt!(f, " (" columns ")");
        }

        let definition = &*self.definition;
        f.depth += 1;
        let result: Result<()> = (|f: &mut Formatter<'_>| {
            fmt!(f, " AS (" definition ")");
            Ok(())
        })(f);
        f.depth -= 1;
        result?;

        if let Some(search) = &self.search {
            search.to_sql(f)?;
        }
        if let Some(cycle) = &self.cycle {
            cycle.to_sql(f)?;
        }
        Ok(())
    }
}

impl ToSql for &SearchClause {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let kind = self.kind.as_str();
        fmt!(f, " SEARCH " kind " FIRST BY ");
        let mut separator = "";
        for by in &self.by {
            fmt!(f, separator by.column);
            if by.direction == SortDirection::Descending {
                fmt!(f, " DESC");
            }
            separator = ", ";
        }
        fmt!(f, " SET " self.set_column);
        Ok(())
    }
}

impl ToSql for &CycleClause {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let columns = Comma(&self.columns);
        fmt!(f, " CYCLE " columns " SET " self.mark_column);
        fmt!(f, " TO '" self.mark_value "' DEFAULT '" self.no_mark_value "'");
        Ok(())
    }
}
