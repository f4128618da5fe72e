use super::query::render_sort_specifications;
use super::{Clause, Comma, Formatter, ToSql};

use crate::params::ParameterBinder;

use loam_core::stmt::{
    CaseSearched, ColumnReference, Expr, FunctionCall, Literal, Parameter,
};
use loam_core::{Error, Result};

impl ToSql for &Expr {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Expr::ColumnReference(column) => column.to_sql(f),
            Expr::Literal(literal) => literal.to_sql(f),
            Expr::Parameter(parameter) => parameter.to_sql(f),
            Expr::Tuple(tuple) => {
                // Comparisons and IN predicates decompose tuples before
                // rendering; a tuple reaching this point must render as a
                // native row-value constructor.
                if !f.dialect().row_value.constructor {
                    return Err(Error::unsupported_construct(
                        "dialect does not support row-value constructors",
                    ));
                }
                let exprs = Comma(&tuple.exprs);
                fmt!(f, "(" exprs ")");
                Ok(())
            }
            Expr::Case(case) => (&**case).to_sql(f),
            Expr::Function(function) => function.to_sql(f),
            Expr::Arith(arith) => {
                let op = arith.op.as_str();
                fmt!(f, arith.lhs " " op " " arith.rhs);
                Ok(())
            }
            Expr::Subquery(query) => {
                let query = &**query;
                f.depth += 1;
                let result = (|f: &mut Formatter<'_>| {
                    fmt!(f, "(" query ")");
                    Ok(())
                })(f);
                f.depth -= 1;
                result
            }
            Expr::SelfRendering(text) => {
                f.dst.push_str(text);
                Ok(())
            }
        }
    }
}

impl ToSql for &ColumnReference {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        if self.is_formula {
            // Read formulas are raw fragments, never qualified.
            f.dst.push_str(&self.expression);
            return Ok(());
        }

        // Inside an UPDATE or DELETE, references to the statement target
        // render unqualified.
        if f.dml_target_alias.as_deref() == Some(self.qualifier.as_str()) {
            fmt!(f, self.expression);
        } else {
            fmt!(f, self.qualifier "." self.expression);
        }
        Ok(())
    }
}

impl ToSql for &Literal {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let rendered = self.value.to_string();

        if f.in_select_clause() {
            // NULL in a select list is always cast so the driver can type
            // the column; other literals are cast only when the dialect
            // needs it for result metadata.
            if self.value.is_null()
                || f.dialect().requires_casting_of_parameters_in_select_clause
            {
                let ty = f.dialect().cast_type_name(self.jdbc_type);
                fmt!(f, "CAST(" rendered " AS " ty ")");
                return Ok(());
            }
        }

        fmt!(f, rendered);
        Ok(())
    }
}

impl ToSql for &Parameter {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let cast = f.in_select_clause()
            && f.dialect().requires_casting_of_parameters_in_select_clause;

        if cast {
            if let Some(jdbc_type) = self.jdbc_type {
                let ty = f.dialect().cast_type_name(jdbc_type);
                fmt!(f, "CAST(");
                f.bind(ParameterBinder::Value(self.value.clone(), self.jdbc_type));
                fmt!(f, " AS " ty ")");
                return Ok(());
            }
        }

        f.bind(ParameterBinder::Value(self.value.clone(), self.jdbc_type));
        Ok(())
    }
}

impl ToSql for &CaseSearched {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, "CASE");
        for when in &self.whens {
            fmt!(f, " WHEN " when.predicate " THEN " when.result);
        }
        if let Some(otherwise) = &self.otherwise {
            fmt!(f, " ELSE " otherwise);
        }
        fmt!(f, " END");
        Ok(())
    }
}

impl ToSql for &FunctionCall {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let args = Comma(&self.args);
        fmt!(f, self.name "(" args ")");

        if let Some(over) = &self.over {
            f.with_clause(Clause::Over, |f| {
                fmt!(f, " OVER (");
                let mut separator = "";
                if !over.partitions.is_empty() {
                    let partitions = Comma(&over.partitions);
                    fmt!(f, "PARTITION BY " partitions);
                    separator = " ";
                }
                if !over.sorts.is_empty() {
                    fmt!(f, separator "ORDER BY ");
                    render_sort_specifications(&over.sorts, f)?;
                }
                fmt!(f, ")");
                Ok(())
            })?;
        }
        Ok(())
    }
}
