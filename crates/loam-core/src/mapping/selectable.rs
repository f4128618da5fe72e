use crate::schema::db::JdbcType;
use crate::stmt::ColumnReference;
use crate::{Error, Result};

/// One physical selectable: a (table, column-or-formula, custom read/write
/// fragment, JDBC type) tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableMapping {
    containing_table: String,
    selection_expression: String,
    formula: bool,
    custom_read_expression: Option<String>,
    custom_write_expression: Option<String>,
    jdbc_type: JdbcType,
}

impl SelectableMapping {
    pub fn column(
        containing_table: impl Into<String>,
        name: impl Into<String>,
        jdbc_type: JdbcType,
    ) -> SelectableMapping {
        SelectableMapping {
            containing_table: containing_table.into(),
            selection_expression: name.into(),
            formula: false,
            custom_read_expression: None,
            custom_write_expression: None,
            jdbc_type,
        }
    }

    /// A formula selectable. The fragment is raw SQL, inlined verbatim at
    /// render time; formulas are read-only by construction.
    pub fn formula(
        containing_table: impl Into<String>,
        fragment: impl Into<String>,
        jdbc_type: JdbcType,
    ) -> SelectableMapping {
        SelectableMapping {
            containing_table: containing_table.into(),
            selection_expression: fragment.into(),
            formula: true,
            custom_read_expression: None,
            custom_write_expression: None,
            jdbc_type,
        }
    }

    pub fn with_read_expression(mut self, fragment: impl Into<String>) -> SelectableMapping {
        self.custom_read_expression = Some(fragment.into());
        self
    }

    /// Attaches a custom write fragment. Rejected for formulas: a formula
    /// has no writable column behind it.
    pub fn with_write_expression(mut self, fragment: impl Into<String>) -> Result<SelectableMapping> {
        if self.formula {
            return Err(Error::invalid_mapping(format!(
                "write expression declared for formula `{}`",
                self.selection_expression
            )));
        }
        self.custom_write_expression = Some(fragment.into());
        Ok(self)
    }

    pub fn containing_table_expression(&self) -> &str {
        &self.containing_table
    }

    /// The column name, or the raw fragment when `is_formula()`.
    pub fn selection_expression(&self) -> &str {
        &self.selection_expression
    }

    pub fn is_formula(&self) -> bool {
        self.formula
    }

    pub fn jdbc_type(&self) -> JdbcType {
        self.jdbc_type
    }

    /// The write fragment, if any. Always `None` for formulas.
    pub fn write_expression(&self) -> Option<&str> {
        if self.formula {
            None
        } else {
            self.custom_write_expression.as_deref()
        }
    }

    /// Builds a column reference for the given identification variable.
    ///
    /// A custom read fragment may embed `{alias}`, replaced by the
    /// qualifier; the result is rendered verbatim like a formula.
    pub fn column_reference(&self, qualifier: &str) -> ColumnReference {
        if let Some(read) = &self.custom_read_expression {
            ColumnReference::formula(qualifier, read.replace("{alias}", qualifier), self.jdbc_type)
        } else if self.formula {
            ColumnReference::formula(qualifier, self.selection_expression.clone(), self.jdbc_type)
        } else {
            ColumnReference::column(qualifier, self.selection_expression.clone(), self.jdbc_type)
        }
    }
}

/// A fixed-order array of selectables.
///
/// The order is the recursively-expanded declaration order of the owning
/// part and is semantically significant: JDBC values bind positionally
/// against it. It is never permuted after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectableMappings {
    mappings: Vec<SelectableMapping>,
}

impl SelectableMappings {
    pub fn from_vec(mappings: Vec<SelectableMapping>) -> SelectableMappings {
        SelectableMappings { mappings }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SelectableMapping> {
        self.mappings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectableMapping> {
        self.mappings.iter()
    }

    /// Enumerates the flattened JDBC positions starting at `offset`,
    /// returning the number of positions consumed.
    pub fn for_each_selectable(
        &self,
        offset: usize,
        f: &mut impl FnMut(usize, &SelectableMapping),
    ) -> usize {
        for (i, selectable) in self.mappings.iter().enumerate() {
            f(offset + i, selectable);
        }
        self.mappings.len()
    }

    pub fn for_each_jdbc_type(
        &self,
        offset: usize,
        f: &mut impl FnMut(usize, JdbcType),
    ) -> usize {
        for (i, selectable) in self.mappings.iter().enumerate() {
            f(offset + i, selectable.jdbc_type());
        }
        self.mappings.len()
    }
}

impl<'a> IntoIterator for &'a SelectableMappings {
    type Item = &'a SelectableMapping;
    type IntoIter = std::slice::Iter<'a, SelectableMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}
