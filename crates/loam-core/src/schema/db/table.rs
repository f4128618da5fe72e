use super::{Column, ColumnId};

use std::fmt;

#[derive(Debug)]
pub struct Table {
    /// Uniquely identifies the table in the schema.
    pub id: TableId,

    /// The name of the table in the database.
    pub name: String,

    /// Columns, in declaration order. `ColumnId::index` indexes into this
    /// vector, so it must never be permuted after construction.
    pub columns: Vec<Column>,

    /// Columns that comprise the primary key, in key-declaration order.
    pub primary_key: Vec<ColumnId>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub fn column(&self, id: ColumnId) -> &Column {
        assert_eq!(self.id, id.table, "column does not belong to this table");
        &self.columns[id.index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
