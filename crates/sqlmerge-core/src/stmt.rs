//! Statement AST consumed by the SQL serializer and the drivers.
//!
//! Each statement kind is an immutable value built up through consuming
//! builder methods. The engine assembles statements across several decision
//! points without ever touching SQL text; `sqlmerge-sql` renders them into a
//! flavor-specific parameterized string.

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{BinaryOp, Expr, ExprColumn, Func};

mod insert;
pub use insert::Insert;

mod row;
pub use row::Row;

mod select;
pub use select::{Select, SelectItem};

mod table_ref;
pub use table_ref::{Join, TableRef};

mod update;
pub use update::{Assignment, Update};

mod value;
pub use value::Value;

mod value_chrono;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Query(Select),
    Update(Update),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Query(_))
    }

    /// Name of the table the statement reads from or writes to.
    pub fn table(&self) -> &str {
        match self {
            Statement::Delete(stmt) => &stmt.from,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Query(stmt) => &stmt.from.name,
            Statement::Update(stmt) => &stmt.table,
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Query(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
