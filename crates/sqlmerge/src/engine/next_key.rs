use super::Engine;

use sqlmerge_core::{
    stmt::{Expr, Select, Value},
    Error, Result, TableSchema,
};

impl Engine {
    /// The first surrogate key free in the target: one past the current
    /// maximum, or 1 for an empty table.
    pub(super) fn next_key(&mut self, table: &TableSchema) -> Result<i64> {
        let select = Select::new(table.name.as_str())
            .column_as(Expr::max(Expr::column(&table.surrogate_key)), "max");

        let row = self.exec_target(select)?.into_first()?;

        let max = match row.as_ref().map(|row| row.get("max")).transpose()? {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| Error::type_conversion(value.clone(), "i64"))?,
        };

        Ok(max + 1)
    }
}
