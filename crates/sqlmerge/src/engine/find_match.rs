use super::{project, Engine};

use sqlmerge_core::{
    stmt::{Expr, Row, Select, Value},
    Result, TableSchema,
};

impl Engine {
    /// Looks up the target record carrying the same global identifiers as
    /// `secondary_row` and returns its surrogate key.
    ///
    /// Tables without global identifiers never match. When several target
    /// records qualify, the first one the database returns wins.
    pub fn find_match(&mut self, table: &TableSchema, secondary_row: &Row) -> Result<Option<Value>> {
        if table.global_ids.is_empty() {
            return Ok(None);
        }

        let mut select = Select::new(table.name.as_str()).column_as(
            Expr::qualified(&table.name, &table.surrogate_key),
            &table.surrogate_key,
        );

        for field in &table.tier1.diffs {
            if field.is_foreign() {
                select = select.join(project::join_for(table, field)?);
            }
            select = select.column_as(project::column_for(table, field), field.row_key());
        }

        for field in &table.global_ids {
            if field.is_foreign() {
                select = select.join(project::join_for(table, field)?);
            }

            let value = secondary_row.get(&field.row_key())?.clone();
            select = select.filter(Expr::eq(project::column_for(table, field), value));
        }

        let Some(row) = self.exec_target(select.limit(1))?.into_first()? else {
            return Ok(None);
        };

        Ok(Some(row.get(&table.surrogate_key)?.clone()))
    }
}
