use super::Engine;

use sqlmerge_core::{
    stmt::{Insert, Row, Value},
    Result, TableSchema,
};

impl Engine {
    /// Copies an unmatched secondary record into the target under `new_key`.
    ///
    /// Global identifiers and update fields are copied from the secondary
    /// row. Update fields carrying a reference are translated through the
    /// key map of the referenced table, keeping the raw value when the
    /// referenced record was never mapped. The surrogate key column always
    /// takes `new_key`, even when it is also listed as a global identifier
    /// or update field.
    pub(super) fn insert_record(
        &mut self,
        table: &TableSchema,
        secondary_row: &Row,
        secondary_key: Value,
        new_key: i64,
    ) -> Result<()> {
        let mut insert = Insert::new(table.name.as_str()).value(&table.surrogate_key, new_key);

        let key = table.surrogate_key.as_str();

        for field in table
            .global_ids
            .iter()
            .filter(|field| !field.is_foreign() && field.local != key)
        {
            match secondary_row.get(&field.local) {
                Ok(value) => insert = insert.value(&field.local, value.clone()),
                Err(err) if err.is_column_not_found() => {
                    tracing::warn!(table = %table.name, column = %field.local, "not in secondary row; skipped");
                }
                Err(err) => return Err(err),
            }
        }

        for (name, reference) in table.update_fields().filter(|(name, _)| *name != key) {
            let value = match secondary_row.get(name) {
                Ok(value) => value,
                Err(err) if err.is_column_not_found() => {
                    tracing::warn!(table = %table.name, column = name, "not in secondary row; skipped");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let value = match reference {
                Some(reference) => self.key_map.translate(&reference.table, value),
                None => value.clone(),
            };

            insert = insert.value(name, value);
        }

        self.exec_target(insert)?.into_count()?;
        self.key_map
            .insert(&table.name, secondary_key, Value::from(new_key));

        Ok(())
    }
}
