use super::{project, Engine};
use crate::TableReport;

use sqlmerge_core::{
    schema::{Field, Tier},
    stmt::{Delete, Expr, Row, Update, Value},
    Result, TableSchema,
};

impl Engine {
    /// Applies a matched secondary record to its target counterpart.
    ///
    /// The first tier is gated on a chronological comparison of the first
    /// diff field. When the secondary record is newer, dependent rows of the
    /// target record are deleted, and the first tier's fields are written if
    /// the second diff field also favors the secondary record. The second
    /// tier is gated independently on a lexicographic comparison of the
    /// first diff field.
    pub(super) fn update_match(
        &mut self,
        table: &TableSchema,
        secondary_row: &Row,
        secondary_key: Value,
        target_key: Value,
        report: &mut TableReport,
    ) -> Result<()> {
        self.key_map
            .insert(&table.name, secondary_key, target_key.clone());

        let matched = self.fetch_target_row(table, &target_key)?;
        let first = table.tier1.diffs.first();

        if newer_by_time(first, secondary_row, &matched) {
            report.deleted += self.delete_dependents(table, &matched, &target_key)?;

            if newer_by_text(table.tier1.diffs.get(1), secondary_row, &matched) {
                report.updated += self.write_tier(table, &table.tier1, &matched, &target_key)?;
            }
        }

        if newer_by_text(first, secondary_row, &matched) {
            report.updated += self.write_tier(table, &table.tier2, &matched, &target_key)?;
        }

        Ok(())
    }

    /// The full target row for `key`, projected like the secondary rows.
    /// A row that cannot be found is treated as empty.
    fn fetch_target_row(&mut self, table: &TableSchema, key: &Value) -> Result<Row> {
        let select = project::projection(table)?
            .filter(Expr::eq(
                Expr::qualified(&table.name, &table.surrogate_key),
                key.clone(),
            ))
            .limit(1);

        Ok(self.exec_target(select)?.into_first()?.unwrap_or_default())
    }

    /// Deletes the rows of every dependent table that point at the matched
    /// record. Returns the number of rows removed.
    fn delete_dependents(
        &mut self,
        table: &TableSchema,
        matched: &Row,
        target_key: &Value,
    ) -> Result<u64> {
        let mut deleted = 0;

        for dependent in &table.dependents {
            // The parent usually has no column named after the child's
            // foreign key; its surrogate key is what the child points at.
            let value = match matched.get(&dependent.field) {
                Ok(value) => value.clone(),
                Err(err) if err.is_column_not_found() => target_key.clone(),
                Err(err) => return Err(err),
            };

            let delete = Delete::new(dependent.table.as_str())
                .filter(Expr::eq(Expr::column(&dependent.field), value));

            let count = self.exec_target(delete)?.into_count()?;
            tracing::info!(table = %table.name, "Deleted {count} rows from {dependent}");
            deleted += count;
        }

        Ok(deleted)
    }

    /// Writes the tier's plain update fields to the matched record. Fields
    /// carrying a reference are left alone. Returns the number of UPDATE
    /// statements issued.
    fn write_tier(
        &mut self,
        table: &TableSchema,
        tier: &Tier,
        matched: &Row,
        target_key: &Value,
    ) -> Result<u64> {
        let mut update = Update::new(table.name.as_str());

        for (name, _) in tier.updates.iter().filter(|(_, reference)| reference.is_none()) {
            // Tier writes carry the matched row's own value.
            match matched.get(name) {
                Ok(value) => update = update.set(name, value.clone()),
                Err(err) if err.is_column_not_found() => continue,
                Err(err) => return Err(err),
            }
        }

        if update.is_empty() {
            return Ok(0);
        }

        let fields: Vec<_> = update.columns().map(str::to_string).collect();
        let update = update.filter(Expr::eq(
            Expr::column(&table.surrogate_key),
            target_key.clone(),
        ));

        self.exec_target(update)?.into_count()?;
        tracing::info!(table = %table.name, "Updated fields {fields:?} of {target_key}");

        Ok(1)
    }
}

/// Whether the secondary row is strictly more recent than the matched row on
/// `field`, read as a timestamp. Anything that can't be compared counts as
/// newer.
fn newer_by_time(field: Option<&Field>, secondary: &Row, matched: &Row) -> bool {
    let Some(field) = field else {
        return true;
    };

    let key = field.row_key();
    match (secondary.get_datetime(&key), matched.get_datetime(&key)) {
        (Ok(secondary), Ok(matched)) => {
            tracing::debug!(field = %key, %secondary, %matched, "chronological comparison");
            secondary > matched
        }
        (secondary, matched) => {
            tracing::debug!(
                field = %key,
                secondary_ok = secondary.is_ok(),
                matched_ok = matched.is_ok(),
                "no comparable timestamp; treating secondary as newer"
            );
            true
        }
    }
}

/// Whether the secondary row sorts strictly after the matched row on
/// `field`, compared as text. Anything that can't be compared counts as
/// newer.
fn newer_by_text(field: Option<&Field>, secondary: &Row, matched: &Row) -> bool {
    let Some(field) = field else {
        return true;
    };

    let key = field.row_key();
    match (secondary.get_text(&key), matched.get_text(&key)) {
        (Ok(secondary), Ok(matched)) => secondary > matched,
        _ => true,
    }
}
