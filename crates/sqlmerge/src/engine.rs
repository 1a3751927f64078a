//! The reconciliation engine.
//!
//! Tables are processed in configuration order. For each secondary row the
//! engine looks for the same record in the target through the table's
//! global identifiers. A match goes through the tiered update path; a miss
//! is inserted under a freshly assigned surrogate key. Either way the
//! secondary key is recorded in the [`KeyMap`] so that later tables can
//! translate foreign keys that point at it.

mod find_match;
mod insert;
mod next_key;
mod project;
mod update;

use crate::{KeyMap, RunReport, TableReport};

use sqlmerge_core::{
    driver::Response,
    stmt::{Row, Statement},
    Connection, Result, SchemaSet, TableSchema,
};

use std::sync::Arc;

/// Reconciles a secondary database into a target database.
///
/// The engine owns both connections and the key map for the duration of a
/// run; nothing is shared with other engines.
#[derive(Debug)]
pub struct Engine {
    /// Tables to reconcile, in processing order
    schema: Arc<SchemaSet>,

    /// Database records are merged into
    target: Box<dyn Connection>,

    /// Database records are read from. Only queried.
    secondary: Box<dyn Connection>,

    key_map: KeyMap,
}

impl Engine {
    pub fn new(
        schema: impl Into<Arc<SchemaSet>>,
        target: impl Connection + 'static,
        secondary: impl Connection + 'static,
    ) -> Engine {
        Engine {
            schema: schema.into(),
            target: Box::new(target),
            secondary: Box::new(secondary),
            key_map: KeyMap::new(),
        }
    }

    /// Reconciles every table of the schema in order.
    ///
    /// Driver errors abort the run. Statements already executed against the
    /// target stay applied.
    pub fn run(&mut self) -> Result<RunReport> {
        let schema = self.schema.clone();
        let mut report = RunReport::default();

        for table in schema.tables() {
            let table_report = self
                .reconcile_table(table)
                .map_err(|err| err.context(format!("reconciling table `{}`", table.name)))?;

            tracing::info!(table = %table.name, "{table_report}");
            report.tables.push(table_report);
        }

        Ok(report)
    }

    /// Reconciles one table: every secondary row is either matched and
    /// updated, or inserted.
    pub fn reconcile_table(&mut self, table: &TableSchema) -> Result<TableReport> {
        let mut report = TableReport::new(&table.name);

        if table.is_inert() {
            tracing::info!(table = %table.name, "no update fields; skipping");
            report.skipped = true;
            return Ok(report);
        }

        tracing::info!(table = %table.name, "reconciling");

        let rows = self.query_secondary_table(table)?;
        let mut next_key = self.next_key(table)?;

        for row in rows {
            report.rows += 1;

            let secondary_key = row.get(&table.surrogate_key)?.clone();

            match self.find_match(table, &row)? {
                Some(target_key) => {
                    tracing::info!(table = %table.name, "Found match: {secondary_key} -> {target_key}");
                    report.matched += 1;
                    self.update_match(table, &row, secondary_key, target_key, &mut report)?;
                }
                None => {
                    let new_key = next_key;
                    next_key += 1;

                    self.insert_record(table, &row, secondary_key.clone(), new_key)?;
                    tracing::info!(
                        table = %table.name,
                        "No match for {secondary_key}. Created record {new_key}"
                    );
                    report.inserted += 1;
                }
            }
        }

        Ok(report)
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    fn exec_target(&mut self, stmt: impl Into<Statement>) -> Result<Response> {
        let stmt = stmt.into();
        tracing::debug!(db = "target", ?stmt, "exec");
        self.target.exec(&stmt)
    }

    fn exec_secondary(&mut self, stmt: impl Into<Statement>) -> Result<Vec<Row>> {
        let stmt = stmt.into();
        tracing::debug!(db = "secondary", ?stmt, "exec");
        self.secondary.exec(&stmt)?.into_rows()
    }
}
