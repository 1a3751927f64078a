use crate::logging_connection::ExecOp;
use sqlmerge_core::stmt::{Delete, Insert, Statement, Update};
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<ExecOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<ExecOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Every logged statement, in execution order
    pub fn statements(&self) -> Vec<Statement> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.statement.clone())
            .collect()
    }

    /// Count statements matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Statement) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.statement))
            .count()
    }

    /// Check if any statement matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Statement) -> bool,
    {
        self.count(predicate) > 0
    }

    pub fn has_insert(&self) -> bool {
        self.any(|stmt| matches!(stmt, Statement::Insert(_)))
    }

    pub fn has_update(&self) -> bool {
        self.any(|stmt| matches!(stmt, Statement::Update(_)))
    }

    pub fn has_delete(&self) -> bool {
        self.any(|stmt| matches!(stmt, Statement::Delete(_)))
    }

    /// Every INSERT, in execution order
    pub fn inserts(&self) -> Vec<Insert> {
        self.statements()
            .into_iter()
            .filter_map(|stmt| match stmt {
                Statement::Insert(insert) => Some(insert),
                _ => None,
            })
            .collect()
    }

    /// Every UPDATE, in execution order
    pub fn updates(&self) -> Vec<Update> {
        self.statements()
            .into_iter()
            .filter_map(|stmt| match stmt {
                Statement::Update(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    /// Every DELETE, in execution order
    pub fn deletes(&self) -> Vec<Delete> {
        self.statements()
            .into_iter()
            .filter_map(|stmt| match stmt {
                Statement::Delete(delete) => Some(delete),
                _ => None,
            })
            .collect()
    }

    /// Clear all logged statements
    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }
}
