use sqlmerge_core::{
    driver::Response,
    stmt::Statement,
    Connection, Result,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct ExecOp {
    pub statement: Statement,
    pub response: Response,
}

/// A connection wrapper that logs every statement and its response for
/// testing purposes
#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes statements
    inner: Box<dyn Connection>,

    /// Log of all statements executed through this connection
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

impl LoggingConnection {
    pub fn new(inner: impl Connection + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<ExecOp>>> {
        self.ops_log.clone()
    }
}

impl Connection for LoggingConnection {
    fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        let response = self.inner.exec(stmt)?;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(ExecOp {
                statement: stmt.clone(),
                response: response.clone(),
            });

        Ok(response)
    }
}
