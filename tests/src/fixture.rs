use crate::{ExecLog, LoggingConnection};

use sqlmerge::{Engine, KeyMap, RunReport, SchemaSet};
use sqlmerge_core::{
    stmt::{Expr, Row, Select, Value},
    Connection as _,
};
use sqlmerge_driver_sqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// A target and a secondary SQLite database in a temporary directory.
///
/// Files rather than in-memory databases so that a test can run the engine
/// more than once against the same target and inspect it afterwards.
pub struct Fixture {
    dir: TempDir,
}

/// The outcome of one engine run.
pub struct Run {
    pub report: RunReport,
    pub key_map: KeyMap,

    /// Statements executed against the target
    pub log: ExecLog,
}

impl Fixture {
    /// Creates both databases by running `target` and `secondary` as SQL
    /// batches.
    pub fn new(target: &str, secondary: &str) -> Fixture {
        init_tracing();

        let fixture = Fixture {
            dir: tempfile::tempdir().unwrap(),
        };

        fixture.target().execute_batch(target).unwrap();
        fixture.secondary().execute_batch(secondary).unwrap();

        fixture
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.path().join("target.db")
    }

    pub fn secondary_path(&self) -> PathBuf {
        self.dir.path().join("secondary.db")
    }

    pub fn target(&self) -> Connection {
        Connection::open(self.target_path()).unwrap()
    }

    pub fn secondary(&self) -> Connection {
        Connection::open(self.secondary_path()).unwrap()
    }

    /// An engine over fresh connections to both databases. Statements run
    /// against the target are logged.
    pub fn engine(&self, config: &str) -> (Engine, ExecLog) {
        let target = LoggingConnection::new(self.target());
        let log = ExecLog::new(target.ops_log_handle());

        let secondary = Connection::open_read_only(self.secondary_path()).unwrap();

        let engine = Engine::new(SchemaSet::parse(config), target, secondary);
        (engine, log)
    }

    /// Runs the engine once over `config`.
    pub fn run(&self, config: &str) -> Run {
        let (mut engine, log) = self.engine(config);
        let report = engine.run().unwrap();

        Run {
            report,
            key_map: engine.key_map().clone(),
            log,
        }
    }

    /// Every row of a target table.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.select(Select::new(table).wildcard(table))
    }

    /// Target rows of `table` whose `column` equals `value`.
    pub fn rows_where(&self, table: &str, column: &str, value: impl Into<Value>) -> Vec<Row> {
        self.select(
            Select::new(table)
                .wildcard(table)
                .filter(Expr::eq(Expr::column(column), Expr::value(value))),
        )
    }

    fn select(&self, select: Select) -> Vec<Row> {
        self.target()
            .exec(&select.into())
            .unwrap()
            .into_rows()
            .unwrap()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
