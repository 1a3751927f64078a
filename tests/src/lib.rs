mod exec_log;
pub use exec_log::ExecLog;

mod fixture;
pub use fixture::{Fixture, Run};

mod logging_connection;
pub use logging_connection::{ExecOp, LoggingConnection};

pub use sqlmerge::{KeyMap, Row, RunReport, Value};
