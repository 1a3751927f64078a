mod engine;
pub use engine::Engine;

pub mod key_map;
pub use key_map::KeyMap;

mod report;
pub use report::{RunReport, TableReport};

pub use sqlmerge_core::{
    schema::{ConfigIssue, Severity},
    stmt::{Row, Value},
    Connection, Error, Result, SchemaSet, TableSchema,
};
