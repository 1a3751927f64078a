//! Merge configuration model.
//!
//! A configuration is a list of table entries. Each entry names a table, the
//! child tables invalidated when one of its records is replaced, the
//! surrogate key, the global identifiers used to match records across
//! databases, and two tiers of (diff fields, update fields).

mod field;
pub use field::Field;

mod reference;
pub use reference::Reference;

mod schema_set;
pub use schema_set::{ConfigIssue, SchemaSet, Severity};

mod table;
pub use table::{TableSchema, Tier, DEFAULT_SURROGATE_KEY};
