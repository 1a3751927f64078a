//! Secondary to target surrogate key translation.
//!
//! Every secondary record the engine processes, matched or inserted, leaves
//! one entry behind. Later tables use those entries to rewrite foreign keys
//! that point at records whose surrogate key changed on the way into the
//! target.

use sqlmerge_core::stmt::Value;

use indexmap::IndexMap;

/// Per table map of secondary surrogate key to target surrogate key.
///
/// Entries are kept in the order they were recorded. An entry is never
/// removed and never replaced with a different target key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyMap {
    tables: IndexMap<String, IndexMap<Value, Value>>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `secondary` in `table` corresponds to `target`.
    ///
    /// Returns `false`, leaving the map unchanged, if `secondary` is already
    /// mapped to a different key.
    pub fn insert(&mut self, table: &str, secondary: Value, target: Value) -> bool {
        let keys = self.tables.entry(table.to_string()).or_default();

        match keys.get(&secondary) {
            Some(existing) if *existing == target => true,
            Some(existing) => {
                tracing::warn!(
                    table,
                    %secondary,
                    %existing,
                    refused = %target,
                    "key already mapped; keeping the existing entry"
                );
                false
            }
            None => {
                keys.insert(secondary, target);
                true
            }
        }
    }

    pub fn get(&self, table: &str, secondary: &Value) -> Option<&Value> {
        self.tables.get(table)?.get(secondary)
    }

    /// Translates a secondary key of `table`, falling back to the key itself
    /// when no mapping was recorded.
    pub fn translate(&self, table: &str, secondary: &Value) -> Value {
        self.get(table, secondary)
            .cloned()
            .unwrap_or_else(|| secondary.clone())
    }

    /// Every mapping recorded for `table`, in insertion order.
    pub fn table(&self, table: &str) -> impl Iterator<Item = (&Value, &Value)> + '_ {
        self.tables.get(table).into_iter().flat_map(|keys| keys.iter())
    }

    /// Names of the tables with at least one mapping.
    pub fn tables(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }

    /// Total number of mappings across every table.
    pub fn len(&self) -> usize {
        self.tables.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
