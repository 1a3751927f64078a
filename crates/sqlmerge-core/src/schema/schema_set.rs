use super::{table::entry_name, TableSchema};
use crate::Error;

use std::fmt;

/// The full merge configuration: table schemas in processing order, plus
/// every problem found while parsing it.
///
/// Processing order is the order tables appear in the configuration; tables
/// referenced through foreign keys are expected to come first.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    tables: Vec<TableSchema>,
    issues: Vec<ConfigIssue>,
}

/// A problem found while parsing the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Zero-based index of the entry in the configuration
    pub entry: usize,

    /// Table name, or the raw entry when no name could be parsed
    pub table: String,

    pub severity: Severity,

    pub error: Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The table was loaded; part of its configuration was ignored
    Warning,

    /// The table was dropped from the active set
    Rejected,
}

impl SchemaSet {
    /// Parses configuration text.
    ///
    /// `#` starts a comment running to the end of the line. Entries are
    /// separated by a `.` followed by whitespace. Entries that fail to parse
    /// are left out and reported through [`issues`](Self::issues); parsing
    /// itself never fails.
    pub fn parse(src: &str) -> SchemaSet {
        let text = strip_comments(src);
        let mut schema = SchemaSet::default();

        for (index, entry) in split_entries(&text).into_iter().enumerate() {
            let mut warnings = vec![];

            match TableSchema::parse_with_warnings(entry, &mut warnings) {
                Ok(table) => {
                    if schema.table(&table.name).is_some() {
                        warnings.push(Error::invalid_config(
                            &table.name,
                            "table is configured more than once; it will be processed again",
                        ));
                    }

                    for error in warnings {
                        schema.report(index, &table.name, Severity::Warning, error);
                    }

                    schema.tables.push(table);
                }
                Err(error) => {
                    for warning in warnings {
                        schema.report(index, entry_name(entry), Severity::Warning, warning);
                    }
                    schema.report(index, entry_name(entry), Severity::Rejected, error);
                }
            }
        }

        schema
    }

    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Issues that caused a table to be dropped.
    pub fn rejected(&self) -> impl Iterator<Item = &ConfigIssue> + '_ {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Rejected)
    }

    pub fn has_rejections(&self) -> bool {
        self.rejected().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn report(&mut self, entry: usize, table: &str, severity: Severity, error: Error) {
        match severity {
            Severity::Warning => tracing::warn!(entry, table, "{error}"),
            Severity::Rejected => tracing::warn!(entry, table, "table dropped: {error}"),
        }

        self.issues.push(ConfigIssue {
            entry,
            table: table.to_string(),
            severity,
            error,
        });
    }
}

/// Renders every table in configuration grammar, one entry per line.
impl fmt::Display for SchemaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            writeln!(f, "{table}.")?;
        }
        Ok(())
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Rejected => "rejected",
        };
        write!(
            f,
            "{label}: entry #{} (`{}`): {}",
            self.entry + 1,
            self.table,
            self.error
        )
    }
}

fn strip_comments(src: &str) -> String {
    src.lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits on every `.` that is followed by whitespace. A `.` closing the
/// final entry is dropped; blank entries are skipped.
fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = vec![];
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if c != '.' {
            continue;
        }

        if chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
            entries.push(&text[start..index]);
            start = index + 1;
        }
    }

    let last = text[start..].trim_end();
    entries.push(last.strip_suffix('.').unwrap_or(last));

    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}
