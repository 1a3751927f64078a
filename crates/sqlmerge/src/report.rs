use std::fmt;

/// What a run did, table by table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,

    /// The table has no update fields and was not processed
    pub skipped: bool,

    /// Secondary rows read
    pub rows: u64,

    /// Rows that matched an existing target record
    pub matched: u64,

    /// Rows inserted with a newly assigned key
    pub inserted: u64,

    /// UPDATE statements issued against matched records
    pub updated: u64,

    /// Dependent rows removed by cascades
    pub deleted: u64,
}

impl RunReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == name)
    }

    pub fn matched(&self) -> u64 {
        self.tables.iter().map(|report| report.matched).sum()
    }

    pub fn inserted(&self) -> u64 {
        self.tables.iter().map(|report| report.inserted).sum()
    }

    pub fn updated(&self) -> u64 {
        self.tables.iter().map(|report| report.updated).sum()
    }

    pub fn deleted(&self) -> u64 {
        self.tables.iter().map(|report| report.deleted).sum()
    }
}

impl TableReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped {
            return write!(f, "{}: skipped (no update fields)", self.table);
        }

        write!(
            f,
            "{}: {} rows, {} matched, {} inserted, {} updated, {} dependent rows deleted",
            self.table, self.rows, self.matched, self.inserted, self.updated, self.deleted
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.tables {
            writeln!(f, "{report}")?;
        }
        write!(
            f,
            "total: {} matched, {} inserted, {} updated, {} dependent rows deleted",
            self.matched(),
            self.inserted(),
            self.updated(),
            self.deleted()
        )
    }
}
