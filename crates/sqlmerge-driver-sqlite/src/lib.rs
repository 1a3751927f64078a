mod value;
pub(crate) use value::Value;

use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use sqlmerge_core::{
    driver::Response,
    stmt::{self, Statement},
    Error, Result,
};
use sqlmerge_sql::Serializer;
use std::path::{Path, PathBuf};
use url::Url;

/// Where a SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite location from a connection URL such as
    /// `sqlite:merged.db` or `sqlite::memory:`
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// An in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// A SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> String {
        match self {
            Sqlite::InMemory => "sqlite::memory:".to_string(),
            Sqlite::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    /// Opens a read-write connection. Each call for [`Sqlite::InMemory`]
    /// creates a fresh, empty database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }

    /// Opens a connection that rejects every write.
    pub fn connect_read_only(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open_read_only(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    /// Opens an existing database file without write access. Fails when the
    /// file does not exist.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let connection = RusqliteConnection::open_with_flags(path, flags)
            .map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    /// Runs raw SQL, such as schema setup, outside the statement AST.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }
}

impl sqlmerge_core::Connection for Connection {
    fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = Serializer::sqlite().serialize(stmt, &mut params);

        tracing::debug!(sql = %sql_str, params = params.len(), "exec");

        let mut prepared = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver_operation_failed)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        if !stmt.is_query() {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver_operation_failed)?;

            return Ok(Response::count(count as _));
        }

        let columns: Vec<String> = prepared
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = stmt::Row::new();

                    for (index, name) in columns.iter().enumerate() {
                        let value =
                            Value::from_sql(row, index).map_err(Error::driver_operation_failed)?;
                        record.insert(name.as_str(), value.into_inner());
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::driver_operation_failed(err));
                }
            }
        }

        Ok(Response::values(ret))
    }
}
