//! Driver-backed connection and cursors via `odbc-api`.

use super::connection_string;
use crate::adapters::{ConnectionConfig, HiveConnection, HiveCursor};
use crate::{Result, error::SchemaDumpError};
use async_trait::async_trait;
use odbc_api::handles::StatementImpl;
use odbc_api::{Connection, ConnectionOptions, Cursor, CursorImpl, Environment, ResultSetMetadata};
use std::sync::OnceLock;

/// Returns the process-wide ODBC environment, creating it on first use.
fn odbc_environment() -> Result<&'static Environment> {
    static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

    if let Some(environment) = ENVIRONMENT.get() {
        return Ok(environment);
    }
    let environment = Environment::new().map_err(|e| {
        SchemaDumpError::connection_failed("Failed to allocate ODBC environment", e)
    })?;
    Ok(ENVIRONMENT.get_or_init(|| environment))
}

/// One ODBC connection shared by every cursor of a dump.
pub struct OdbcConnection {
    connection: Connection<'static>,
    config: ConnectionConfig,
}

impl std::fmt::Debug for OdbcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdbcConnection")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OdbcConnection {
    /// Connects eagerly using the driver named in `config`.
    ///
    /// # Errors
    /// Returns a connection error if the driver cannot be loaded, the server
    /// is unreachable or authentication fails.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        let environment = odbc_environment()?;
        let dsn = connection_string(&config);
        tracing::debug!("ODBC connection string: {}", dsn);

        let connection = environment
            .connect_with_connection_string(&dsn, ConnectionOptions::default())
            .map_err(|e| SchemaDumpError::connection_failed(format!("connecting to {config}"), e))?;

        Ok(Self { connection, config })
    }
}

impl HiveConnection for OdbcConnection {
    fn cursor(&self) -> Result<Box<dyn HiveCursor + '_>> {
        Ok(Box::new(OdbcCursor {
            connection: &self.connection,
            current: None,
            result_set: ResultSet::default(),
        }))
    }

    fn connection_config(&self) -> &ConnectionConfig {
        &self.config
    }
}

/// Statement text and column count of the current result set.
#[derive(Debug, Default)]
struct ResultSet {
    statement: String,
    width: u16,
}

impl ResultSet {
    /// Fetch failures are reported against the statement that opened the
    /// result set.
    fn fetch_failed<E>(&self, error: E) -> SchemaDumpError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SchemaDumpError::query_failed(self.statement.as_str(), error)
    }
}

/// Logical cursor: each `execute` opens a statement on the shared connection.
///
/// The open statement handle is closed when the cursor is dropped or the
/// next statement is executed.
pub struct OdbcCursor<'c> {
    connection: &'c Connection<'static>,
    current: Option<CursorImpl<StatementImpl<'c>>>,
    result_set: ResultSet,
}

#[async_trait(?Send)]
impl HiveCursor for OdbcCursor<'_> {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        // Close the previous result set before opening the next statement
        self.current = None;
        self.result_set = ResultSet {
            statement: statement.to_string(),
            width: 0,
        };

        // No query timeout is set; metadata statements run to completion
        let connection = self.connection;
        let cursor = connection
            .execute(statement, ())
            .map_err(|e| SchemaDumpError::query_failed(statement, e))?;

        if let Some(mut cursor) = cursor {
            let columns = cursor
                .num_result_cols()
                .map_err(|e| SchemaDumpError::query_failed(statement, e))?;
            self.result_set.width = u16::try_from(columns).unwrap_or(0);
            self.current = Some(cursor);
        }
        Ok(())
    }

    async fn fetch_row(&mut self) -> Result<Option<Vec<String>>> {
        let result_set = &self.result_set;
        let width = result_set.width;
        let Some(cursor) = self.current.as_mut() else {
            return Ok(None);
        };

        let cells = match cursor.next_row().map_err(|e| result_set.fetch_failed(e))? {
            Some(mut row) => {
                let mut cells = Vec::with_capacity(usize::from(width));
                let mut buffer = Vec::new();
                for column in 1..=width {
                    buffer.clear();
                    // A NULL cell leaves the buffer empty
                    row.get_text(column, &mut buffer)
                        .map_err(|e| result_set.fetch_failed(e))?;
                    cells.push(String::from_utf8_lossy(&buffer).into_owned());
                }
                Some(cells)
            }
            None => None,
        };

        if cells.is_none() {
            self.current = None;
        }
        Ok(cells)
    }
}
