//! Client traits and factory for HiveServer2 / Impala access.
//!
//! The wire protocol belongs to the client library behind these traits. The
//! traversal only needs two things from it: logical cursors over one shared
//! connection, and single-pass row iteration per executed statement.
//!
//! # Module Structure
//! - `config`: Configuration types (ConnectionConfig, OutputConfig) and resolution
//! - `odbc`: ODBC connection strings and the ODBC-backed client (feature `odbc`)

use crate::Result;
use async_trait::async_trait;

pub mod config;
pub mod odbc;

pub use config::{AuthMechanism, ConnectionConfig, OutputConfig, Quoting, parse_csv_char};

/// A logical cursor over a shared connection.
///
/// A cursor is released when dropped, whether its result set was fully
/// consumed or an error cut iteration short.
///
/// # Single-pass results
/// After `execute`, `fetch_row` yields the rows of that statement in server
/// order and then `None`. Rows cannot be re-read; a later `execute` discards
/// whatever was left and starts a new result set.
#[async_trait(?Send)]
pub trait HiveCursor {
    /// Executes one statement on this cursor.
    ///
    /// Statements that return no rows (such as `use <db>`) leave the cursor
    /// with an empty result set.
    ///
    /// # Errors
    /// Returns a query execution error if the server rejects the statement.
    async fn execute(&mut self, statement: &str) -> Result<()>;

    /// Fetches the next row of the current result set as text cells.
    ///
    /// NULL cells are returned as empty strings.
    ///
    /// # Errors
    /// Returns a query execution error if fetching fails.
    async fn fetch_row(&mut self) -> Result<Option<Vec<String>>>;
}

/// One open connection to HiveServer2 or Impala.
///
/// Implementations are used from a single thread; the traversal never holds
/// more than one chain of nested cursors.
pub trait HiveConnection {
    /// Opens a fresh logical cursor on this connection.
    ///
    /// Session state such as the current database is not assumed to carry
    /// over between cursors.
    ///
    /// # Errors
    /// Returns an error if the server refuses a new statement handle.
    fn cursor(&self) -> Result<Box<dyn HiveCursor + '_>>;

    /// Gets the configuration this connection was opened with.
    fn connection_config(&self) -> &ConnectionConfig;
}

/// Opens the single connection a dump uses.
///
/// The connection is established eagerly; nothing reconnects or retries.
///
/// # Errors
/// Returns error if:
/// - The configuration is invalid
/// - The server is unreachable or authentication fails
/// - No client backend was compiled in
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn HiveConnection>> {
    config.validate()?;

    tracing::info!(
        "connecting to {} database {}",
        config,
        config.database.as_deref().unwrap_or("None")
    );

    #[cfg(feature = "odbc")]
    {
        let connection = odbc::OdbcConnection::connect(config.clone())?;
        Ok(Box::new(connection))
    }
    #[cfg(not(feature = "odbc"))]
    {
        Err(crate::error::SchemaDumpError::unsupported_feature(
            "HiveServer2 / Impala client",
            "Rebuild with the default `odbc` feature to enable the ODBC client",
        ))
    }
}
