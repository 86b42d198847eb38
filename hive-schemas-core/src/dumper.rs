//! Database → table → column traversal.
//!
//! # Statements issued
//! - `show databases` on the top-level cursor
//! - `use <db>` then `show tables` on a fresh cursor per database
//! - `use <db>` then `describe <table>` on a fresh cursor per table
//!
//! Identifiers are interpolated into the statement text; the client does not
//! bind parameters for identifiers. `use` is repeated before every
//! `describe` because session state is not assumed to survive across cursors.

use crate::adapters::{HiveConnection, HiveCursor};
use crate::models::{DumpSummary, SchemaRow};
use crate::output::CsvSink;
use crate::{Result, error::SchemaDumpError};
use std::io::Write;

/// Walks every database, table and column reachable through one connection.
pub struct SchemaDumper<'c, C: HiveConnection + ?Sized> {
    connection: &'c C,
}

impl<'c, C: HiveConnection + ?Sized> SchemaDumper<'c, C> {
    /// Creates a dumper over an already open connection.
    pub const fn new(connection: &'c C) -> Self {
        Self { connection }
    }

    /// Writes the header, then one row per column, in server order.
    ///
    /// Rows are streamed to `sink` as they are read. The first failure stops
    /// the dump; rows already written stay written and nothing is retried.
    ///
    /// # Errors
    /// Returns the first query, malformed row, encoding or I/O error.
    pub async fn dump<W: Write>(&self, sink: &mut CsvSink<W>) -> Result<DumpSummary> {
        let start_time = std::time::Instant::now();
        let mut summary = DumpSummary::default();

        sink.write_header()?;

        tracing::info!(
            "querying databases on {}",
            self.connection.connection_config()
        );
        let mut db_cursor = self.connection.cursor()?;
        run(&mut *db_cursor, "show databases").await?;

        while let Some(db_row) = db_cursor.fetch_row().await? {
            let database = first_cell(db_row, "show databases")?;
            summary.databases = summary.databases.saturating_add(1);

            self.dump_database(&database, sink, &mut summary).await?;
        }

        tracing::info!(
            "Schema dump completed in {:.2}s - {} databases, {} tables, {} columns",
            start_time.elapsed().as_secs_f64(),
            summary.databases,
            summary.tables,
            summary.columns
        );

        Ok(summary)
    }

    async fn dump_database<W: Write>(
        &self,
        database: &str,
        sink: &mut CsvSink<W>,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        tracing::info!("querying tables for database {}", database);

        let mut table_cursor = self.connection.cursor()?;
        run(&mut *table_cursor, &format!("use {database}")).await?;
        run(&mut *table_cursor, "show tables").await?;

        while let Some(table_row) = table_cursor.fetch_row().await? {
            let table = first_cell(table_row, "show tables")?;
            summary.tables = summary.tables.saturating_add(1);

            self.dump_table(database, &table, sink, summary).await?;
        }

        Ok(())
    }

    async fn dump_table<W: Write>(
        &self,
        database: &str,
        table: &str,
        sink: &mut CsvSink<W>,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        tracing::info!("describing table {}", table);

        let describe = format!("describe {table}");
        let mut column_cursor = self.connection.cursor()?;
        run(&mut *column_cursor, &format!("use {database}")).await?;
        run(&mut *column_cursor, &describe).await?;

        while let Some(column_row) = column_cursor.fetch_row().await? {
            if column_row.len() < 2 {
                return Err(SchemaDumpError::malformed_row(
                    &describe,
                    2,
                    column_row.len(),
                ));
            }
            // Types such as decimal(15,2) are passed through unparsed
            let mut cells = column_row.into_iter();
            let column = cells.next().unwrap_or_default();
            let column_type = cells.next().unwrap_or_default();

            sink.write_row(&SchemaRow {
                database: database.to_string(),
                table: table.to_string(),
                column,
                column_type,
            })?;
            summary.columns = summary.columns.saturating_add(1);
        }

        Ok(())
    }
}

/// Executes one statement, logging its text at debug level.
async fn run(cursor: &mut (dyn HiveCursor + '_), statement: &str) -> Result<()> {
    tracing::debug!("executing: {}", statement);
    cursor.execute(statement).await.map_err(|e| {
        tracing::error!("'{}' failed: {}", statement, e);
        e
    })
}

/// Takes the first cell of a single-column metadata row.
fn first_cell(row: Vec<String>, statement: &str) -> Result<String> {
    row.into_iter()
        .next()
        .ok_or_else(|| SchemaDumpError::malformed_row(statement, 1, 0))
}
