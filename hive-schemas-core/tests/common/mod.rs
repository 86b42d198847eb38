//! In-memory HiveServer2 stand-in for traversal tests.
//!
//! Cursors keep their own current database, so a `describe` only succeeds
//! when a `use` was issued on the same cursor first.

#![allow(dead_code)]

use hive_schemas_core::{ConnectionConfig, HiveConnection, HiveCursor, Result, SchemaDumpError};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Columns of one table as (name, type).
pub type Columns = Vec<(String, String)>;

/// Scripted catalog plus a record of every statement issued against it.
#[derive(Debug, Default)]
pub struct MockConnection {
    databases: Vec<(String, Vec<(String, Columns)>)>,
    failing_statements: Vec<String>,
    malformed_statements: Vec<String>,
    config: ConnectionConfig,
    statements: RefCell<Vec<String>>,
    open_cursors: Cell<usize>,
    cursors_opened: Cell<usize>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a database with no tables.
    pub fn with_database(mut self, name: &str) -> Self {
        self.databases.push((name.to_string(), Vec::new()));
        self
    }

    /// Adds a table to the most recently added database.
    pub fn with_table(mut self, name: &str, columns: &[(&str, &str)]) -> Self {
        let columns = columns
            .iter()
            .map(|(column, column_type)| ((*column).to_string(), (*column_type).to_string()))
            .collect();
        if let Some((_, tables)) = self.databases.last_mut() {
            tables.push((name.to_string(), columns));
        }
        self
    }

    /// Makes `statement` fail at execution time.
    pub fn failing_on(mut self, statement: &str) -> Self {
        self.failing_statements.push(statement.to_string());
        self
    }

    /// Makes `statement` return single-cell rows.
    pub fn malformed_on(mut self, statement: &str) -> Self {
        self.malformed_statements.push(statement.to_string());
        self
    }

    /// Every statement executed, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    /// Cursors created but not yet dropped.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.get()
    }

    /// Cursors created over the lifetime of the connection.
    pub fn cursors_opened(&self) -> usize {
        self.cursors_opened.get()
    }

    fn tables(&self, database: &str) -> Option<&Vec<(String, Columns)>> {
        self.databases
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, tables)| tables)
    }
}

impl HiveConnection for MockConnection {
    fn cursor(&self) -> Result<Box<dyn HiveCursor + '_>> {
        self.open_cursors.set(self.open_cursors.get() + 1);
        self.cursors_opened.set(self.cursors_opened.get() + 1);
        Ok(Box::new(MockCursor {
            connection: self,
            current_database: None,
            rows: VecDeque::new(),
        }))
    }

    fn connection_config(&self) -> &ConnectionConfig {
        &self.config
    }
}

/// Cursor over [`MockConnection`] with its own session database.
pub struct MockCursor<'c> {
    connection: &'c MockConnection,
    current_database: Option<String>,
    rows: VecDeque<Vec<String>>,
}

impl Drop for MockCursor<'_> {
    fn drop(&mut self) {
        self.connection
            .open_cursors
            .set(self.connection.open_cursors.get() - 1);
    }
}

fn simulated(statement: &str, message: &str) -> SchemaDumpError {
    SchemaDumpError::query_failed(statement, std::io::Error::other(message.to_string()))
}

#[async_trait::async_trait(?Send)]
impl HiveCursor for MockCursor<'_> {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        self.connection
            .statements
            .borrow_mut()
            .push(statement.to_string());
        self.rows.clear();

        if self
            .connection
            .failing_statements
            .iter()
            .any(|s| s == statement)
        {
            return Err(simulated(statement, "simulated server error"));
        }

        let mut rows: Vec<Vec<String>> = if statement == "show databases" {
            self.connection
                .databases
                .iter()
                .map(|(name, _)| vec![name.clone()])
                .collect()
        } else if let Some(database) = statement.strip_prefix("use ") {
            if self.connection.tables(database).is_none() {
                return Err(simulated(statement, "database does not exist"));
            }
            self.current_database = Some(database.to_string());
            Vec::new()
        } else if statement == "show tables" {
            let database = self.current_database.as_deref().unwrap_or("default");
            self.connection
                .tables(database)
                .map(|tables| tables.iter().map(|(name, _)| vec![name.clone()]).collect())
                .unwrap_or_default()
        } else if let Some(table) = statement.strip_prefix("describe ") {
            let database = self
                .current_database
                .as_deref()
                .ok_or_else(|| simulated(statement, "no database selected"))?;
            let columns = self
                .connection
                .tables(database)
                .and_then(|tables| tables.iter().find(|(name, _)| name == table))
                .map(|(_, columns)| columns)
                .ok_or_else(|| simulated(statement, "table not found"))?;
            columns
                .iter()
                .map(|(column, column_type)| vec![column.clone(), column_type.clone()])
                .collect()
        } else {
            return Err(simulated(statement, "unsupported statement"));
        };

        if self
            .connection
            .malformed_statements
            .iter()
            .any(|s| s == statement)
        {
            for row in &mut rows {
                row.truncate(1);
            }
        }

        self.rows = rows.into();
        Ok(())
    }

    async fn fetch_row(&mut self) -> Result<Option<Vec<String>>> {
        Ok(self.rows.pop_front())
    }
}
