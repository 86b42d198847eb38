//! Core library for dumping Hive / Impala schemas to CSV.
//!
//! Connects to HiveServer2 or Impala, walks every database, table and column
//! with `show databases`, `show tables` and `describe`, and streams one
//! `database,table,column,type` record per column.
//!
//! # Architecture
//! - `adapters`: connection/cursor traits, configuration and the ODBC client
//! - `dumper`: the sequential metadata traversal
//! - `output`: the streaming CSV sink
//! - `error` / `logging`: error taxonomy and the stderr diagnostic sink
//!
//! Everything runs on one connection, one statement at a time. The first
//! failure ends the dump.

pub mod adapters;
pub mod dumper;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use adapters::{
    AuthMechanism, ConnectionConfig, HiveConnection, HiveCursor, OutputConfig, Quoting, connect,
};
pub use dumper::SchemaDumper;
pub use error::{Result, SchemaDumpError};
pub use logging::init_logging;
pub use models::{CSV_HEADER, DumpSummary, Engine, SchemaRow};
pub use output::CsvSink;
