//! Configuration types for the client and the CSV sink.
//!
//! This module contains:
//! - `ConnectionConfig`: HiveServer2 / Impala connection settings
//! - `OutputConfig`: CSV delimiter, quote and escape characters
//! - `environment`: flag → environment → default resolution for host and port

mod connection;
pub mod environment;
mod output;

pub use connection::{AuthMechanism, ConnectionConfig};
pub use output::{OutputConfig, Quoting, parse_csv_char};
