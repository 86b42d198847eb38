//! Error types for schema dumping.
//!
//! The tool terminates on the first failure, so these variants exist to give
//! the final error message useful context rather than to drive recovery.
//! Nothing in this crate retries or skips past an error.

use thiserror::Error;

/// Main error type for schema dump operations.
#[derive(Debug, Error)]
pub enum SchemaDumpError {
    /// Invalid flag or environment value, detected before any network activity
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was wrong with the value
        message: String,
    },

    /// Connecting to HiveServer2 / Impala failed
    #[error("Connection failed: {context}")]
    Connection {
        /// Connection target or phase that failed
        context: String,
        /// Client library error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A metadata statement failed at the server or while fetching its rows
    #[error("Query execution failed: {statement}")]
    QueryExecution {
        /// Statement text as sent to the server
        statement: String,
        /// Client library error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A metadata row had fewer columns than the traversal reads
    #[error("Malformed result for '{statement}': expected {expected} column(s), got {actual}")]
    MalformedRow {
        /// Statement that produced the row
        statement: String,
        /// Minimum number of cells the traversal reads
        expected: usize,
        /// Number of cells the row had
        actual: usize,
    },

    /// A field cannot be written under the configured quoting mode
    #[error("CSV encoding failed for field {field:?}: {reason}")]
    Encoding {
        /// Offending field value
        field: String,
        /// Why it cannot be written
        reason: String,
    },

    /// Writing to the output stream failed
    #[error("I/O operation failed: {context}")]
    Io {
        /// Operation that failed
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A backend that was not compiled into this binary
    #[error("Unsupported operation: {feature} ({hint})")]
    UnsupportedFeature {
        /// Missing capability
        feature: String,
        /// How to enable it
        hint: String,
    },
}

/// Convenience type alias for Results with `SchemaDumpError`
pub type Result<T> = std::result::Result<T, SchemaDumpError>;

impl SchemaDumpError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a connection error with context
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a query execution error for the statement that failed
    pub fn query_failed<E>(statement: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QueryExecution {
            statement: statement.into(),
            source: Box::new(error),
        }
    }

    /// Creates a malformed row error
    pub fn malformed_row(statement: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::MalformedRow {
            statement: statement.into(),
            expected,
            actual,
        }
    }

    /// Creates an encoding error for a field that needs escaping
    pub fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates an unsupported feature error
    pub fn unsupported_feature(feature: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            hint: hint.into(),
        }
    }
}

impl From<csv::Error> for SchemaDumpError {
    fn from(error: csv::Error) -> Self {
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::io("Failed to write CSV output", source),
            other => Self::encoding(String::new(), format!("{other:?}")),
        }
    }
}
