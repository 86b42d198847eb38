//! Data types shared by the traversal, the CSV sink and the binaries.

use serde::Serialize;

/// Field names written as the CSV header, in column order.
pub const CSV_HEADER: [&str; 4] = ["database", "table", "column", "type"];

/// The query engine a binary targets.
///
/// Only the defaults differ; Hive and Impala answer the same metadata
/// statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// HiveServer2
    #[default]
    Hive,
    /// Impala daemon (HiveServer2 protocol endpoint)
    Impala,
}

impl Engine {
    /// Default HiveServer2 port, also used for Impala until the Impala rule applies.
    pub const HIVE_PORT: u16 = 10000;
    /// Default Impala HiveServer2-protocol port.
    pub const IMPALA_PORT: u16 = 21050;

    /// Kerberos service principal used when none is given.
    pub const fn default_service_name(self) -> &'static str {
        match self {
            Self::Hive => "hive",
            Self::Impala => "impala",
        }
    }

    /// Port used when neither a flag nor an environment variable sets one.
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Hive => Self::HIVE_PORT,
            Self::Impala => Self::IMPALA_PORT,
        }
    }

    /// ODBC driver name registered by the Cloudera driver installers.
    pub const fn default_odbc_driver(self) -> &'static str {
        match self {
            Self::Hive => "Cloudera ODBC Driver for Apache Hive",
            Self::Impala => "Cloudera ODBC Driver for Impala",
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hive => write!(f, "Hive"),
            Self::Impala => write!(f, "Impala"),
        }
    }
}

/// One output record: a single column of a single table.
///
/// Rows are written as soon as they are built and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRow {
    /// Database (schema) name as returned by `show databases`
    pub database: String,
    /// Table name as returned by `show tables`
    pub table: String,
    /// Column name, first field of a `describe` row
    pub column: String,
    /// Column type, second field of a `describe` row, unparsed
    #[serde(rename = "type")]
    pub column_type: String,
}

impl SchemaRow {
    /// Creates a row from its four fields.
    pub fn new(
        database: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            column: column.into(),
            column_type: column_type.into(),
        }
    }
}

/// Counts reported once a dump completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Databases visited
    pub databases: u64,
    /// Tables described
    pub tables: u64,
    /// Rows written, excluding the header
    pub columns: u64,
}
