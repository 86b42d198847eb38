//! Command-line surface for `hive_schemas_csv` and `impala_schemas_csv`.
//!
//! Both binaries share this module; the entry point picks the [`Engine`],
//! which only changes defaults (service principal and port).

use anyhow::Context;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use hive_schemas_core::adapters::config::environment::{
    resolve_host, resolve_port, resolve_service_name,
};
use hive_schemas_core::adapters::parse_csv_char;
use hive_schemas_core::{
    ConnectionConfig, CsvSink, DumpSummary, Engine, OutputConfig, SchemaDumpError, SchemaDumper,
    connect, init_logging,
};
use tracing::info;

/// A `--quotechar` value; empty disables quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteChar(pub Option<u8>);

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match parse_csv_char("delimiter", value) {
        Ok(Some(delimiter)) => Ok(delimiter),
        Ok(None) => Err("delimiter cannot be empty".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_quotechar(value: &str) -> Result<QuoteChar, String> {
    parse_csv_char("quotechar", value)
        .map(QuoteChar)
        .map_err(|e| e.to_string())
}

fn parse_escapechar(value: &str) -> Result<u8, String> {
    match parse_csv_char("escapechar", value) {
        Ok(Some(escape)) => Ok(escape),
        Ok(None) => Err("escapechar cannot be empty".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// CLI arguments shared by both entry points.
#[derive(Parser, Debug)]
#[command(name = "hive_schemas_csv")]
#[command(about = "Dumps all Hive / Impala schemas, tables, columns and types to CSV format on stdout")]
#[command(version)]
#[command(long_about = "
Connects to a HiveServer2 or Impala daemon and dumps every database, table and
column as CSV on stdout:

    database,table,column,type

Quoted CSV is the default because Hive types such as decimal(15,2) contain the
delimiter. Quoting can be disabled with --quotechar='' but then any field
needing escaping requires --escapechar (eg. --escapechar='\\\\'), otherwise the
dump stops with an error.

Hive is the more reliable source for dumping large amounts of schema; Impala
metadata may also be out of date.

ENVIRONMENT:
  host: $HIVESERVER2_HOST, $HIVE_HOST, $IMPALA_HOST, $HOST (first set wins)
  port: $HIVESERVER2_PORT, $HIVE_PORT, $IMPALA_PORT, $PORT (first set wins)
")]
pub struct Cli {
    /// Server host
    #[arg(
        short = 'H',
        long,
        help = "HiveServer2 / Impala host (default: fqdn of local host, $HIVESERVER2_HOST, $HIVE_HOST, $IMPALA_HOST, $HOST)"
    )]
    pub host: Option<String>,

    /// Server port
    #[arg(
        short = 'P',
        long,
        help = "HiveServer2 / Impala port (default: 10000 for hive, 21050 for impala, $HIVESERVER2_PORT, $HIVE_PORT, $IMPALA_PORT, $PORT)"
    )]
    pub port: Option<u16>,

    /// Use Kerberos
    #[arg(short = 'k', long, help = "Use Kerberos (you must kinit first)")]
    pub kerberos: bool,

    /// Kerberos service principal
    #[arg(
        short = 'n',
        long = "krb5-service-name",
        help = "Service principal (default: 'hive', or 'impala' for impala_schemas_csv)"
    )]
    pub krb5_service_name: Option<String>,

    /// Use SSL
    #[arg(short = 'S', long, help = "Use SSL")]
    pub ssl: bool,

    /// CSV field delimiter
    #[arg(
        short = 'd',
        long,
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Delimiter to use"
    )]
    pub delimiter: u8,

    /// CSV quote character
    #[arg(
        short = 'Q',
        long,
        default_value = "\"",
        value_parser = parse_quotechar,
        help = "Generate quoted CSV (recommended), '' disables quoting"
    )]
    pub quotechar: QuoteChar,

    /// CSV escape character
    #[arg(short = 'E', long, value_parser = parse_escapechar, help = "Escape char if needed")]
    pub escapechar: Option<u8>,

    /// ODBC driver name
    #[arg(
        long,
        env = "HIVE_SCHEMAS_ODBC_DRIVER",
        help = "ODBC driver name (default: Cloudera ODBC Driver for Apache Hive / Impala)"
    )]
    pub driver: Option<String>,

    /// Increase verbosity
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Verbose mode (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

impl Cli {
    /// Resolves connection settings from flags, environment and `engine` defaults.
    ///
    /// # Errors
    /// Returns a configuration error for an invalid environment port or an
    /// otherwise invalid configuration.
    pub fn connection_config(&self, engine: Engine) -> hive_schemas_core::Result<ConnectionConfig> {
        let host = resolve_host(self.host.as_deref());
        let port = resolve_port(self.port, engine)?;
        let service_name = resolve_service_name(self.krb5_service_name.as_deref(), engine);
        let driver = self
            .driver
            .clone()
            .unwrap_or_else(|| engine.default_odbc_driver().to_string());

        let config = ConnectionConfig::new(host)
            .with_port(port)
            .with_kerberos(self.kerberos)
            .with_ssl(self.ssl)
            .with_service_name(service_name)
            .with_driver(driver);
        config.validate()?;
        Ok(config)
    }

    /// CSV settings from the delimiter, quote and escape flags.
    pub const fn output_config(&self) -> OutputConfig {
        OutputConfig {
            delimiter: self.delimiter,
            quote: self.quotechar.0,
            escape: self.escapechar,
        }
    }
}

/// Binary name for an engine.
pub const fn bin_name(engine: Engine) -> &'static str {
    match engine {
        Engine::Hive => "hive_schemas_csv",
        Engine::Impala => "impala_schemas_csv",
    }
}

/// The clap command, named after the entry point.
pub fn command(engine: Engine) -> clap::Command {
    Cli::command().name(bin_name(engine)).bin_name(bin_name(engine))
}

/// Parses `args` for `engine`.
///
/// # Errors
/// Returns the clap error for unknown flags or invalid values.
pub fn try_parse_from<I, T>(engine: Engine, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command(engine).try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

/// Opens the connection and streams the dump to stdout.
///
/// # Errors
/// Returns the first connection, query, encoding or I/O error.
pub async fn dump(
    connection_config: &ConnectionConfig,
    output_config: &OutputConfig,
) -> anyhow::Result<DumpSummary> {
    let connection = connect(connection_config)
        .await
        .with_context(|| format!("Failed to connect to {connection_config}"))?;

    let stdout = std::io::stdout();
    let mut sink = CsvSink::new(stdout.lock(), output_config);

    let summary = SchemaDumper::new(connection.as_ref())
        .dump(&mut sink)
        .await
        .context("Schema dump failed")?;

    Ok(summary)
}

/// Entry point shared by both binaries.
///
/// Invalid flags and environment values exit with a usage error before any
/// connection is attempted.
///
/// # Errors
/// Returns any error from logging setup, connecting or dumping.
pub async fn run(engine: Engine) -> anyhow::Result<()> {
    let cli = try_parse_from(engine, std::env::args_os()).unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose)?;

    let connection_config = match cli.connection_config(engine) {
        Ok(config) => config,
        Err(e @ SchemaDumpError::Configuration { .. }) => command(engine)
            .error(clap::error::ErrorKind::InvalidValue, e.to_string())
            .exit(),
        Err(e) => return Err(e.into()),
    };
    let output_config = cli.output_config();

    let summary = dump(&connection_config, &output_config).await?;
    info!(
        "dumped {} columns from {} tables in {} databases",
        summary.columns, summary.tables, summary.databases
    );

    Ok(())
}
