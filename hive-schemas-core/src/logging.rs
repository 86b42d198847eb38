//! Diagnostic logging for the schema dump binaries.
//!
//! Logs always go to stderr so they never interleave with the CSV stream on
//! stdout.

use crate::Result;

/// Maps the `-v` count to a maximum log level.
///
/// Without `-v` only warnings and errors are shown; `-v` turns on the
/// informational trace of each connect/query phase.
pub fn level_for_verbosity(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initializes the process-wide diagnostic subscriber.
///
/// Must be called once, before any connection is attempted.
///
/// # Example
/// ```rust,no_run
/// use hive_schemas_core::logging::init_logging;
///
/// // -v: informational trace on stderr
/// init_logging(1).expect("Failed to initialize logging");
/// ```
///
/// # Errors
/// Returns a configuration error if a global subscriber is already installed.
pub fn init_logging(verbose: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for_verbosity(verbose))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::SchemaDumpError::configuration(format!(
                "Failed to initialize logging: {e}"
            ))
        })?;

    Ok(())
}
