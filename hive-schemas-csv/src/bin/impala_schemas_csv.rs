//! Dumps all Impala schemas, tables, columns and types to CSV on stdout.
//!
//! Same flags as `hive_schemas_csv`, but the service principal defaults to
//! `impala` and the port to 21050 unless a flag or environment variable sets
//! one.

use hive_schemas_core::Engine;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    hive_schemas_csv::run(Engine::Impala).await
}
