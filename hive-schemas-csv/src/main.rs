//! Dumps all Hive schemas, tables, columns and types to CSV on stdout.
//!
//! Defaults to HiveServer2 on port 10000 with the `hive` service principal.
//! See `impala_schemas_csv` for the Impala defaults.

use hive_schemas_core::Engine;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    hive_schemas_csv::run(Engine::Hive).await
}
