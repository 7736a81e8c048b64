use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pix_ledger::domain::ports::LedgerStoreHandle;
use pix_ledger::infrastructure::in_memory::InMemoryLedger;
use pix_ledger::interfaces::cli::Cli;
use std::path::PathBuf;
use std::sync::Arc;

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pix_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreHandle> {
    use pix_ledger::infrastructure::rocksdb::RocksDbLedger;

    match db_path {
        Some(path) => {
            let store = RocksDbLedger::open(path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryLedger::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreHandle> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Arc::new(InMemoryLedger::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = open_store(cli.db_path)?;
    pix_ledger::interfaces::cli::run(cli.command, store)
        .await
        .into_diagnostic()?;

    Ok(())
}
