use std::path::PathBuf;

use clap::Parser;
use orderhistory_cli::CliError;
use orderhistory_cli::browse::run_browser;
use orderhistory_cli::registry::init_logging;
use orderhistory_store::{DEFAULT_DATABASE, OrderStore};

#[derive(Parser, Debug)]
#[command(name = "orderhistory", version, about = "Browse a generated order history")]
struct Cli {
    /// Database written by `generateorders`.
    #[arg(default_value = DEFAULT_DATABASE)]
    database: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging("warn")?;

    let store = OrderStore::open(&cli.database).await?;
    tracing::debug!(event = "store_opened", path = %store.path().display());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let outcome = run_browser(&store, stdin.lock(), &mut stdout).await;
    store.close().await;
    outcome
}
