use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use orderhistory_cli::CliError;
use orderhistory_cli::registry::{init_logging, report_path_for, write_report};
use orderhistory_core::load_catalog;
use orderhistory_generate::{GenerateOptions, GenerationEngine, GenerationPlan, GenerationRequest};
use orderhistory_store::{DEFAULT_DATABASE, OrderStore};

#[derive(Parser, Debug)]
#[command(
    name = "generateorders",
    version,
    about = "Generate a fictitious order history into orderhistory.db"
)]
struct Cli {
    /// Item catalog: a header line, then one `id,name,price` record per line.
    catalog: PathBuf,
    /// Number of customers orders are spread over.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    customers: u64,
    /// Number of orders to generate.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    orders: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging("info")?;
    run_generate(cli, Path::new(DEFAULT_DATABASE)).await
}

async fn run_generate(cli: Cli, database: &Path) -> Result<(), CliError> {
    let Cli {
        catalog,
        customers,
        orders,
    } = cli;
    let timer = Instant::now();

    let items = load_catalog(&catalog)?;
    tracing::info!(event = "catalog_loaded", path = %catalog.display(), items = items.len());

    let request = GenerationRequest { customers, orders };
    let plan = GenerationPlan::new(&items, &request)?;
    tracing::info!(
        event = "plan_checked",
        min_order_id = plan.order_ids.min,
        min_customer_id = plan.customer_ids.min
    );

    let store = OrderStore::create(database).await?;
    let engine = GenerationEngine::new(GenerateOptions::default());
    let outcome = engine.run(&items, &request, &store).await;
    store.close().await;
    let report = outcome?;

    let report_path = report_path_for(database);
    write_report(&report_path, &report)?;
    tracing::info!(event = "report_written", path = %report_path.display());

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("Database successfully written to {}", database.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("generateorders").chain(args.iter().copied()))
    }

    fn temp_path(label: &str, extension: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "generateorders_{label}_{}.{extension}",
            uuid::Uuid::new_v4()
        ));
        path
    }

    #[test]
    fn accepts_catalog_and_positive_counts() {
        let cli = parse(&["items.csv", "5", "10"]).expect("valid arguments");
        assert_eq!(cli.catalog, PathBuf::from("items.csv"));
        assert_eq!((cli.customers, cli.orders), (5, 10));
    }

    #[test]
    fn rejects_zero_counts() {
        let err = parse(&["items.csv", "0", "10"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        let err = parse(&["items.csv", "5", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_negative_counts() {
        assert!(parse(&["items.csv", "-3", "10"]).is_err());
        assert!(parse(&["items.csv", "5", "-3"]).is_err());
    }

    #[test]
    fn rejects_non_integer_counts() {
        let err = parse(&["items.csv", "abc", "10"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(parse(&["items.csv", "5", "2.5"]).is_err());
    }

    #[test]
    fn requires_exactly_three_arguments() {
        let err = parse(&["items.csv", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(parse(&[]).is_err());
        assert!(parse(&["items.csv", "5", "10", "extra"]).is_err());
    }

    #[tokio::test]
    async fn empty_catalog_creates_no_database() {
        let catalog = temp_path("empty_catalog", "csv");
        std::fs::write(&catalog, "itemid,itemname,itemprice\n").expect("write catalog");
        let database = temp_path("empty_catalog", "db");

        let cli = Cli {
            catalog: catalog.clone(),
            customers: 5,
            orders: 10,
        };
        let err = run_generate(cli, &database).await.unwrap_err();

        assert!(matches!(err, CliError::Generation(_)), "{err:?}");
        assert!(!database.exists());
        let _ = std::fs::remove_file(catalog);
    }
}
