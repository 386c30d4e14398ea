use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use orderhistory_core::{Error, GeneratedOrder, Item, OrderDetail, OrderSummary, Result};

mod integrity;
mod queries;
mod schema;

pub use integrity::IntegrityReport;

/// Handle to an order-history database file.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl OrderStore {
    /// Open the database at `path`, creating the file if it does not exist.
    pub async fn create(path: &Path) -> Result<Self> {
        Self::connect(path, true).await
    }

    /// Open an existing database; a missing file is an error.
    pub async fn open(path: &Path) -> Result<Self> {
        Self::connect(path, false).await
    }

    async fn connect(path: &Path, create: bool) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        debug!(path = %path.display(), create, "store opened");

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start the single write transaction of a generation run.
    pub async fn begin(&self) -> Result<OrderWriter> {
        let tx = self.pool.begin().await.map_err(db_error)?;
        Ok(OrderWriter { tx })
    }

    /// All orders placed by `customer_id`, oldest first.
    pub async fn orders_for_customer(&self, customer_id: i64) -> Result<Vec<OrderSummary>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        queries::orders_for_customer(&mut *conn, customer_id).await
    }

    /// Line items of `order_id` joined with their catalog entries.
    pub async fn order_details(&self, order_id: i64) -> Result<Vec<OrderDetail>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        queries::order_details(&mut *conn, order_id).await
    }

    pub async fn check_integrity(&self) -> Result<IntegrityReport> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        integrity::check_integrity(&mut *conn).await
    }

    pub async fn close(self) {
        self.pool.close().await;
        debug!(path = %self.path.display(), "store closed");
    }
}

/// Open write transaction. Dropping it without [`OrderWriter::commit`] rolls
/// every statement back.
pub struct OrderWriter {
    tx: Transaction<'static, Sqlite>,
}

impl OrderWriter {
    pub async fn create_schema(&mut self) -> Result<()> {
        schema::create_schema(&mut *self.tx).await
    }

    pub async fn insert_items(&mut self, items: &[Item]) -> Result<()> {
        for item in items {
            queries::insert_item(&mut *self.tx, item).await?;
        }
        Ok(())
    }

    /// Write the order row, then each of its lines.
    pub async fn insert_order(&mut self, generated: &GeneratedOrder) -> Result<()> {
        queries::insert_order(&mut *self.tx, &generated.order).await?;
        for line in &generated.lines {
            queries::insert_line(&mut *self.tx, line).await?;
        }
        Ok(())
    }

    /// Audit the rows written so far in this transaction.
    pub async fn check_integrity(&mut self) -> Result<IntegrityReport> {
        integrity::check_integrity(&mut *self.tx).await
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(db_error)
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(db_error)
    }
}

pub(crate) fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}
