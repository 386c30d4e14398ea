use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use orderhistory_core::Catalog;
use orderhistory_store::OrderStore;

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, GenerationRequest};
use crate::orders::OrderGenerator;

/// Entry point for generating an order history into a store.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Order iterator for `request`, seeded from the options.
    pub fn orders<'a>(
        &self,
        catalog: &'a Catalog,
        request: &GenerationRequest,
    ) -> Result<OrderGenerator<'a, ChaCha8Rng>, GenerationError> {
        let rng = match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        OrderGenerator::new(catalog, request, rng)
    }

    /// Create the tables in `store` and fill them in one transaction.
    ///
    /// Nothing is committed unless every row was written and, when enabled,
    /// the integrity audit came back clean.
    pub async fn run(
        &self,
        catalog: &Catalog,
        request: &GenerationRequest,
        store: &OrderStore,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let generator = self.orders(catalog, request)?;
        let mut report = GenerationReport::new(
            run_id.clone(),
            self.options.seed,
            generator.order_ids(),
            generator.customer_ids(),
        );

        info!(
            run_id = %run_id,
            items = catalog.len(),
            customers = request.customers,
            orders = request.orders,
            min_order_id = report.order_ids.min,
            min_customer_id = report.customer_ids.min,
            seed = ?self.options.seed,
            "generation started"
        );

        let outcome = self.write_all(catalog, generator, store, &mut report).await;
        report.duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    orders = report.orders,
                    order_lines = report.order_lines,
                    skipped_picks = report.skipped_picks,
                    duration_ms = report.duration_ms,
                    "generation completed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                Err(err)
            }
        }
    }

    async fn write_all<R: rand::Rng>(
        &self,
        catalog: &Catalog,
        generator: OrderGenerator<'_, R>,
        store: &OrderStore,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let mut writer = store.begin().await?;
        writer.create_schema().await?;
        writer.insert_items(catalog.items()).await?;
        report.items = catalog.len() as u64;
        debug!(items = report.items, "catalog written");

        for generated in generator {
            let generated = generated?;
            writer.insert_order(&generated).await?;
            report.record_order(&generated);
        }
        debug!(
            orders = report.orders,
            order_lines = report.order_lines,
            "orders written"
        );

        if self.options.verify_integrity {
            let integrity = writer.check_integrity().await?;
            if !integrity.is_clean() {
                return Err(GenerationError::Integrity(integrity));
            }
            debug!("integrity audit clean");
            report.integrity = Some(integrity);
        }

        writer.commit().await?;
        Ok(())
    }
}
