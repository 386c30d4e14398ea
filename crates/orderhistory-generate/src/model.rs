use serde::{Deserialize, Serialize};

use orderhistory_core::GeneratedOrder;
use orderhistory_store::IntegrityReport;

use crate::ids::IdRange;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for a reproducible run; a fresh seed is drawn when unset.
    pub seed: Option<u64>,
    /// Audit the written rows before committing.
    pub verify_integrity: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            verify_integrity: true,
        }
    }
}

/// How much data to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub customers: u64,
    pub orders: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: Option<u64>,
    pub items: u64,
    pub orders: u64,
    pub order_lines: u64,
    pub basket_attempts: u64,
    pub skipped_picks: u64,
    pub order_ids: IdRange,
    pub customer_ids: IdRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<IntegrityReport>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(
        run_id: String,
        seed: Option<u64>,
        order_ids: IdRange,
        customer_ids: IdRange,
    ) -> Self {
        Self {
            run_id,
            seed,
            items: 0,
            orders: 0,
            order_lines: 0,
            basket_attempts: 0,
            skipped_picks: 0,
            order_ids,
            customer_ids,
            integrity: None,
            duration_ms: 0,
        }
    }

    pub fn record_order(&mut self, generated: &GeneratedOrder) {
        self.orders += 1;
        self.order_lines += generated.lines.len() as u64;
        self.basket_attempts += u64::from(generated.attempts);
        self.skipped_picks += u64::from(generated.skipped_picks());
    }
}
