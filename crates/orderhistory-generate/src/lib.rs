//! Order-history generation engine.
//!
//! Consumes an item catalog plus customer and order counts and produces
//! orders with skewed basket sizes and quantities, written to an
//! [`orderhistory_store::OrderStore`] in a single transaction.

pub mod engine;
pub mod errors;
pub mod ids;
pub mod model;
pub mod orders;
pub mod sampling;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use ids::IdRange;
pub use model::{GenerateOptions, GenerationReport, GenerationRequest};
pub use orders::{GenerationPlan, OrderGenerator};
