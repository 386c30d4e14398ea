use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

use orderhistory_core::{Catalog, GeneratedOrder, Order, OrderLine};

use crate::errors::GenerationError;
use crate::ids::IdRange;
use crate::model::GenerationRequest;
use crate::sampling::{basket_attempts, line_quantity};

pub const FIRST_YEAR: i32 = 2000;
pub const LAST_YEAR: i32 = 2014;
/// Every month has at least this many days.
pub const LAST_DAY: u32 = 28;

/// Validated shape of a run: catalog size and both id ranges.
///
/// Building a plan touches no store, so callers can reject bad input before
/// creating any output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub item_count: u32,
    pub order_ids: IdRange,
    pub customer_ids: IdRange,
}

impl GenerationPlan {
    pub fn new(catalog: &Catalog, request: &GenerationRequest) -> Result<Self, GenerationError> {
        if catalog.is_empty() {
            return Err(GenerationError::InvalidArgument(
                "catalog has no items".to_string(),
            ));
        }
        let item_count = u32::try_from(catalog.len()).map_err(|_| {
            GenerationError::InvalidArgument(format!(
                "catalog has too many items ({})",
                catalog.len()
            ))
        })?;
        let order_ids = IdRange::for_count(request.orders, "order")?;
        let customer_ids = IdRange::for_count(request.customers, "customer")?;

        Ok(Self {
            item_count,
            order_ids,
            customer_ids,
        })
    }
}

/// Iterator over generated orders in increasing order-id order.
///
/// Each order draws a customer, a timestamp, and a number of item picks.
/// A pick that lands on an item already in the basket is skipped, not
/// redrawn, so a basket can hold fewer items than picks.
pub struct OrderGenerator<'a, R> {
    catalog: &'a Catalog,
    plan: GenerationPlan,
    next_index: u64,
    rng: R,
}

impl<'a, R: Rng> OrderGenerator<'a, R> {
    pub fn new(
        catalog: &'a Catalog,
        request: &GenerationRequest,
        rng: R,
    ) -> Result<Self, GenerationError> {
        let plan = GenerationPlan::new(catalog, request)?;
        Ok(Self {
            catalog,
            plan,
            next_index: 0,
            rng,
        })
    }

    pub fn order_ids(&self) -> IdRange {
        self.plan.order_ids
    }

    pub fn customer_ids(&self) -> IdRange {
        self.plan.customer_ids
    }

    fn generate(&mut self, order_id: i64) -> Result<GeneratedOrder, GenerationError> {
        let customer_ids = self.plan.customer_ids;
        let customer_offset = self.rng.random_range(0..customer_ids.count);
        let customer_id = customer_ids.min + customer_offset as i64;
        debug_assert!(customer_ids.contains(customer_id));
        let placed_at = random_timestamp(&mut self.rng)?;
        let attempts = basket_attempts(&mut self.rng, self.plan.item_count);

        let mut chosen = HashSet::with_capacity(attempts as usize);
        let mut lines = Vec::new();
        let mut total = 0.0;

        for _ in 0..attempts {
            let index = self.rng.random_range(0..self.catalog.len());
            if !chosen.insert(index) {
                continue;
            }
            let Some(item) = self.catalog.get(index) else {
                continue;
            };
            let quantity = line_quantity(&mut self.rng);
            total += item.price * f64::from(quantity);
            lines.push(OrderLine {
                order_id,
                item_id: item.id.clone(),
                quantity,
            });
        }

        Ok(GeneratedOrder {
            order: Order {
                order_id,
                placed_at,
                customer_id,
                total,
            },
            lines,
            attempts,
        })
    }
}

impl<R: Rng> Iterator for OrderGenerator<'_, R> {
    type Item = Result<GeneratedOrder, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let order_id = self.plan.order_ids.nth(self.next_index)?;
        self.next_index += 1;
        Some(self.generate(order_id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.order_ids.count.saturating_sub(self.next_index);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

fn random_timestamp<R: Rng + ?Sized>(rng: &mut R) -> Result<NaiveDateTime, GenerationError> {
    let year = rng.random_range(FIRST_YEAR..=LAST_YEAR);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=LAST_DAY);
    let hour = rng.random_range(0..24);
    let minute = rng.random_range(0..60);
    let second = rng.random_range(0..60);
    order_timestamp(year, month, day, hour, minute, second)
}

/// Calendar timestamp from drawn components; a day past the month's end is an error.
fn order_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime, GenerationError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            GenerationError::Timestamp(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        })
}
