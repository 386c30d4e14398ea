use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Contiguous block of identifiers that all share one digit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub min: i64,
    pub max: i64,
    pub count: u64,
}

impl IdRange {
    /// `count` ids starting at `10^floor(log10(count))`.
    ///
    /// A count that is itself a power of ten starts at that power, so
    /// `for_count(100, ..)` covers `100..=199`.
    pub fn for_count(count: u64, label: &str) -> Result<Self, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidArgument(format!(
                "{label} count must be positive"
            )));
        }

        let min = 10_u64.pow(count.ilog10());
        let too_large =
            || GenerationError::InvalidArgument(format!("{label} count {count} is too large"));
        let max = min
            .checked_add(count - 1)
            .and_then(|max| i64::try_from(max).ok())
            .ok_or_else(too_large)?;
        let min = i64::try_from(min).map_err(|_| too_large())?;

        Ok(Self { min, max, count })
    }

    /// The id at position `index`, if inside the range.
    pub fn nth(&self, index: u64) -> Option<i64> {
        if index >= self.count {
            return None;
        }
        i64::try_from(index)
            .ok()
            .and_then(|offset| self.min.checked_add(offset))
    }

    pub fn contains(&self, id: i64) -> bool {
        (self.min..=self.max).contains(&id)
    }
}
