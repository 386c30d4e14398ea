//! Skewed sampling of basket sizes and line quantities.
//!
//! Both draws use the same shape: `floor(e - log_b(U)) + 1` with `U` uniform
//! over `1..=floor(b^e)`. Most draws land on 1 and the value `e + 1` only
//! appears when `U == 1`.

use rand::Rng;

/// Base of the basket-size draw; the exponent is the catalog size.
pub const BASKET_BASE: f64 = 1.5;
pub const QUANTITY_BASE: f64 = 4.0;
pub const QUANTITY_EXPONENT: u32 = 12;
/// Largest quantity a single line can carry.
pub const MAX_QUANTITY: u32 = QUANTITY_EXPONENT + 1;

// Integer draws above 2^53 lose precision once converted to f64.
const MAX_EXACT_DRAW: f64 = 9_007_199_254_740_992.0;

/// Draw `floor(exponent - log_base(U)) + 1`, in `1..=exponent + 1`.
///
/// When `floor(base^exponent)` is too large for exact integer draws, `U` is
/// taken in log space: `log_base(U) = exponent + log_base(u)` with `u`
/// uniform on `(0, 1]`.
pub fn skewed_draw<R: Rng + ?Sized>(rng: &mut R, base: f64, exponent: u32) -> u32 {
    let exponent_f = f64::from(exponent);
    let upper = base.powf(exponent_f).floor();

    let log_draw = if upper <= MAX_EXACT_DRAW {
        let draw = rng.random_range(1..=upper as u64);
        (draw as f64).log(base)
    } else {
        let unit = 1.0 - rng.random::<f64>();
        exponent_f + unit.log(base)
    };

    let steps = (exponent_f - log_draw).floor().max(0.0) as u32;
    steps.saturating_add(1).min(exponent.saturating_add(1))
}

/// Number of item picks for one order, in `1..=item_count`.
pub fn basket_attempts<R: Rng + ?Sized>(rng: &mut R, item_count: u32) -> u32 {
    skewed_draw(rng, BASKET_BASE, item_count).min(item_count.max(1))
}

/// Units of one item on a line, in `1..=MAX_QUANTITY`.
pub fn line_quantity<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    skewed_draw(rng, QUANTITY_BASE, QUANTITY_EXPONENT)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn histogram(draws: impl Iterator<Item = u32>) -> BTreeMap<u32, u32> {
        let mut counts = BTreeMap::new();
        for value in draws {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn quantities_stay_in_range_and_favor_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let counts = histogram((0..20_000).map(|_| line_quantity(&mut rng)));

        assert!(counts.keys().all(|q| (1..=MAX_QUANTITY).contains(q)));
        // P(q = 1) = P(U > 4^11) = 3/4
        let ones = f64::from(counts.get(&1).copied().unwrap_or(0)) / 20_000.0;
        assert!((0.72..0.78).contains(&ones), "share of ones: {ones}");
        assert!(counts.get(&2).copied().unwrap_or(0) > counts.get(&3).copied().unwrap_or(0));
    }

    #[test]
    fn three_item_basket_is_uniform_over_one_to_three() {
        // floor(1.5^3) = 3: U = 1 -> 4 (kept at 3), U = 2 -> 2, U = 3 -> 1
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let counts = histogram((0..3_000).map(|_| basket_attempts(&mut rng, 3)));

        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        for count in counts.values() {
            assert!((850..1150).contains(count), "{counts:?}");
        }
    }

    #[test]
    fn single_item_basket_is_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..100).all(|_| basket_attempts(&mut rng, 1) == 1));
    }

    #[test]
    fn large_catalog_uses_log_space_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let draws: Vec<u32> = (0..5_000).map(|_| basket_attempts(&mut rng, 500)).collect();

        assert!(draws.iter().all(|n| (1..=500).contains(n)));
        let mean = draws.iter().map(|n| f64::from(*n)).sum::<f64>() / draws.len() as f64;
        // geometric tail with ratio 2/3 has mean 3
        assert!((2.5..3.5).contains(&mean), "mean basket attempts: {mean}");
    }

    #[test]
    fn exact_and_log_space_paths_agree_in_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let small = histogram((0..20_000).map(|_| basket_attempts(&mut rng, 60)));
        let large = histogram((0..20_000).map(|_| basket_attempts(&mut rng, 200)));

        let share = |counts: &BTreeMap<u32, u32>| {
            f64::from(counts.get(&1).copied().unwrap_or(0)) / 20_000.0
        };
        // P(n = 1) = 1 - 1/1.5
        assert!((share(&small) - 1.0 / 3.0).abs() < 0.02);
        assert!((share(&large) - 1.0 / 3.0).abs() < 0.02);
    }

    #[test]
    fn zero_exponent_draws_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(skewed_draw(&mut rng, BASKET_BASE, 0), 1);
    }
}
