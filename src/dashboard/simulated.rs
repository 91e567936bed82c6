//! Placeholder weekly counters for salespeople who have not reported yet.

use rand::Rng;

use crate::models::WeekCounts;

/// Inclusive lower bound of a simulated bucket.
pub const SIMULATED_MIN: i64 = 10;
/// Inclusive upper bound of a simulated bucket.
pub const SIMULATED_MAX: i64 = 80;

/// Seven buckets drawn uniformly from `SIMULATED_MIN..=SIMULATED_MAX`.
pub fn simulated_week() -> WeekCounts {
    simulated_week_with(&mut rand::thread_rng())
}

pub fn simulated_week_with<R: Rng + ?Sized>(rng: &mut R) -> WeekCounts {
    WeekCounts::from_fn(|_| rng.gen_range(SIMULATED_MIN..=SIMULATED_MAX))
}
