//! Randomized date values for test fixtures.
//!
//! # Responsibility
//! - Produce calendar dates uniformly spread over the full supported year
//!   range, with time-of-day zeroed.
//!
//! # Invariants
//! - Generated values always fall on midnight.
//! - Generated years stay within `MIN_YEAR..=MAX_YEAR`.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rand::Rng;

/// Earliest generated year.
pub const MIN_YEAR: i32 = 1;
/// Latest generated year.
pub const MAX_YEAR: i32 = 9999;

/// Returns a random midnight date using the thread-local RNG.
pub fn random_date() -> NaiveDateTime {
    random_date_from(&mut rand::thread_rng())
}

/// Returns a random midnight date from the provided RNG.
///
/// The year is uniform over `MIN_YEAR..=MAX_YEAR` and the day is uniform
/// within the drawn year, so leap days appear with their natural frequency.
pub fn random_date_from<R: Rng + ?Sized>(rng: &mut R) -> NaiveDateTime {
    let year = rng.gen_range(MIN_YEAR..=MAX_YEAR);
    let days_in_year = NaiveDate::from_ymd_opt(year, 12, 31)
        .expect("valid end-of-year date")
        .ordinal();
    let ordinal = rng.gen_range(1..=days_in_year);

    NaiveDate::from_yo_opt(year, ordinal)
        .expect("ordinal stays within the drawn year")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}
