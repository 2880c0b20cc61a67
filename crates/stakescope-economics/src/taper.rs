// crates/stakescope-economics/src/taper.rs
//
// Disinflation schedule inversion.
//
// The inflation rate decays by a fixed fraction (`taper`) per year:
//   current = historical * (1 - taper)^(years_elapsed)
// so an earlier rate is recovered with
//   historical = current / (1 - taper)^(days_elapsed / 365)
//
// This assumes the taper was constant over the whole interval and that the
// terminal floor had not been reached. It is a model, not a measurement.

use chrono::{DateTime, Utc};

/// Year length used when converting elapsed days into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Inflation rate `days_elapsed` days before a point where it was
/// `current_inflation`, given a constant yearly `taper`.
pub fn historical_inflation(current_inflation: f64, taper: f64, days_elapsed: f64) -> f64 {
    current_inflation / (1.0 - taper).powf(days_elapsed / DAYS_PER_YEAR)
}

/// Fractional days from `from` to `to`. Negative intervals clamp to zero.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let seconds = (to - from).num_seconds() as f64;
    (seconds / SECONDS_PER_DAY).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zero_elapsed_is_identity() {
        assert_eq!(historical_inflation(0.05, 0.15, 0.0), 0.05);
    }

    #[test]
    fn test_one_year_undoes_one_taper_step() {
        let historical = historical_inflation(0.0680, 0.15, DAYS_PER_YEAR);
        assert!((historical - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_in_days_elapsed() {
        let mut previous = historical_inflation(0.05, 0.15, 0.0);
        for days in [1.0, 30.0, 365.0, 900.0, 1_500.0] {
            let next = historical_inflation(0.05, 0.15, days);
            assert!(next > previous, "{} days: {} <= {}", days, next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_zero_taper_is_flat() {
        assert_eq!(historical_inflation(0.05, 0.0, 1_000.0), 0.05);
    }

    #[test]
    fn test_days_between() {
        let from = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2023, 2, 1, 12, 0, 0).unwrap();
        assert!((days_between(from, to) - 365.5).abs() < 1e-9);
    }

    #[test]
    fn test_days_between_clamps_future_reference() {
        let from = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(days_between(from, to), 0.0);
    }
}
