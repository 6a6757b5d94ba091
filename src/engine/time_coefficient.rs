//! Time-based performance coefficient.
//!
//! K multiplies the raw answer score depending on how the elapsed time
//! compares to the grade's expected average. The function is piecewise
//! linear and continuous at the r = 0.5, 1 and 1.5 seams:
//!
//! - implausibly fast answers (r <= 0.5) scale linearly from 0 up to `max`,
//! - comfortably fast answers (0.5 < r <= 1) decay from `max` down to 1,
//! - the expected window (1 < r <= 1.5) is neutral,
//! - slow answers (r > 1.5) decay from 1 toward `min`.
//!
//! `min` and `max` come from the grade's time range and must satisfy
//! `0 < min < 1 < max`; that is a configuration precondition checked by
//! `GradingConfig::validate`, not re-checked here.

use crate::engine::types::TimeRange;

pub fn time_coefficient(elapsed_seconds: f64, time: &TimeRange) -> f64 {
    let r = elapsed_seconds / time.average;

    if r <= 0.5 {
        time.max * (r / 0.5)
    } else if r <= 1.0 {
        1.0 + (time.max - 1.0) * ((1.0 - r) / 0.5)
    } else if r <= 1.5 {
        1.0
    } else {
        1.0 - (1.0 - time.min) * ((r - 1.5) / 0.5)
    }
}
