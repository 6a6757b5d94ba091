//! Estimate how hard a topic currently feels to the candidate.
//!
//! Blends recent accuracy with normalized response time: a topic behaves
//! as "hard" when the candidate is both less accurate and slower,
//! independent of any single question's nominal weight.

/// Answers required before history outweighs the neutral prior.
const MIN_HISTORY: usize = 3;

/// Neutral estimate returned while history is too short.
const NEUTRAL: f64 = 0.5;

pub fn difficulty(
    correct_count: usize,
    total_count: usize,
    avg_time_seconds: f64,
    max_time_seconds: f64,
) -> f64 {
    if total_count < MIN_HISTORY {
        return NEUTRAL;
    }

    let accuracy = correct_count as f64 / total_count as f64;
    let time_factor = if max_time_seconds > 0.0 {
        (avg_time_seconds / max_time_seconds).min(1.0)
    } else {
        1.0
    };

    (0.5 * (1.0 - accuracy) + 0.5 * time_factor).clamp(0.0, 1.0)
}
