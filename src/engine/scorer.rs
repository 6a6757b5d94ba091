//! Per-answer scoring and per-topic aggregation.

/// Score one answered question. `answered_correct` counts the correct
/// options the candidate selected, `total_correct` the correct options the
/// question carries. Single-select is the `total_correct == 1` special
/// case of the same rule; partial credit applies to multi-select only.
pub fn answer_score(weight: f64, k: f64, answered_correct: usize, total_correct: usize) -> f64 {
    if total_correct == 0 || answered_correct == 0 {
        return 0.0;
    }

    let raw = if answered_correct == total_correct {
        weight
    } else {
        weight * (answered_correct as f64 / total_correct as f64)
    };

    (k * raw).max(0.0)
}

/// Reporting-only aggregate: the topic's weight scaled by the mean answer
/// score, or 0 for a topic that was never answered.
pub fn topic_score(scores: &[f64], topic_weight: f64) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    topic_weight * mean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_credit_when_all_correct_selected() {
        assert!((answer_score(0.6, 1.0, 3, 3) - 0.6).abs() < 1e-12);
        assert!((answer_score(0.6, 1.5, 1, 1) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn zero_when_nothing_correct_selected() {
        for k in [0.0, 0.5, 1.0, 1.5] {
            assert_eq!(answer_score(0.6, k, 0, 3), 0.0);
        }
    }

    #[test]
    fn partial_credit_is_proportional() {
        let score = answer_score(0.9, 1.0, 2, 3);
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn negative_coefficient_floors_at_zero() {
        assert_eq!(answer_score(0.6, -0.2, 3, 3), 0.0);
    }

    #[test]
    fn topic_score_of_empty_history_is_zero() {
        assert_eq!(topic_score(&[], 0.8), 0.0);
    }

    #[test]
    fn topic_score_scales_mean_by_weight() {
        let score = topic_score(&[0.2, 0.4, 0.6], 0.5);
        assert!((score - 0.2).abs() < 1e-12);
    }
}
