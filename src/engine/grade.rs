//! Grade ladder transitions.
//!
//! Runs once per answered question, after the weight update and before the
//! user topic is persisted. The decision consumes the possibly-unclamped
//! updated weight: a value below the band minimum is the demotion signal
//! produced by `weight::update_weight`.

use crate::engine::config::GradingConfig;
use crate::engine::error::EngineError;
use crate::engine::types::{GradeShift, TransitionOutcome};

/// Decide the topic's next grade.
///
/// `raise_streak` is the fast-path signal from `streak::can_raise`; the
/// weight-threshold raise (`weight >= max - raise_data * (max - min)`) is
/// folded in here. On promotion or demotion the weight is clamped into the
/// destination band; holding at the bottom rung clamps to the band minimum.
pub fn transition(
    config: &GradingConfig,
    current_grade: &str,
    weight: f64,
    raise_streak: bool,
) -> Result<TransitionOutcome, EngineError> {
    let band = config.weight_range(current_grade)?;
    let relation = config.relation(current_grade)?;

    let raise_threshold = band.max - config.tunables.raise_data * (band.max - band.min);
    let can_raise = raise_streak || weight >= raise_threshold;

    if can_raise {
        return match &relation.next {
            Some(next) => {
                let next_band = config.weight_range(next)?;
                Ok(TransitionOutcome {
                    grade: next.clone(),
                    weight: weight.clamp(next_band.min, next_band.max),
                    shift: GradeShift::Promoted,
                })
            }
            // Already at the top rung.
            None => Ok(TransitionOutcome {
                grade: current_grade.to_string(),
                weight: weight.clamp(band.min, band.max),
                shift: GradeShift::Held,
            }),
        };
    }

    if weight < band.min {
        return match &relation.prev {
            Some(prev) => {
                let prev_band = config.weight_range(prev)?;
                Ok(TransitionOutcome {
                    grade: prev.clone(),
                    weight: weight.clamp(prev_band.min, prev_band.max),
                    shift: GradeShift::Demoted,
                })
            }
            // Bottom rung: no lower grade to fall back to.
            None => Ok(TransitionOutcome {
                grade: current_grade.to_string(),
                weight: band.min,
                shift: GradeShift::Held,
            }),
        };
    }

    Ok(TransitionOutcome {
        grade: current_grade.to_string(),
        weight: weight.clamp(band.min, band.max),
        shift: GradeShift::Held,
    })
}
