//! Asymptotic growth/decay of a topic's weight after each answer.
//!
//! The step size shrinks as the weight approaches the relevant band edge,
//! damped further by poor rolling accuracy. A correct answer on a
//! harder-than-current question nudges the step up; an incorrect answer on
//! an easier-than-current question is penalized much more heavily than one
//! on a harder question.

use crate::engine::types::WeightRange;

/// Minimum distance-to-edge so the step never collapses to zero at a
/// boundary.
const MIN_EDGE_DISTANCE: f64 = 0.09;

/// Rolling accuracy below this halves the step.
const ACCURACY_DAMPING_THRESHOLD: f64 = 0.7;

/// Difficulty above this earns a growth bonus, scaling to +50% at 1.0.
const DIFFICULTY_BONUS_THRESHOLD: f64 = 0.7;

pub struct WeightStep<'a> {
    pub band: &'a WeightRange,
    /// Whether the just-answered question scored above zero.
    pub increase: bool,
    pub difficulty: f64,
    pub rolling_accuracy: f64,
    /// Whether the current grade has a lower rung to fall back to.
    pub has_previous_grade: bool,
    pub gain_rate: f64,
    pub less_rate: f64,
}

/// Apply one step to `weight` given the weight `question_weight` of the
/// question that was just answered.
///
/// The result is clamped into the band except in one deliberate case: a
/// decrease may land below `band.min` and is returned unclamped when a
/// previous grade exists, so the sub-minimum value can feed the demotion
/// decision. Only a bottom-rung grade pins the result to `band.min`.
pub fn update_weight(weight: f64, question_weight: f64, step: &WeightStep<'_>) -> f64 {
    let accuracy_factor = if step.rolling_accuracy < ACCURACY_DAMPING_THRESHOLD {
        0.5
    } else {
        1.0
    };

    let delta = if step.increase {
        let edge = (step.band.max - weight).max(MIN_EDGE_DISTANCE);
        let mut delta = step.gain_rate * edge * accuracy_factor;
        if step.difficulty > DIFFICULTY_BONUS_THRESHOLD {
            let over = (step.difficulty - DIFFICULTY_BONUS_THRESHOLD)
                / (1.0 - DIFFICULTY_BONUS_THRESHOLD);
            delta += delta * 0.5 * over;
        }
        delta * (1.0 + (question_weight - weight).clamp(-0.1, 0.2))
    } else {
        let edge = (weight - step.band.min).max(MIN_EDGE_DISTANCE);
        let base = step.less_rate * edge * accuracy_factor;
        -base * (1.0 - step.difficulty) * (4.0 + (weight - question_weight))
    };

    let candidate = weight + delta;
    if candidate >= step.band.min {
        candidate.clamp(step.band.min, step.band.max)
    } else if step.has_previous_grade {
        candidate
    } else {
        step.band.min
    }
}
