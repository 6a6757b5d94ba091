//! End-of-session behavioral metrics, computed once over the full answer
//! history when a session closes.

use serde::{Deserialize, Serialize};

use crate::engine::types::AnswerSample;

/// Answers required before the stability index means anything.
const MIN_HISTORY: usize = 3;

/// Normalization base for the average answer time, in seconds.
const TIME_NORM_BASE: f64 = 90.0;

/// Minimum winning score for a named thinking pattern.
const PATTERN_MIN_SCORE: u32 = 2;

// Per-category thresholds for the point-scored classifier.
const ANALYTICAL_MIN_STABILITY: f64 = 0.6;
const ANALYTICAL_MIN_TIME_NORM: f64 = 0.5;
const ANALYTICAL_MAX_ERROR_RATE: f64 = 0.3;
/// Above this error rate the Analytical score is voided outright.
const ANALYTICAL_VOID_ERROR_RATE: f64 = 0.6;

const IMPULSIVE_MAX_TIME_NORM: f64 = 0.3;
const IMPULSIVE_MIN_ERROR_RATE: f64 = 0.4;
const IMPULSIVE_MAX_STABILITY: f64 = 0.5;

const INTUITIVE_MAX_TIME_NORM: f64 = 0.4;
const INTUITIVE_MAX_ERROR_RATE: f64 = 0.3;
const INTUITIVE_MIN_PEAK_DIFFICULTY: f64 = 0.7;

const BASIC_MAX_PEAK_DIFFICULTY: f64 = 0.5;
const BASIC_MAX_ERROR_RATE: f64 = 0.4;
const BASIC_MIN_STABILITY: f64 = 0.5;
/// BasicExecutor is voided when every answered question was at least this
/// difficult.
const BASIC_VOID_MIN_DIFFICULTY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingPattern {
    None,
    Analytical,
    Impulsive,
    Intuitive,
    BasicExecutor,
    Unstable,
}

impl ThinkingPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Analytical => "analytical",
            Self::Impulsive => "impulsive",
            Self::Intuitive => "intuitive",
            Self::BasicExecutor => "basic_executor",
            Self::Unstable => "unstable",
        }
    }
}

fn question_difficulty(sample: &AnswerSample) -> f64 {
    sample.question_weight.clamp(0.0, 1.0)
}

/// Consistency between question difficulty and success, in [0, 1].
///
/// Each answer contributes the question's own difficulty when correct and
/// its complement when incorrect, so succeeding on hard questions and
/// failing on easy ones both pull the index up. Histories shorter than
/// three answers return the neutral 1.0.
pub fn cognitive_stability_index(history: &[AnswerSample]) -> f64 {
    if history.len() < MIN_HISTORY {
        return 1.0;
    }

    let sum: f64 = history
        .iter()
        .map(|sample| {
            let d = question_difficulty(sample);
            if sample.is_correct() {
                d
            } else {
                1.0 - d
            }
        })
        .sum();

    (sum / history.len() as f64).clamp(0.0, 1.0)
}

/// Classify the candidate's speed/accuracy/difficulty profile.
pub fn thinking_pattern(history: &[AnswerSample]) -> ThinkingPattern {
    if history.is_empty() {
        return ThinkingPattern::None;
    }

    let total = history.len() as f64;
    let avg_time = history.iter().map(|s| s.spent_seconds).sum::<f64>() / total;
    let time_norm = avg_time / TIME_NORM_BASE;
    let error_rate = history.iter().filter(|s| !s.is_correct()).count() as f64 / total;
    let peak_difficulty = history
        .iter()
        .map(question_difficulty)
        .fold(0.0_f64, f64::max);
    let floor_difficulty = history
        .iter()
        .map(question_difficulty)
        .fold(1.0_f64, f64::min);
    let stability = cognitive_stability_index(history);

    let mut analytical = 0u32;
    if stability >= ANALYTICAL_MIN_STABILITY {
        analytical += 1;
    }
    if time_norm >= ANALYTICAL_MIN_TIME_NORM {
        analytical += 1;
    }
    if error_rate <= ANALYTICAL_MAX_ERROR_RATE {
        analytical += 1;
    }
    if error_rate > ANALYTICAL_VOID_ERROR_RATE {
        analytical = 0;
    }

    let mut impulsive = 0u32;
    if time_norm < IMPULSIVE_MAX_TIME_NORM {
        impulsive += 1;
    }
    if error_rate > IMPULSIVE_MIN_ERROR_RATE {
        impulsive += 1;
    }
    if stability < IMPULSIVE_MAX_STABILITY {
        impulsive += 1;
    }

    let mut intuitive = 0u32;
    if time_norm < INTUITIVE_MAX_TIME_NORM {
        intuitive += 1;
    }
    if error_rate <= INTUITIVE_MAX_ERROR_RATE {
        intuitive += 1;
    }
    if peak_difficulty >= INTUITIVE_MIN_PEAK_DIFFICULTY {
        intuitive += 1;
    }

    let mut basic = 0u32;
    if peak_difficulty < BASIC_MAX_PEAK_DIFFICULTY {
        basic += 1;
    }
    if error_rate <= BASIC_MAX_ERROR_RATE {
        basic += 1;
    }
    if stability >= BASIC_MIN_STABILITY {
        basic += 1;
    }
    if floor_difficulty >= BASIC_VOID_MIN_DIFFICULTY {
        basic = 0;
    }

    let scored = [
        (ThinkingPattern::Analytical, analytical),
        (ThinkingPattern::Intuitive, intuitive),
        (ThinkingPattern::BasicExecutor, basic),
        (ThinkingPattern::Impulsive, impulsive),
    ];

    // Ties keep the later entry, same as max_by_key over the array.
    let (winner, best) = scored
        .into_iter()
        .fold((ThinkingPattern::Unstable, 0), |acc, cand| {
            if cand.1 >= acc.1 { cand } else { acc }
        });

    if best >= PATTERN_MIN_SCORE {
        winner
    } else {
        ThinkingPattern::Unstable
    }
}
