use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::env_or_parse;
use crate::engine::error::EngineError;
use crate::engine::types::{Grade, GradeRelation, TimeRange, WeightRange};

/// Tunables driving the weight update and the streak fast paths. All are
/// fractions of either a weight band or the per-topic question budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tunables {
    /// Fraction of the band below `max` that already counts as a raise.
    pub raise_data: f64,
    /// Fraction of the question budget that must be correct, newest-first,
    /// for the raise streak.
    pub increase_level: f64,
    /// Fraction of the question budget of consecutive zero-score answers
    /// that closes the topic.
    pub decrease_level: f64,
    /// Fraction of the question budget that must be answered before the
    /// close streak is honored.
    pub mandatory_questions: f64,
    /// Growth rate toward the band maximum on a scored answer.
    pub gain_weight: f64,
    /// Decay rate toward the band minimum on a zero-score answer.
    pub less_weight: f64,
    /// Window for the rolling-accuracy dampening factor.
    pub rolling_window: usize,
    /// Question budget per topic.
    pub questions_per_topic: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            raise_data: 0.1,
            increase_level: 0.5,
            decrease_level: 0.3,
            mandatory_questions: 0.2,
            gain_weight: 0.3,
            less_weight: 0.3,
            rolling_window: 5,
            questions_per_topic: 10,
        }
    }
}

/// The configuration source of the engine: the grade ladder with its
/// per-grade weight and time bands, plus the numeric tunables. Read-mostly;
/// held behind an `RwLock` by the orchestrator and cloned per call.
///
/// Bands and relations are keyed separately so that an incomplete
/// deployment surfaces as the matching typed error instead of a panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingConfig {
    pub grades: Vec<Grade>,
    pub relations: HashMap<String, GradeRelation>,
    pub weight_ranges: HashMap<String, WeightRange>,
    pub time_ranges: HashMap<String, TimeRange>,
    /// Grade every topic starts a session in.
    pub start_grade: String,
    pub tunables: Tunables,
}

fn grade(code: &str, name: &str) -> Grade {
    Grade {
        id: code.to_string(),
        code: code.to_string(),
        name: name.to_string(),
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        let grades = vec![
            grade("junior", "Junior"),
            grade("middle", "Middle"),
            grade("senior", "Senior"),
        ];

        let mut relations = HashMap::new();
        relations.insert(
            "junior".to_string(),
            GradeRelation {
                prev: None,
                next: Some("middle".to_string()),
            },
        );
        relations.insert(
            "middle".to_string(),
            GradeRelation {
                prev: Some("junior".to_string()),
                next: Some("senior".to_string()),
            },
        );
        relations.insert(
            "senior".to_string(),
            GradeRelation {
                prev: Some("middle".to_string()),
                next: None,
            },
        );

        let mut weight_ranges = HashMap::new();
        weight_ranges.insert("junior".to_string(), WeightRange { min: 0.1, max: 0.3 });
        weight_ranges.insert("middle".to_string(), WeightRange { min: 0.3, max: 0.7 });
        weight_ranges.insert("senior".to_string(), WeightRange { min: 0.7, max: 1.0 });

        let mut time_ranges = HashMap::new();
        time_ranges.insert(
            "junior".to_string(),
            TimeRange {
                average: 45.0,
                min: 0.5,
                max: 1.5,
            },
        );
        time_ranges.insert(
            "middle".to_string(),
            TimeRange {
                average: 60.0,
                min: 0.5,
                max: 1.5,
            },
        );
        time_ranges.insert(
            "senior".to_string(),
            TimeRange {
                average: 90.0,
                min: 0.5,
                max: 1.5,
            },
        );

        Self {
            grades,
            relations,
            weight_ranges,
            time_ranges,
            start_grade: "middle".to_string(),
            tunables: Tunables::default(),
        }
    }
}

impl GradingConfig {
    /// Default ladder with tunables overridable from the environment.
    pub fn from_env() -> Self {
        let defaults = Tunables::default();
        let mut config = Self::default();
        config.tunables = Tunables {
            raise_data: env_or_parse("GRADING_RAISE_DATA", defaults.raise_data),
            increase_level: env_or_parse("GRADING_INCREASE_LEVEL", defaults.increase_level),
            decrease_level: env_or_parse("GRADING_DECREASE_LEVEL", defaults.decrease_level),
            mandatory_questions: env_or_parse(
                "GRADING_MANDATORY_QUESTIONS",
                defaults.mandatory_questions,
            ),
            gain_weight: env_or_parse("GRADING_GAIN_WEIGHT", defaults.gain_weight),
            less_weight: env_or_parse("GRADING_LESS_WEIGHT", defaults.less_weight),
            rolling_window: env_or_parse("GRADING_ROLLING_WINDOW", defaults.rolling_window),
            questions_per_topic: env_or_parse(
                "GRADING_QUESTIONS_PER_TOPIC",
                defaults.questions_per_topic,
            ),
        };
        config
    }

    pub fn relation(&self, grade: &str) -> Result<&GradeRelation, EngineError> {
        self.relations
            .get(grade)
            .ok_or_else(|| EngineError::GradeRelationsMissing(grade.to_string()))
    }

    pub fn weight_range(&self, grade: &str) -> Result<WeightRange, EngineError> {
        self.weight_ranges
            .get(grade)
            .copied()
            .ok_or_else(|| EngineError::GradeWeightsMissing(grade.to_string()))
    }

    pub fn time_range(&self, grade: &str) -> Result<TimeRange, EngineError> {
        self.time_ranges
            .get(grade)
            .copied()
            .ok_or_else(|| EngineError::GradeTimesMissing(grade.to_string()))
    }

    /// Raise-streak length: floor of the question budget times `increase_level`.
    pub fn raise_streak_len(&self) -> usize {
        (self.tunables.questions_per_topic as f64 * self.tunables.increase_level).floor() as usize
    }

    /// Close-streak length: floor of the question budget times `decrease_level`.
    pub fn close_streak_len(&self) -> usize {
        (self.tunables.questions_per_topic as f64 * self.tunables.decrease_level).floor() as usize
    }

    /// Answers required before the fast close path is honored.
    pub fn mandatory_answer_count(&self) -> usize {
        (self.tunables.questions_per_topic as f64 * self.tunables.mandatory_questions).floor()
            as usize
    }

    /// Validate at load time: the ladder must be a properly chained acyclic
    /// list, every grade must carry both bands, and the time multipliers
    /// must bracket the neutral coefficient 1.
    pub fn validate(&self) -> Result<(), String> {
        if self.grades.is_empty() {
            return Err("grade ladder is empty".to_string());
        }
        if !self.grades.iter().any(|g| g.code == self.start_grade) {
            return Err(format!("start grade {} is not in the ladder", self.start_grade));
        }

        for grade in &self.grades {
            let rel = self
                .relations
                .get(&grade.code)
                .ok_or_else(|| format!("grade {} has no ladder relation", grade.code))?;
            if let Some(next) = &rel.next {
                let back = self
                    .relations
                    .get(next)
                    .ok_or_else(|| format!("grade {} points to unknown next {}", grade.code, next))?;
                if back.prev.as_deref() != Some(grade.code.as_str()) {
                    return Err(format!(
                        "ladder edge {} -> {} has no matching back edge",
                        grade.code, next
                    ));
                }
            }

            let band = self
                .weight_ranges
                .get(&grade.code)
                .ok_or_else(|| format!("grade {} has no weight range", grade.code))?;
            if !(band.min < band.max) {
                return Err(format!("grade {} weight range is inverted", grade.code));
            }

            let time = self
                .time_ranges
                .get(&grade.code)
                .ok_or_else(|| format!("grade {} has no time range", grade.code))?;
            if time.average <= 0.0 {
                return Err(format!("grade {} average time must be positive", grade.code));
            }
            if !(time.min > 0.0 && time.min < 1.0 && time.max > 1.0) {
                return Err(format!(
                    "grade {} time multipliers must satisfy 0 < min < 1 < max",
                    grade.code
                ));
            }
        }

        // Walking the chain from the bottom must visit every grade exactly
        // once; anything else means a cycle or a fork.
        let bottom = self
            .grades
            .iter()
            .find(|g| {
                self.relations
                    .get(&g.code)
                    .map(|r| r.prev.is_none())
                    .unwrap_or(false)
            })
            .ok_or_else(|| "grade ladder has no bottom rung".to_string())?;

        let mut visited = 0usize;
        let mut cursor = Some(bottom.code.clone());
        while let Some(code) = cursor {
            visited += 1;
            if visited > self.grades.len() {
                return Err("grade ladder contains a cycle".to_string());
            }
            cursor = self.relations.get(&code).and_then(|r| r.next.clone());
        }
        if visited != self.grades.len() {
            return Err("grade ladder is not a single chain".to_string());
        }

        Ok(())
    }
}
