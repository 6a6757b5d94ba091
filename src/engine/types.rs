use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rung on the grade ladder. Reference data, immutable during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub code: String,
    pub name: String,
}

/// Directed ladder edges for one grade. Absent `prev` marks the lowest
/// rung, absent `next` the highest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRelation {
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Question-weight band a topic may occupy while holding a grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Expected answer-time profile for a grade. `average` is seconds; `min`
/// and `max` are the unitless multiplier bounds the time coefficient
/// interpolates between.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    /// Upper bound on a plausible answer time for this grade, in seconds.
    pub fn max_seconds(&self) -> f64 {
        self.average * self.max
    }
}

/// One answered question, as replayed by the streak scans, the difficulty
/// estimator and the end-of-session metrics. Ordering is the caller's
/// concern; the scans expect newest-first.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSample {
    pub score: f64,
    pub question_weight: f64,
    pub spent_seconds: f64,
}

impl AnswerSample {
    pub fn is_correct(&self) -> bool {
        self.score > 0.0
    }
}

/// Input to "submit answer".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: String,
    #[serde(default)]
    pub answer_ids: Vec<String>,
    pub spent_seconds: f64,
}

/// Outcome of a grade-transition decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeShift {
    Promoted,
    Demoted,
    Held,
}

#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub grade: String,
    pub weight: f64,
    pub shift: GradeShift,
}

/// Outcome of an accepted "submit answer"; rejections travel as
/// `EngineError`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub score: f64,
    pub topic_id: String,
    pub topic_weight: f64,
    pub grade: String,
    pub grade_shift: GradeShift,
    pub topic_finished: bool,
    pub session_finished: bool,
}

/// A question ready for delivery: answer order is shuffled per call and
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredQuestion {
    pub question_id: String,
    pub topic_id: String,
    pub text: String,
    pub weight: f64,
    pub multiple: bool,
    pub answers: Vec<DeliveredAnswer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredAnswer {
    pub id: String,
    pub content: String,
}

/// Outcome of "get next question".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum NextQuestionOutcome {
    Question(DeliveredQuestion),
    Finished,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedSession {
    pub session_id: String,
    pub direction: String,
    pub topic_count: usize,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicReport {
    pub topic_id: String,
    pub topic_name: String,
    pub grade: String,
    pub weight: f64,
    pub score: f64,
    pub answered: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: String,
    pub final_score: f64,
    pub cognitive_stability_index: f64,
    pub thinking_pattern: crate::engine::metrics::ThinkingPattern,
    pub topics: Vec<TopicReport>,
}
