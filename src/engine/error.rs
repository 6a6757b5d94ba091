use thiserror::Error;

use crate::store::StoreError;

/// Business-rule outcomes of the assessment engine. These propagate to the
/// transport layer as typed results and never as panics; a configuration
/// error aborts the call before any state is written.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("session already finished: {0}")]
    SessionAlreadyFinished(String),
    #[error("session still active: {0}")]
    SessionStillActive(String),
    #[error("question not found: {0}")]
    QuestionNotFound(String),
    #[error("answer {answer_id} does not belong to question {question_id}")]
    AnswerNotFound {
        question_id: String,
        answer_id: String,
    },
    #[error("question {0} is single-choice, multiple answers selected")]
    QuestionNotMultiple(String),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("no topics configured for direction: {0}")]
    DirectionEmpty(String),
    #[error("grade time range missing for grade: {0}")]
    GradeTimesMissing(String),
    #[error("grade weight range missing for grade: {0}")]
    GradeWeightsMissing(String),
    #[error("grade ladder relation missing for grade: {0}")]
    GradeRelationsMissing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Stable machine-readable code exposed in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::SessionAlreadyFinished(_) => "SESSION_ALREADY_FINISHED",
            Self::SessionStillActive(_) => "SESSION_STILL_ACTIVE",
            Self::QuestionNotFound(_) => "QUESTION_NOT_FOUND",
            Self::AnswerNotFound { .. } => "ANSWER_NOT_FOUND",
            Self::QuestionNotMultiple(_) => "QUESTION_NOT_MULTIPLE",
            Self::TopicNotFound(_) => "TOPIC_NOT_FOUND",
            Self::DirectionEmpty(_) => "DIRECTION_EMPTY",
            Self::GradeTimesMissing(_) => "GRADE_TIMES_MISSING",
            Self::GradeWeightsMissing(_) => "GRADE_WEIGHTS_MISSING",
            Self::GradeRelationsMissing(_) => "GRADE_RELATIONS_MISSING",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
