use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

// Tie-breaker for answers recorded in the same millisecond.
static ANSWER_SEQ: AtomicU64 = AtomicU64::new(0);

/// One answered question within a session. Append-only: the streak scans,
/// the difficulty estimator and the session metrics all replay this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: String,
    pub session_id: String,
    pub topic_id: String,
    pub question_id: String,
    pub score: f64,
    pub question_weight: f64,
    pub spent_seconds: f64,
    pub answered_at: DateTime<Utc>,
}

impl Store {
    pub fn append_user_answer(&self, answer: &UserAnswer) -> Result<(), StoreError> {
        let key = keys::user_answer_key(
            &answer.session_id,
            answer.answered_at.timestamp_millis(),
            ANSWER_SEQ.fetch_add(1, Ordering::Relaxed),
            &answer.id,
        );
        self.user_answers
            .insert(key.as_bytes(), Self::serialize(answer)?)?;
        Ok(())
    }

    /// Full session history, newest-first (reverse-timestamp key order).
    pub fn list_session_answers(&self, session_id: &str) -> Result<Vec<UserAnswer>, StoreError> {
        let prefix = keys::user_answer_prefix(session_id);
        let mut answers = Vec::new();
        for item in self.user_answers.scan_prefix(prefix.as_bytes()) {
            let (_, raw) = item?;
            answers.push(Self::deserialize(&raw)?);
        }
        Ok(answers)
    }

    /// One topic's history within a session, newest-first.
    pub fn list_topic_answers(
        &self,
        session_id: &str,
        topic_id: &str,
    ) -> Result<Vec<UserAnswer>, StoreError> {
        Ok(self
            .list_session_answers(session_id)?
            .into_iter()
            .filter(|a| a.topic_id == topic_id)
            .collect())
    }
}
