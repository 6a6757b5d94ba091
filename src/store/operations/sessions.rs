use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::metrics::ThinkingPattern;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// One assessment attempt. `end_time` is set exactly once; a session with
/// an end time is immutable to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub direction: String,
    pub started_at: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub final_score: Option<f64>,
    pub cognitive_stability_index: Option<f64>,
    pub thinking_pattern: Option<ThinkingPattern>,
}

impl Session {
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

impl Store {
    pub fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let key = keys::session_key(&session.id);
        self.sessions.insert(key.as_bytes(), Self::serialize(session)?)?;
        Ok(())
    }

    pub fn get_session(&self, session_id: &str) -> Result<Option<Session>, StoreError> {
        match self.sessions.get(keys::session_key(session_id).as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn update_session(&self, session: &Session) -> Result<(), StoreError> {
        let key = keys::session_key(&session.id);
        self.sessions.insert(key.as_bytes(), Self::serialize(session)?)?;
        Ok(())
    }

    /// Active sessions started before `cutoff`; consumed by the expiry
    /// watchdog.
    pub fn list_overdue_sessions(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Session>, StoreError> {
        let mut overdue = Vec::new();
        for item in self.sessions.iter() {
            let (_, raw) = item?;
            let session: Session = Self::deserialize(&raw)?;
            if session.end_time.is_none() && session.started_at < cutoff {
                overdue.push(session);
            }
        }
        Ok(overdue)
    }
}
