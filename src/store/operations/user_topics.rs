use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// The mutable per-session, per-topic state the engine owns.
///
/// At most one user topic per session is `actual` (currently being served)
/// while unfinished; `was_previous` marks the most recently served topic so
/// the orchestrator avoids repeating it back-to-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTopic {
    pub session_id: String,
    pub topic_id: String,
    pub weight: f64,
    pub grade: String,
    /// Remaining question budget, decremented per answered question.
    pub budget: u32,
    pub is_finished: bool,
    pub actual: bool,
    pub was_previous: bool,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn put_user_topic(&self, user_topic: &UserTopic) -> Result<(), StoreError> {
        let key = keys::user_topic_key(&user_topic.session_id, &user_topic.topic_id);
        self.user_topics
            .insert(key.as_bytes(), Self::serialize(user_topic)?)?;
        Ok(())
    }

    pub fn get_user_topic(
        &self,
        session_id: &str,
        topic_id: &str,
    ) -> Result<Option<UserTopic>, StoreError> {
        let key = keys::user_topic_key(session_id, topic_id);
        match self.user_topics.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_user_topics(&self, session_id: &str) -> Result<Vec<UserTopic>, StoreError> {
        let prefix = keys::user_topic_prefix(session_id);
        let mut topics = Vec::new();
        for item in self.user_topics.scan_prefix(prefix.as_bytes()) {
            let (_, raw) = item?;
            topics.push(Self::deserialize(&raw)?);
        }
        Ok(topics)
    }

    pub fn actual_user_topic(&self, session_id: &str) -> Result<Option<UserTopic>, StoreError> {
        Ok(self
            .list_user_topics(session_id)?
            .into_iter()
            .find(|t| t.actual && !t.is_finished))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn user_topic(session: &str, topic: &str) -> UserTopic {
        UserTopic {
            session_id: session.to_string(),
            topic_id: topic.to_string(),
            weight: 0.3,
            grade: "middle".to_string(),
            budget: 10,
            is_finished: false,
            actual: false,
            was_previous: false,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn topics_are_scoped_to_their_session() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store.put_user_topic(&user_topic("s1", "t1")).unwrap();
        store.put_user_topic(&user_topic("s1", "t2")).unwrap();
        store.put_user_topic(&user_topic("s2", "t1")).unwrap();

        assert_eq!(store.list_user_topics("s1").unwrap().len(), 2);
        assert_eq!(store.list_user_topics("s2").unwrap().len(), 1);
    }

    #[test]
    fn actual_lookup_ignores_finished() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        let mut finished = user_topic("s1", "t1");
        finished.actual = true;
        finished.is_finished = true;
        store.put_user_topic(&finished).unwrap();

        assert!(store.actual_user_topic("s1").unwrap().is_none());

        let mut open = user_topic("s1", "t2");
        open.actual = true;
        store.put_user_topic(&open).unwrap();

        let actual = store.actual_user_topic("s1").unwrap().unwrap();
        assert_eq!(actual.topic_id, "t2");
    }
}
