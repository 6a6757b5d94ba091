use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// A subject area under a direction (e.g. direction "qa" owns "sql" and
/// "testing-theory"). Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub direction: String,
    pub name: String,
}

impl Store {
    pub fn put_topic(&self, topic: &Topic) -> Result<(), StoreError> {
        if topic.id.is_empty() {
            return Err(StoreError::Validation("topic id is empty".to_string()));
        }
        let key = keys::topic_key(&topic.id);
        self.topics.insert(key.as_bytes(), Self::serialize(topic)?)?;
        Ok(())
    }

    pub fn get_topic(&self, topic_id: &str) -> Result<Option<Topic>, StoreError> {
        match self.topics.get(keys::topic_key(topic_id).as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reference data is small; a full scan with a filter is fine here.
    pub fn list_topics_by_direction(&self, direction: &str) -> Result<Vec<Topic>, StoreError> {
        let mut topics = Vec::new();
        for item in self.topics.iter() {
            let (_, raw) = item?;
            let topic: Topic = Self::deserialize(&raw)?;
            if topic.direction == direction {
                topics.push(topic);
            }
        }
        Ok(topics)
    }
}
