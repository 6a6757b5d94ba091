//! Reference-data ingestion from a JSON seed file.
//!
//! Admin CRUD is out of scope for this service; topics, questions and
//! answer options enter the store through a seed file loaded at startup.
//! Loading is idempotent: entries whose id already exists are skipped.

use std::path::Path;

use serde::Deserialize;

use crate::store::operations::questions::{AnswerOption, Question};
use crate::store::operations::topics::Topic;
use crate::store::{Store, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub questions: Vec<SeedQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub answers: Vec<AnswerOption>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub topics_created: usize,
    pub questions_created: usize,
    pub skipped: usize,
}

pub fn load_from_path(store: &Store, path: &Path) -> Result<SeedSummary, StoreError> {
    let raw = std::fs::read(path)
        .map_err(|e| StoreError::Seed(format!("cannot read {}: {e}", path.display())))?;
    let seed: SeedFile = serde_json::from_slice(&raw)
        .map_err(|e| StoreError::Seed(format!("invalid seed file {}: {e}", path.display())))?;
    apply(store, &seed)
}

pub fn apply(store: &Store, seed: &SeedFile) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary::default();

    for topic in &seed.topics {
        if store.get_topic(&topic.id)?.is_some() {
            summary.skipped += 1;
            continue;
        }
        store.put_topic(topic)?;
        summary.topics_created += 1;
    }

    for entry in &seed.questions {
        if store.get_question(&entry.question.id)?.is_some() {
            summary.skipped += 1;
            continue;
        }
        if store.get_topic(&entry.question.topic_id)?.is_none() {
            return Err(StoreError::Seed(format!(
                "question {} references unknown topic {}",
                entry.question.id, entry.question.topic_id
            )));
        }
        store.put_question(&entry.question, &entry.answers)?;
        summary.questions_created += 1;
    }

    tracing::info!(
        topics = summary.topics_created,
        questions = summary.questions_created,
        skipped = summary.skipped,
        "Seed applied"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn seed_json() -> serde_json::Value {
        serde_json::json!({
            "topics": [
                {"id": "t1", "direction": "qa", "name": "SQL"}
            ],
            "questions": [
                {
                    "id": "q1",
                    "topicId": "t1",
                    "text": "Pick one",
                    "weight": 0.4,
                    "multiple": false,
                    "answers": [
                        {"id": "a1", "questionId": "q1", "content": "yes", "correct": true},
                        {"id": "a2", "questionId": "q1", "content": "no", "correct": false}
                    ]
                }
            ]
        })
    }

    #[test]
    fn apply_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();
        let seed: SeedFile = serde_json::from_value(seed_json()).unwrap();

        let first = apply(&store, &seed).unwrap();
        assert_eq!(first.topics_created, 1);
        assert_eq!(first.questions_created, 1);

        let second = apply(&store, &seed).unwrap();
        assert_eq!(second.topics_created, 0);
        assert_eq!(second.questions_created, 0);
        assert_eq!(second.skipped, 2);
    }

    #[test]
    fn unknown_topic_reference_fails() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        let mut seed: SeedFile = serde_json::from_value(seed_json()).unwrap();
        seed.topics.clear();
        let err = apply(&store, &seed).unwrap_err();
        assert!(matches!(err, StoreError::Seed(_)));
    }
}
