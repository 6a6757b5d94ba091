pub mod keys;
pub mod migrate;
pub mod operations;
pub mod seed;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

#[derive(Debug)]
pub struct Store {
    db: Db,
    pub topics: sled::Tree,
    pub questions: sled::Tree,
    pub questions_by_topic: sled::Tree,
    pub question_answers: sled::Tree,
    pub sessions: sled::Tree,
    pub user_topics: sled::Tree,
    pub user_answers: sled::Tree,
    pub meta: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not found: entity={entity}, key={key}")]
    NotFound { entity: String, key: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("migration error at version {version}: {message}")]
    Migration { version: u32, message: String },
    #[error("seed error: {0}")]
    Seed(String),
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let topics = db.open_tree(trees::TOPICS)?;
        let questions = db.open_tree(trees::QUESTIONS)?;
        let questions_by_topic = db.open_tree(trees::QUESTIONS_BY_TOPIC)?;
        let question_answers = db.open_tree(trees::QUESTION_ANSWERS)?;
        let sessions = db.open_tree(trees::SESSIONS)?;
        let user_topics = db.open_tree(trees::USER_TOPICS)?;
        let user_answers = db.open_tree(trees::USER_ANSWERS)?;
        let meta = db.open_tree(trees::META)?;

        Ok(Self {
            db,
            topics,
            questions,
            questions_by_topic,
            question_answers,
            sessions,
            user_topics,
            user_answers,
            meta,
        })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        migrate::run(self)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub fn raw_db(&self) -> &Db {
        &self.db
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
