use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// A question in a topic's pool. `weight` is its real-valued difficulty;
/// `multiple` marks multi-select questions. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub topic_id: String,
    pub text: String,
    pub weight: f64,
    pub multiple: bool,
}

/// One selectable option of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub question_id: String,
    pub content: String,
    pub correct: bool,
}

impl Store {
    /// Insert a question together with its topic index entry.
    pub fn put_question(
        &self,
        question: &Question,
        answers: &[AnswerOption],
    ) -> Result<(), StoreError> {
        if question.id.is_empty() {
            return Err(StoreError::Validation("question id is empty".to_string()));
        }
        if answers.is_empty() {
            return Err(StoreError::Validation(format!(
                "question {} has no answer options",
                question.id
            )));
        }
        if !answers.iter().any(|a| a.correct) {
            return Err(StoreError::Validation(format!(
                "question {} has no correct option",
                question.id
            )));
        }

        let key = keys::question_key(&question.id);
        let index_key = keys::question_topic_index(&question.topic_id, &question.id);
        self.questions
            .insert(key.as_bytes(), Self::serialize(question)?)?;
        self.questions_by_topic
            .insert(index_key.as_bytes(), &[] as &[u8])?;

        for answer in answers {
            let akey = keys::answer_key(&question.id, &answer.id);
            self.question_answers
                .insert(akey.as_bytes(), Self::serialize(answer)?)?;
        }
        Ok(())
    }

    pub fn get_question(&self, question_id: &str) -> Result<Option<Question>, StoreError> {
        match self.questions.get(keys::question_key(question_id).as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn answers_for_question(
        &self,
        question_id: &str,
    ) -> Result<Vec<AnswerOption>, StoreError> {
        let prefix = keys::answer_prefix(question_id);
        let mut answers = Vec::new();
        for item in self.question_answers.scan_prefix(prefix.as_bytes()) {
            let (_, raw) = item?;
            answers.push(Self::deserialize(&raw)?);
        }
        Ok(answers)
    }

    /// All unanswered questions of a topic whose weight lies in
    /// `[min_weight, max_weight]`. Selection among the candidates is the
    /// engine's concern, which keeps delivery order storage-agnostic.
    pub fn eligible_questions(
        &self,
        topic_id: &str,
        exclude_ids: &HashSet<String>,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<Vec<Question>, StoreError> {
        let prefix = keys::question_topic_prefix(topic_id);
        let mut eligible = Vec::new();
        for item in self.questions_by_topic.scan_prefix(prefix.as_bytes()) {
            let (k, _) = item?;
            let key_str = String::from_utf8(k.to_vec()).unwrap_or_default();
            let Some(question_id) = key_str.rsplit(':').next() else {
                continue;
            };
            if exclude_ids.contains(question_id) {
                continue;
            }
            if let Some(question) = self.get_question(question_id)? {
                if question.weight >= min_weight && question.weight <= max_weight {
                    eligible.push(question);
                }
            }
        }
        Ok(eligible)
    }
}
