use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use tokio::sync::{Mutex, RwLock};

use crate::engine::config::GradingConfig;
use crate::engine::error::EngineError;
use crate::engine::types::{
    AnswerSample, AnswerSubmission, DeliveredAnswer, DeliveredQuestion, NextQuestionOutcome,
    SessionReport, StartedSession, SubmitOutcome, TopicReport,
};
use crate::engine::weight::WeightStep;
use crate::engine::{difficulty, grade, metrics, scorer, streak, time_coefficient, weight};
use crate::store::operations::sessions::Session;
use crate::store::operations::user_answers::UserAnswer;
use crate::store::operations::user_topics::UserTopic;
use crate::store::Store;

/// Session-level control loop driving the scoring pipeline per answer.
///
/// Exactly one client mutates a session at a time; the per-session lock
/// serializes the read-modify-write cycle so two in-flight requests for
/// the same session cannot lose updates.
pub struct AssessmentEngine {
    config: Arc<RwLock<GradingConfig>>,
    store: Arc<Store>,
    session_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl AssessmentEngine {
    pub fn new(config: GradingConfig, store: Arc<Store>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            session_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn reload_config(&self, new_config: GradingConfig) -> Result<(), String> {
        new_config.validate()?;
        let mut cfg = self.config.write().await;
        *cfg = new_config;
        tracing::info!("Grading config reloaded");
        Ok(())
    }

    pub async fn get_config(&self) -> GradingConfig {
        self.config.read().await.clone()
    }

    async fn acquire_session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;

        // Prune entries no longer held by any in-flight call.
        if locks.len() > 1000 {
            locks.retain(|_, v| Arc::strong_count(v) > 1);
        }

        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create a session with one open user topic per topic under the
    /// direction, each starting at the configured grade's band minimum.
    pub async fn start_session(&self, direction: &str) -> Result<StartedSession, EngineError> {
        let config = self.config.read().await.clone();

        let topics = self.store.list_topics_by_direction(direction)?;
        if topics.is_empty() {
            return Err(EngineError::DirectionEmpty(direction.to_string()));
        }

        let band = config.weight_range(&config.start_grade)?;
        let now = Utc::now();
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            direction: direction.to_string(),
            started_at: now,
            end_time: None,
            final_score: None,
            cognitive_stability_index: None,
            thinking_pattern: None,
        };
        self.store.create_session(&session)?;

        for topic in &topics {
            self.store.put_user_topic(&UserTopic {
                session_id: session.id.clone(),
                topic_id: topic.id.clone(),
                weight: band.min,
                grade: config.start_grade.clone(),
                budget: config.tunables.questions_per_topic,
                is_finished: false,
                actual: false,
                was_previous: false,
                updated_at: now,
            })?;
        }

        tracing::info!(
            session_id = %session.id,
            direction,
            topics = topics.len(),
            "Session started"
        );

        Ok(StartedSession {
            session_id: session.id,
            direction: direction.to_string(),
            topic_count: topics.len(),
            started_at: now,
        })
    }

    /// Pick the next open topic and an unanswered question inside its
    /// weight band. Topics with no deliverable question left are closed
    /// and the scan retries; when no open topic remains the session is
    /// closed and `Finished` is returned.
    pub async fn next_question(
        &self,
        session_id: &str,
    ) -> Result<NextQuestionOutcome, EngineError> {
        let lock = self.acquire_session_lock(session_id).await;
        let _guard = lock.lock().await;

        let config = self.config.read().await.clone();
        let mut session = self.load_session(session_id)?;
        if session.is_finished() {
            return Ok(NextQuestionOutcome::Finished);
        }

        loop {
            let all_topics = self.store.list_user_topics(session_id)?;
            let open: Vec<&UserTopic> = all_topics.iter().filter(|t| !t.is_finished).collect();
            if open.is_empty() {
                self.close_session(&mut session, false)?;
                return Ok(NextQuestionOutcome::Finished);
            }

            // Avoid serving the same topic back-to-back unless it is the
            // only one left.
            let mut candidates: Vec<&UserTopic> =
                open.iter().copied().filter(|t| !t.was_previous).collect();
            if candidates.is_empty() {
                candidates = open.clone();
            }
            let Some(chosen) = candidates
                .choose(&mut rand::thread_rng())
                .map(|t| (*t).clone())
            else {
                continue;
            };

            let band = config.weight_range(&chosen.grade)?;
            let answered: HashSet<String> = self
                .store
                .list_topic_answers(session_id, &chosen.topic_id)?
                .into_iter()
                .map(|a| a.question_id)
                .collect();

            let eligible = self.store.eligible_questions(
                &chosen.topic_id,
                &answered,
                chosen.weight,
                band.max,
            )?;

            let Some(question) = eligible.choose(&mut rand::thread_rng()).cloned() else {
                // Nothing deliverable in the band: close and try another topic.
                let mut exhausted = chosen.clone();
                exhausted.is_finished = true;
                exhausted.actual = false;
                exhausted.updated_at = Utc::now();
                self.store.put_user_topic(&exhausted)?;
                tracing::debug!(
                    session_id,
                    topic_id = %exhausted.topic_id,
                    "Topic exhausted, closing"
                );
                continue;
            };

            for topic in &all_topics {
                let serving = topic.topic_id == chosen.topic_id;
                if topic.actual != serving || topic.was_previous != serving {
                    let mut updated = topic.clone();
                    updated.actual = serving && !topic.is_finished;
                    updated.was_previous = serving;
                    updated.updated_at = Utc::now();
                    self.store.put_user_topic(&updated)?;
                }
            }

            let mut options: Vec<DeliveredAnswer> = self
                .store
                .answers_for_question(&question.id)?
                .into_iter()
                .map(|a| DeliveredAnswer {
                    id: a.id,
                    content: a.content,
                })
                .collect();
            // Delivery order is shuffled per call and never persisted.
            options.shuffle(&mut rand::thread_rng());

            return Ok(NextQuestionOutcome::Question(DeliveredQuestion {
                question_id: question.id,
                topic_id: question.topic_id,
                text: question.text,
                weight: question.weight,
                multiple: question.multiple,
                answers: options,
            }));
        }
    }

    /// Score one submission and run the full per-answer pipeline: time
    /// coefficient, scoring, difficulty estimate, weight update, streak
    /// scans and grade transition. Either everything is computed and the
    /// UserAnswer + UserTopic pair is written, or the call aborts before
    /// any write.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        submission: &AnswerSubmission,
    ) -> Result<SubmitOutcome, EngineError> {
        let lock = self.acquire_session_lock(session_id).await;
        let _guard = lock.lock().await;

        let config = self.config.read().await.clone();
        let mut session = self.load_session(session_id)?;
        if session.is_finished() {
            return Err(EngineError::SessionAlreadyFinished(session_id.to_string()));
        }

        let mut topic_state = self
            .store
            .actual_user_topic(session_id)?
            .ok_or_else(|| EngineError::TopicNotFound(format!("no active topic in {session_id}")))?;

        let question = self
            .store
            .get_question(&submission.question_id)?
            .filter(|q| q.topic_id == topic_state.topic_id)
            .ok_or_else(|| EngineError::QuestionNotFound(submission.question_id.clone()))?;

        let options = self.store.answers_for_question(&question.id)?;
        let by_id: HashMap<&str, bool> =
            options.iter().map(|o| (o.id.as_str(), o.correct)).collect();
        for answer_id in &submission.answer_ids {
            if !by_id.contains_key(answer_id.as_str()) {
                return Err(EngineError::AnswerNotFound {
                    question_id: question.id.clone(),
                    answer_id: answer_id.clone(),
                });
            }
        }
        if !question.multiple && submission.answer_ids.len() > 1 {
            return Err(EngineError::QuestionNotMultiple(question.id.clone()));
        }

        let band = config.weight_range(&topic_state.grade)?;
        let time = config.time_range(&topic_state.grade)?;
        let relation = config.relation(&topic_state.grade)?;

        // An empty selection short-circuits to zero without consulting K.
        let score = if submission.answer_ids.is_empty() {
            0.0
        } else {
            let total_correct = options.iter().filter(|o| o.correct).count();
            let answered_correct = submission
                .answer_ids
                .iter()
                .filter(|id| by_id.get(id.as_str()).copied().unwrap_or(false))
                .count();
            let k = time_coefficient::time_coefficient(submission.spent_seconds, &time);
            scorer::answer_score(question.weight, k, answered_correct, total_correct)
        };

        // Replay the topic history, newest-first, with this answer on top.
        let prior = self
            .store
            .list_topic_answers(session_id, &topic_state.topic_id)?;
        let mut samples = Vec::with_capacity(prior.len() + 1);
        samples.push(AnswerSample {
            score,
            question_weight: question.weight,
            spent_seconds: submission.spent_seconds,
        });
        samples.extend(prior.iter().map(answer_sample));

        let correct_count = samples.iter().filter(|s| s.is_correct()).count();
        let avg_time =
            samples.iter().map(|s| s.spent_seconds).sum::<f64>() / samples.len() as f64;
        let topic_difficulty = difficulty::difficulty(
            correct_count,
            samples.len(),
            avg_time,
            time.max_seconds(),
        );

        let window = config.tunables.rolling_window;
        let rolling_accuracy = if samples.len() < window {
            1.0
        } else {
            samples[..window].iter().filter(|s| s.is_correct()).count() as f64 / window as f64
        };

        let updated_weight = weight::update_weight(
            topic_state.weight,
            question.weight,
            &WeightStep {
                band: &band,
                increase: score > 0.0,
                difficulty: topic_difficulty,
                rolling_accuracy,
                has_previous_grade: relation.prev.is_some(),
                gain_rate: config.tunables.gain_weight,
                less_rate: config.tunables.less_weight,
            },
        );

        let raise_streak = streak::can_raise(&samples, config.raise_streak_len());
        let outcome = grade::transition(&config, &topic_state.grade, updated_weight, raise_streak)?;

        let close_streak = streak::can_close(
            &samples,
            config.close_streak_len(),
            config.mandatory_answer_count(),
        );

        topic_state.weight = outcome.weight;
        topic_state.grade = outcome.grade.clone();
        topic_state.budget = topic_state.budget.saturating_sub(1);
        let topic_finished = topic_state.budget == 0 || close_streak;
        if topic_finished {
            topic_state.is_finished = true;
            topic_state.actual = false;
        }
        topic_state.updated_at = Utc::now();

        let record = UserAnswer {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            topic_id: topic_state.topic_id.clone(),
            question_id: question.id.clone(),
            score,
            question_weight: question.weight,
            spent_seconds: submission.spent_seconds,
            answered_at: Utc::now(),
        };
        self.store.append_user_answer(&record)?;
        self.store.put_user_topic(&topic_state)?;

        let mut session_finished = false;
        if topic_finished {
            let open_left = self
                .store
                .list_user_topics(session_id)?
                .iter()
                .any(|t| !t.is_finished);
            if !open_left {
                self.close_session(&mut session, false)?;
                session_finished = true;
            }
        }

        tracing::debug!(
            session_id,
            topic_id = %topic_state.topic_id,
            score,
            weight = topic_state.weight,
            grade = %topic_state.grade,
            shift = ?outcome.shift,
            topic_finished,
            "Answer recorded"
        );

        Ok(SubmitOutcome {
            score,
            topic_id: topic_state.topic_id.clone(),
            topic_weight: topic_state.weight,
            grade: outcome.grade,
            grade_shift: outcome.shift,
            topic_finished,
            session_finished,
        })
    }

    /// Explicit close by the candidate.
    pub async fn finish_session(&self, session_id: &str) -> Result<SessionReport, EngineError> {
        let lock = self.acquire_session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_session(session_id)?;
        if session.is_finished() {
            return Err(EngineError::SessionAlreadyFinished(session_id.to_string()));
        }

        self.close_session(&mut session, false)?;
        self.build_report(&session)
    }

    /// Final report of a closed session.
    pub async fn report(&self, session_id: &str) -> Result<SessionReport, EngineError> {
        let session = self.load_session(session_id)?;
        if !session.is_finished() {
            return Err(EngineError::SessionStillActive(session_id.to_string()));
        }
        self.build_report(&session)
    }

    /// Force-close sessions older than `max_duration_secs` with a zeroed
    /// score. Invoked by the expiry watchdog.
    pub async fn force_close_overdue(&self, max_duration_secs: u64) -> Result<u32, EngineError> {
        let cutoff = Utc::now() - chrono::Duration::seconds(max_duration_secs as i64);
        let overdue = self.store.list_overdue_sessions(cutoff)?;

        let mut closed = 0u32;
        for stale in overdue {
            let lock = self.acquire_session_lock(&stale.id).await;
            let _guard = lock.lock().await;

            // Re-read under the lock: a concurrent call may have closed it.
            let mut session = match self.store.get_session(&stale.id)? {
                Some(s) if !s.is_finished() => s,
                _ => continue,
            };
            self.close_session(&mut session, true)?;
            tracing::warn!(session_id = %session.id, "Session force-closed by watchdog");
            closed += 1;
        }
        Ok(closed)
    }

    fn load_session(&self, session_id: &str) -> Result<Session, EngineError> {
        self.store
            .get_session(session_id)?
            .ok_or_else(|| EngineError::SessionNotFound(session_id.to_string()))
    }

    /// Set the end time, close any still-open topics and persist the final
    /// score plus behavioral metrics.
    fn close_session(&self, session: &mut Session, force_zero: bool) -> Result<(), EngineError> {
        let now = Utc::now();
        let topics = self.store.list_user_topics(&session.id)?;
        for topic in &topics {
            if !topic.is_finished || topic.actual {
                let mut updated = topic.clone();
                updated.is_finished = true;
                updated.actual = false;
                updated.updated_at = now;
                self.store.put_user_topic(&updated)?;
            }
        }

        let answers = self.store.list_session_answers(&session.id)?;
        let samples: Vec<AnswerSample> = answers.iter().map(answer_sample).collect();

        let final_score = if force_zero {
            0.0
        } else {
            topics
                .iter()
                .map(|topic| {
                    let scores: Vec<f64> = answers
                        .iter()
                        .filter(|a| a.topic_id == topic.topic_id)
                        .map(|a| a.score)
                        .collect();
                    scorer::topic_score(&scores, topic.weight)
                })
                .sum()
        };

        session.end_time = Some(now);
        session.final_score = Some(final_score);
        session.cognitive_stability_index = Some(metrics::cognitive_stability_index(&samples));
        session.thinking_pattern = Some(metrics::thinking_pattern(&samples));
        self.store.update_session(session)?;

        tracing::info!(
            session_id = %session.id,
            final_score,
            forced = force_zero,
            "Session closed"
        );
        Ok(())
    }

    fn build_report(&self, session: &Session) -> Result<SessionReport, EngineError> {
        let topics = self.store.list_user_topics(&session.id)?;
        let answers = self.store.list_session_answers(&session.id)?;

        let mut reports = Vec::with_capacity(topics.len());
        for topic in &topics {
            let scores: Vec<f64> = answers
                .iter()
                .filter(|a| a.topic_id == topic.topic_id)
                .map(|a| a.score)
                .collect();
            let name = self
                .store
                .get_topic(&topic.topic_id)?
                .map(|t| t.name)
                .unwrap_or_else(|| topic.topic_id.clone());
            reports.push(TopicReport {
                topic_id: topic.topic_id.clone(),
                topic_name: name,
                grade: topic.grade.clone(),
                weight: topic.weight,
                score: scorer::topic_score(&scores, topic.weight),
                answered: scores.len(),
            });
        }

        Ok(SessionReport {
            session_id: session.id.clone(),
            final_score: session.final_score.unwrap_or(0.0),
            cognitive_stability_index: session.cognitive_stability_index.unwrap_or(1.0),
            thinking_pattern: session
                .thinking_pattern
                .unwrap_or(crate::engine::metrics::ThinkingPattern::None),
            topics: reports,
        })
    }
}

fn answer_sample(answer: &UserAnswer) -> AnswerSample {
    AnswerSample {
        score: answer.score,
        question_weight: answer.question_weight,
        spent_seconds: answer.spent_seconds,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::store::operations::questions::{AnswerOption, Question};
    use crate::store::operations::topics::Topic;

    use super::*;

    fn engine() -> (AssessmentEngine, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("db").to_str().unwrap()).unwrap());
        (
            AssessmentEngine::new(GradingConfig::default(), store),
            dir,
        )
    }

    fn seed_topic(engine: &AssessmentEngine, topic_id: &str, weights: &[f64]) {
        engine
            .store
            .put_topic(&Topic {
                id: topic_id.to_string(),
                direction: "qa".to_string(),
                name: topic_id.to_uppercase(),
            })
            .unwrap();
        for (i, w) in weights.iter().enumerate() {
            let qid = format!("{topic_id}-q{i}");
            engine
                .store
                .put_question(
                    &Question {
                        id: qid.clone(),
                        topic_id: topic_id.to_string(),
                        text: format!("question {qid}"),
                        weight: *w,
                        multiple: false,
                    },
                    &[
                        AnswerOption {
                            id: format!("{qid}-right"),
                            question_id: qid.clone(),
                            content: "right".to_string(),
                            correct: true,
                        },
                        AnswerOption {
                            id: format!("{qid}-wrong"),
                            question_id: qid.clone(),
                            content: "wrong".to_string(),
                            correct: false,
                        },
                    ],
                )
                .unwrap();
        }
    }

    async fn next_delivered(engine: &AssessmentEngine, session_id: &str) -> DeliveredQuestion {
        match engine.next_question(session_id).await.unwrap() {
            NextQuestionOutcome::Question(q) => q,
            NextQuestionOutcome::Finished => panic!("session finished unexpectedly"),
        }
    }

    #[tokio::test]
    async fn start_session_creates_one_user_topic_per_topic() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        seed_topic(&engine, "t2", &[0.4]);

        let started = engine.start_session("qa").await.unwrap();
        assert_eq!(started.topic_count, 2);

        let topics = engine.store.list_user_topics(&started.session_id).unwrap();
        assert_eq!(topics.len(), 2);
        for t in &topics {
            assert_eq!(t.grade, "middle");
            assert!((t.weight - 0.3).abs() < 1e-12);
            assert_eq!(t.budget, 10);
            assert!(!t.is_finished);
        }
    }

    #[tokio::test]
    async fn unknown_direction_is_rejected() {
        let (engine, _dir) = engine();
        let err = engine.start_session("nope").await.unwrap_err();
        assert_eq!(err.code(), "DIRECTION_EMPTY");
    }

    #[tokio::test]
    async fn delivered_question_marks_topic_actual() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4, 0.5, 0.6]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        assert_eq!(delivered.topic_id, "t1");
        assert_eq!(delivered.answers.len(), 2);

        let actual = engine
            .store
            .actual_user_topic(&started.session_id)
            .unwrap()
            .unwrap();
        assert_eq!(actual.topic_id, "t1");
        assert!(actual.was_previous);
    }

    #[tokio::test]
    async fn submit_without_active_topic_fails() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        let err = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: "t1-q0".to_string(),
                    answer_ids: vec!["t1-q0-right".to_string()],
                    spent_seconds: 70.0,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "TOPIC_NOT_FOUND");
    }

    #[tokio::test]
    async fn correct_answer_scores_and_moves_weight_up() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4, 0.5, 0.6]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        let correct_id = format!("{}-right", delivered.question_id);
        let outcome = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: delivered.question_id.clone(),
                    // expected window: neutral K
                    answer_ids: vec![correct_id],
                    spent_seconds: 70.0,
                },
            )
            .await
            .unwrap();

        assert!((outcome.score - delivered.weight).abs() < 1e-12);
        assert!(outcome.topic_weight > 0.3);
        assert!(!outcome.session_finished);
    }

    #[tokio::test]
    async fn empty_selection_scores_zero() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4, 0.5]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        let outcome = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: delivered.question_id,
                    answer_ids: vec![],
                    spent_seconds: 5.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.score, 0.0);
    }

    #[tokio::test]
    async fn single_choice_rejects_multiple_selections() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        let err = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: delivered.question_id.clone(),
                    answer_ids: vec![
                        format!("{}-right", delivered.question_id),
                        format!("{}-wrong", delivered.question_id),
                    ],
                    spent_seconds: 70.0,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "QUESTION_NOT_MULTIPLE");
    }

    #[tokio::test]
    async fn foreign_answer_id_is_rejected() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        let err = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: delivered.question_id,
                    answer_ids: vec!["not-an-answer".to_string()],
                    spent_seconds: 70.0,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ANSWER_NOT_FOUND");
    }

    #[tokio::test]
    async fn finished_session_rejects_submission() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();
        engine.finish_session(&started.session_id).await.unwrap();

        let err = engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: "t1-q0".to_string(),
                    answer_ids: vec![],
                    spent_seconds: 10.0,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SESSION_ALREADY_FINISHED");
    }

    #[tokio::test]
    async fn report_requires_closed_session() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        let err = engine.report(&started.session_id).await.unwrap_err();
        assert_eq!(err.code(), "SESSION_STILL_ACTIVE");

        engine.finish_session(&started.session_id).await.unwrap();
        let report = engine.report(&started.session_id).await.unwrap();
        assert_eq!(report.topics.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_topic_closes_and_session_ends() {
        let (engine, _dir) = engine();
        // one topic, one question: answering it exhausts the pool
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        let delivered = next_delivered(&engine, &started.session_id).await;
        engine
            .submit_answer(
                &started.session_id,
                &AnswerSubmission {
                    question_id: delivered.question_id.clone(),
                    answer_ids: vec![format!("{}-right", delivered.question_id)],
                    spent_seconds: 70.0,
                },
            )
            .await
            .unwrap();

        match engine.next_question(&started.session_id).await.unwrap() {
            NextQuestionOutcome::Finished => {}
            NextQuestionOutcome::Question(q) => panic!("unexpected question {}", q.question_id),
        }

        let session = engine.store.get_session(&started.session_id).unwrap().unwrap();
        assert!(session.is_finished());
        assert!(session.final_score.is_some());
    }

    #[tokio::test]
    async fn watchdog_force_close_zeroes_score() {
        let (engine, _dir) = engine();
        seed_topic(&engine, "t1", &[0.4]);
        let started = engine.start_session("qa").await.unwrap();

        // Backdate the session past the cutoff.
        let mut session = engine.store.get_session(&started.session_id).unwrap().unwrap();
        session.started_at = Utc::now() - chrono::Duration::hours(3);
        engine.store.update_session(&session).unwrap();

        let closed = engine.force_close_overdue(3600).await.unwrap();
        assert_eq!(closed, 1);

        let session = engine.store.get_session(&started.session_id).unwrap().unwrap();
        assert!(session.is_finished());
        assert_eq!(session.final_score, Some(0.0));
    }
}
