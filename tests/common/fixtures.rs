use assessment_backend::store::operations::questions::{AnswerOption, Question};
use assessment_backend::store::operations::topics::Topic;
use assessment_backend::store::Store;

/// One topic with single-choice questions at the given weights, each with
/// one correct and one wrong option. Option ids follow the pattern
/// `{question_id}-right` / `{question_id}-wrong`.
pub fn seed_topic(store: &Store, direction: &str, topic_id: &str, weights: &[f64]) {
    store
        .put_topic(&Topic {
            id: topic_id.to_string(),
            direction: direction.to_string(),
            name: format!("{topic_id} topic"),
        })
        .expect("put topic");

    for (i, weight) in weights.iter().enumerate() {
        let qid = format!("{topic_id}-q{i}");
        store
            .put_question(
                &Question {
                    id: qid.clone(),
                    topic_id: topic_id.to_string(),
                    text: format!("question {qid}"),
                    weight: *weight,
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
            .expect("put question");
    }
}

/// A multi-select question with three options, two of them correct.
pub fn seed_multi_question(store: &Store, topic_id: &str, qid: &str, weight: f64) {
    store
        .put_question(
            &Question {
                id: qid.to_string(),
                topic_id: topic_id.to_string(),
                text: format!("question {qid}"),
                weight,
                multiple: true,
            },
            &[
                AnswerOption {
                    id: format!("{qid}-a"),
                    question_id: qid.to_string(),
                    content: "a".to_string(),
                    correct: true,
                },
                AnswerOption {
                    id: format!("{qid}-b"),
                    question_id: qid.to_string(),
                    content: "b".to_string(),
                    correct: true,
                },
                AnswerOption {
                    id: format!("{qid}-c"),
                    question_id: qid.to_string(),
                    content: "c".to_string(),
                    correct: false,
                },
            ],
        )
        .expect("put multi question");
}
