pub const TOPICS: &str = "topics";
pub const QUESTIONS: &str = "questions";
pub const QUESTIONS_BY_TOPIC: &str = "questions_by_topic";
pub const QUESTION_ANSWERS: &str = "question_answers";
pub const SESSIONS: &str = "sessions";
pub const USER_TOPICS: &str = "user_topics";
pub const USER_ANSWERS: &str = "user_answers";
pub const META: &str = "meta";
