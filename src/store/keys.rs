pub fn topic_key(topic_id: &str) -> String {
    topic_id.to_string()
}

pub fn question_key(question_id: &str) -> String {
    question_id.to_string()
}

pub fn question_topic_index(topic_id: &str, question_id: &str) -> String {
    format!("{}:{}", topic_id, question_id)
}

pub fn question_topic_prefix(topic_id: &str) -> String {
    format!("{}:", topic_id)
}

pub fn answer_key(question_id: &str, answer_id: &str) -> String {
    format!("{}:{}", question_id, answer_id)
}

pub fn answer_prefix(question_id: &str) -> String {
    format!("{}:", question_id)
}

pub fn session_key(session_id: &str) -> String {
    session_id.to_string()
}

pub fn user_topic_key(session_id: &str, topic_id: &str) -> String {
    format!("{}:{}", session_id, topic_id)
}

pub fn user_topic_prefix(session_id: &str) -> String {
    format!("{}:", session_id)
}

/// User answers are keyed with a reverse timestamp plus a reverse insertion
/// sequence so a prefix scan yields the session's history newest-first
/// without sorting. The sequence breaks ties between answers recorded in the
/// same millisecond.
pub fn user_answer_key(session_id: &str, timestamp_ms: i64, seq: u64, answer_id: &str) -> String {
    let ts = timestamp_ms.max(0) as u64;
    let reverse_ts = u64::MAX - ts;
    let reverse_seq = u64::MAX - seq;
    format!("{}:{:020}:{:020}:{}", session_id, reverse_ts, reverse_seq, answer_id)
}

pub fn user_answer_prefix(session_id: &str) -> String {
    format!("{}:", session_id)
}
