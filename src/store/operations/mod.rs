pub mod questions;
pub mod sessions;
pub mod topics;
pub mod user_answers;
pub mod user_topics;
