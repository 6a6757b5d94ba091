pub mod config;
pub mod difficulty;
pub mod error;
pub mod grade;
pub mod metrics;
pub mod orchestrator;
pub mod scorer;
pub mod streak;
pub mod time_coefficient;
pub mod types;
pub mod weight;
