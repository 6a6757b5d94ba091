use crate::engine::orchestrator::AssessmentEngine;

pub async fn run(engine: &AssessmentEngine, max_duration_secs: u64) {
    tracing::debug!("session_watchdog: start");
    match engine.force_close_overdue(max_duration_secs).await {
        Ok(closed) => tracing::info!(closed, "session_watchdog: done"),
        Err(e) => tracing::error!(error=%e, "session_watchdog failed"),
    }
}
