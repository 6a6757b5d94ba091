use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use assessment_backend::config::{Config, SessionConfig, WorkerConfig};
use assessment_backend::engine::config::GradingConfig;
use assessment_backend::engine::orchestrator::AssessmentEngine;
use assessment_backend::routes::build_router;
use assessment_backend::state::AppState;
use assessment_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_test_app() -> TestApp {
    spawn_with_grading(GradingConfig::default()).await
}

pub async fn spawn_with_grading(grading: GradingConfig) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("assessment-test.sled");

    // Construct Config directly instead of set_var to avoid env races
    // across parallel tests.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        seed_path: None,
        cors_origin: "http://localhost:5173".to_string(),
        worker: WorkerConfig {
            is_leader: false,
            enable_session_watchdog: false,
        },
        session: SessionConfig {
            max_duration_secs: 3600,
        },
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let engine = Arc::new(AssessmentEngine::new(grading, store.clone()));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(store, engine, &config, shutdown_tx);

    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}
