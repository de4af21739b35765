//! Application state shared across all route handlers.
//!
//! AppState holds references to the orchestrator and narrator services.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use lexintake_core::config::IntakeConfig;
use lexintake_dialog::IntakeOrchestrator;
use lexintake_narration::Narrator;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks; the
/// orchestrator carries its own interior locking.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<IntakeConfig>,
    /// Session store + dialogue engine.
    pub orchestrator: Arc<IntakeOrchestrator>,
    /// Text-to-speech adapter.
    pub narrator: Arc<dyn Narrator>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(config: IntakeConfig, narrator: Arc<dyn Narrator>) -> Self {
        let orchestrator = Arc::new(IntakeOrchestrator::new(config.dialog.clone()));
        Self {
            config: Arc::new(config),
            orchestrator,
            narrator,
            start_time: Instant::now(),
        }
    }
}
