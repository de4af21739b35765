//! lexintake application binary - composition root.
//!
//! Ties together the lexintake crates into a single executable:
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML
//! 3. Initialize tracing
//! 4. Build the session store, dialogue engine, and narrator
//! 5. Start the axum REST API server

mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexintake_api::{routes, state::AppState};
use lexintake_core::config::IntakeConfig;
use lexintake_narration::{BrowserFallbackNarrator, Narrator};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), lexintake_core::error::IntakeError> {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let mut config = IntakeConfig::load_or_default(&config_path);
    config.general.port = args.resolve_port(config.general.port);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.general.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        config = %config_path.display(),
        port = config.general.port,
        collect_name = config.dialog.collect_name,
        collect_contact = config.dialog.collect_contact,
        "lexintake starting"
    );

    let narrator: Arc<dyn Narrator> = Arc::new(BrowserFallbackNarrator);
    let state = AppState::new(config, narrator);

    routes::start_server(state).await
}
