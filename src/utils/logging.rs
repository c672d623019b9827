//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the RunwayVote application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard must be kept alive for the duration of the program,
/// otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "runwayvote.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log registration lifecycle actions with structured data
pub fn log_registration_action(participant_id: i64, show_id: i64, action: &str) {
    info!(
        participant_id = participant_id,
        show_id = show_id,
        action = action,
        "Registration action performed"
    );
}

/// Log voting actions with structured data
pub fn log_vote_action(participant_id: i64, show_id: i64, designer_id: i64, action: &str) {
    info!(
        participant_id = participant_id,
        show_id = show_id,
        designer_id = designer_id,
        action = action,
        "Vote action performed"
    );
}

/// Log admin actions
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        "Admin action performed"
    );
}
