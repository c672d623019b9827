//! Error handling for RunwayVote
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for RunwayVote application
#[derive(Error, Debug)]
pub enum RunwayVoteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: i64 },

    #[error("Designer not found: {designer_id}")]
    DesignerNotFound { designer_id: i64 },

    #[error("Show not found: {show_id}")]
    ShowNotFound { show_id: i64 },

    #[error("No vote found for designer {designer_id} in show {show_id}")]
    VoteNotFound { designer_id: i64, show_id: i64 },

    #[error("You are not registered for show {show_id}")]
    RegistrationNotFound { show_id: i64 },

    #[error("No participant account exists for {email}")]
    NotAParticipant { email: String },

    #[error("You must be registered for show {show_id} to vote in it")]
    NotRegistered { show_id: i64 },

    #[error("Already registered for show {show_id}")]
    AlreadyRegistered { show_id: i64 },

    #[error("Show {show_id} overlaps with already-registered show {conflicting_show_id}")]
    ScheduleConflict { show_id: i64, conflicting_show_id: i64 },

    #[error("Designer {designer_id} is already assigned to show {show_id}")]
    AlreadyAssigned { designer_id: i64, show_id: i64 },

    #[error("Designer {designer_id} is not assigned to show {show_id}")]
    NotAssigned { designer_id: i64, show_id: i64 },

    #[error("A participant with email {email} already exists")]
    EmailTaken { email: String },

    #[error("Show {show_id} has already started, registration can no longer be withdrawn")]
    ShowAlreadyStarted { show_id: i64 },

    #[error("Show {show_id} has not finished yet, only past registrations can be cleaned up")]
    ShowNotFinished { show_id: i64 },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type alias for RunwayVote operations
pub type Result<T> = std::result::Result<T, RunwayVoteError>;

impl RunwayVoteError {
    /// Classify the error into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunwayVoteError::Database(_) => ErrorKind::Infrastructure,
            RunwayVoteError::Migration(_) => ErrorKind::Infrastructure,
            RunwayVoteError::Config(_) => ErrorKind::Infrastructure,
            RunwayVoteError::Io(_) => ErrorKind::Infrastructure,
            RunwayVoteError::Serialization(_) => ErrorKind::Infrastructure,
            RunwayVoteError::InvalidInput(_) => ErrorKind::Validation,
            RunwayVoteError::ParticipantNotFound { .. } => ErrorKind::NotFound,
            RunwayVoteError::DesignerNotFound { .. } => ErrorKind::NotFound,
            RunwayVoteError::ShowNotFound { .. } => ErrorKind::NotFound,
            RunwayVoteError::VoteNotFound { .. } => ErrorKind::NotFound,
            RunwayVoteError::RegistrationNotFound { .. } => ErrorKind::NotFound,
            RunwayVoteError::NotAssigned { .. } => ErrorKind::NotFound,
            RunwayVoteError::NotAParticipant { .. } => ErrorKind::Authorization,
            RunwayVoteError::NotRegistered { .. } => ErrorKind::Authorization,
            RunwayVoteError::PermissionDenied(_) => ErrorKind::Authorization,
            RunwayVoteError::AlreadyRegistered { .. } => ErrorKind::Conflict,
            RunwayVoteError::ScheduleConflict { .. } => ErrorKind::Conflict,
            RunwayVoteError::AlreadyAssigned { .. } => ErrorKind::Conflict,
            RunwayVoteError::EmailTaken { .. } => ErrorKind::Conflict,
            RunwayVoteError::ShowAlreadyStarted { .. } => ErrorKind::Conflict,
            RunwayVoteError::ShowNotFinished { .. } => ErrorKind::Conflict,
        }
    }
}

/// Error categories exposed to callers of the service layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authorization,
    Infrastructure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION"),
            ErrorKind::NotFound => write!(f, "NOT_FOUND"),
            ErrorKind::Conflict => write!(f, "CONFLICT"),
            ErrorKind::Authorization => write!(f, "AUTHORIZATION"),
            ErrorKind::Infrastructure => write!(f, "INFRASTRUCTURE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violations_map_to_conflict() {
        assert_eq!(
            RunwayVoteError::AlreadyRegistered { show_id: 1 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            RunwayVoteError::ScheduleConflict { show_id: 2, conflicting_show_id: 1 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            RunwayVoteError::ShowAlreadyStarted { show_id: 1 }.kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_lookup_failures_map_to_not_found() {
        assert_eq!(
            RunwayVoteError::ShowNotFound { show_id: 9 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            RunwayVoteError::VoteNotFound { designer_id: 1, show_id: 2 }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_gating_failures_map_to_authorization() {
        assert_eq!(
            RunwayVoteError::NotRegistered { show_id: 3 }.kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            RunwayVoteError::NotAParticipant { email: "a@b.com".to_string() }.kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn test_messages_name_the_violated_rule() {
        let err = RunwayVoteError::ScheduleConflict { show_id: 5, conflicting_show_id: 2 };
        assert!(err.to_string().contains("overlaps"));

        let err = RunwayVoteError::AlreadyRegistered { show_id: 5 };
        assert!(err.to_string().contains("Already registered"));
    }
}
