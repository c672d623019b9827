//! Authorization service implementation
//!
//! This service resolves caller identity supplied by the hosting application
//! into an explicit authorization context and performs role checks for
//! operations. Authentication itself is the hosting application's job; every
//! operation here takes the caller's context as an explicit parameter.

use tracing::debug;
use crate::config::settings::Settings;
use crate::database::repositories::ParticipantRepository;
use crate::models::participant::Participant;
use crate::utils::errors::{Result, RunwayVoteError};

/// Roles recognized by the service layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular voting audience member
    Participant,
    /// Event organizer with full management access
    Admin,
}

/// Authorization context for a caller
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub email: String,
    pub role: Role,
}

/// Authorization service for resolving caller context and checking roles
#[derive(Debug, Clone)]
pub struct AuthService {
    participant_repository: ParticipantRepository,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(participant_repository: ParticipantRepository, settings: Settings) -> Self {
        Self {
            participant_repository,
            settings,
        }
    }

    /// Build the authorization context for an authenticated caller
    pub fn context_for(&self, email: &str) -> AuthContext {
        let role = if self.is_admin_email(email) {
            Role::Admin
        } else {
            Role::Participant
        };

        debug!(email = %email, role = ?role, "Resolved authorization context");
        AuthContext {
            email: email.to_string(),
            role,
        }
    }

    /// Check whether an email is configured as an admin
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.settings
            .auth
            .admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }

    /// Require the Admin role or return an error
    pub fn require_admin(&self, ctx: &AuthContext) -> Result<()> {
        if ctx.role != Role::Admin {
            return Err(RunwayVoteError::PermissionDenied(format!(
                "{} lacks the Admin role required for this operation",
                ctx.email
            )));
        }

        Ok(())
    }

    /// Resolve the caller to their participant record
    ///
    /// Callers without a participant row cannot register or vote.
    pub async fn resolve_participant(&self, ctx: &AuthContext) -> Result<Participant> {
        self.participant_repository
            .find_by_email(&ctx.email)
            .await?
            .ok_or_else(|| RunwayVoteError::NotAParticipant {
                email: ctx.email.clone(),
            })
    }
}
