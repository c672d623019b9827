//! Registration service implementation
//!
//! This service decides whether a participant may register for a show,
//! enforcing the no-duplicate and no-schedule-overlap rules, and handles
//! the time-windowed unregister and past-show cleanup operations.

use chrono::{DateTime, Utc};
use tracing::debug;
use crate::database::repositories::{RegistrationRepository, ShowRepository};
use crate::models::registration::Registration;
use crate::models::show::Show;
use crate::services::auth::{AuthContext, AuthService};
use crate::utils::errors::{Result, RunwayVoteError};
use crate::utils::logging::log_registration_action;

/// Half-open interval overlap test: [a.start, a.end) and [b.start, b.end)
/// overlap iff a.start < b.end and b.start < a.end. Shows that merely touch
/// at a boundary do not overlap.
pub fn overlaps(a: &Show, b: &Show) -> bool {
    a.start_time < b.end_time && b.start_time < a.end_time
}

/// Validate a prospective registration against the participant's existing ones
///
/// Rejects a duplicate registration for the target show, then rejects the
/// first already-registered show whose time window overlaps the target's.
pub fn check_schedule(target: &Show, registered: &[Show]) -> Result<()> {
    if registered.iter().any(|s| s.id == target.id) {
        return Err(RunwayVoteError::AlreadyRegistered { show_id: target.id });
    }

    if let Some(conflicting) = registered.iter().find(|s| overlaps(s, target)) {
        return Err(RunwayVoteError::ScheduleConflict {
            show_id: target.id,
            conflicting_show_id: conflicting.id,
        });
    }

    Ok(())
}

/// Unregistering is only permitted before the show starts
pub fn check_unregister_window(show: &Show, now: DateTime<Utc>) -> Result<()> {
    if now >= show.start_time {
        return Err(RunwayVoteError::ShowAlreadyStarted { show_id: show.id });
    }

    Ok(())
}

/// Cleaning up a registration is only permitted after the show ends
pub fn check_cleanup_window(show: &Show, now: DateTime<Utc>) -> Result<()> {
    if now <= show.end_time {
        return Err(RunwayVoteError::ShowNotFinished { show_id: show.id });
    }

    Ok(())
}

/// Registration service for managing show registrations
#[derive(Debug, Clone)]
pub struct RegistrationService {
    auth_service: AuthService,
    registration_repository: RegistrationRepository,
    show_repository: ShowRepository,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(
        auth_service: AuthService,
        registration_repository: RegistrationRepository,
        show_repository: ShowRepository,
    ) -> Self {
        Self {
            auth_service,
            registration_repository,
            show_repository,
        }
    }

    /// Register the caller for a show
    ///
    /// The target show must exist, must not already be registered, and must
    /// not overlap any show the caller is already registered for. A
    /// concurrent duplicate insert resolves to AlreadyRegistered through the
    /// unique constraint.
    pub async fn register(&self, ctx: &AuthContext, show_id: i64) -> Result<Registration> {
        let participant = self.auth_service.resolve_participant(ctx).await?;
        debug!(participant_id = participant.id, show_id = show_id, "Checking registration rules");

        let show = self
            .show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        let registered = self
            .registration_repository
            .get_registered_shows(participant.id)
            .await?;
        check_schedule(&show, &registered)?;

        let registration = self
            .registration_repository
            .create(participant.id, show_id)
            .await?;

        log_registration_action(participant.id, show_id, "register");
        Ok(registration)
    }

    /// Withdraw the caller's registration, only before the show starts
    pub async fn unregister(&self, ctx: &AuthContext, show_id: i64) -> Result<()> {
        let participant = self.auth_service.resolve_participant(ctx).await?;

        let show = self
            .show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        self.registration_repository
            .find(participant.id, show_id)
            .await?
            .ok_or(RunwayVoteError::RegistrationNotFound { show_id })?;

        check_unregister_window(&show, Utc::now())?;

        self.registration_repository
            .delete(participant.id, show_id)
            .await?;

        log_registration_action(participant.id, show_id, "unregister");
        Ok(())
    }

    /// Remove the caller's registration for a show that has ended
    pub async fn delete_past_registration(&self, ctx: &AuthContext, show_id: i64) -> Result<()> {
        let participant = self.auth_service.resolve_participant(ctx).await?;

        let show = self
            .show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        self.registration_repository
            .find(participant.id, show_id)
            .await?
            .ok_or(RunwayVoteError::RegistrationNotFound { show_id })?;

        check_cleanup_window(&show, Utc::now())?;

        self.registration_repository
            .delete(participant.id, show_id)
            .await?;

        log_registration_action(participant.id, show_id, "cleanup");
        Ok(())
    }

    /// Get the shows the caller is registered for
    pub async fn my_shows(&self, ctx: &AuthContext) -> Result<Vec<Show>> {
        let participant = self.auth_service.resolve_participant(ctx).await?;
        self.registration_repository
            .get_registered_shows(participant.id)
            .await
    }

    /// Get shows that have not ended yet
    pub async fn upcoming_shows(&self) -> Result<Vec<Show>> {
        self.show_repository.get_upcoming_shows(Utc::now()).await
    }

    /// Check whether the caller is registered for a show
    pub async fn is_registered(&self, ctx: &AuthContext, show_id: i64) -> Result<bool> {
        let participant = self.auth_service.resolve_participant(ctx).await?;
        self.registration_repository
            .is_registered(participant.id, show_id)
            .await
    }
}
