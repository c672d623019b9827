//! Admin service implementation
//!
//! This service handles the administrative management of shows, designers,
//! and participants: creation, updates, deletion, and designer assignment.
//! Deleting a record cascades to its dependent registrations, assignments,
//! and votes at the persistence layer.

use tracing::info;
use crate::database::repositories::{DesignerRepository, ParticipantRepository, ShowRepository};
use crate::models::designer::{CreateDesignerRequest, Designer, UpdateDesignerRequest};
use crate::models::participant::{CreateParticipantRequest, Participant, UpdateParticipantRequest};
use crate::models::show::{CreateShowRequest, DesignerAssignment, Show, UpdateShowRequest};
use crate::services::auth::{AuthContext, AuthService};
use crate::utils::errors::{Result, RunwayVoteError};
use crate::utils::helpers::is_valid_email;
use crate::utils::logging::log_admin_action;

/// Admin service for managing shows, designers, and participants
#[derive(Debug, Clone)]
pub struct AdminService {
    auth_service: AuthService,
    show_repository: ShowRepository,
    designer_repository: DesignerRepository,
    participant_repository: ParticipantRepository,
}

impl AdminService {
    /// Create a new AdminService instance
    pub fn new(
        auth_service: AuthService,
        show_repository: ShowRepository,
        designer_repository: DesignerRepository,
        participant_repository: ParticipantRepository,
    ) -> Self {
        Self {
            auth_service,
            show_repository,
            designer_repository,
            participant_repository,
        }
    }

    /// Create a new show
    pub async fn create_show(&self, ctx: &AuthContext, request: CreateShowRequest) -> Result<Show> {
        self.auth_service.require_admin(ctx)?;
        validate_show_fields(&request.name, &request.location)?;
        validate_show_window(request.start_time, request.end_time)?;

        let show = self.show_repository.create(request).await?;
        log_admin_action(&ctx.email, "create_show", Some(&show.name));
        Ok(show)
    }

    /// Update an existing show
    pub async fn update_show(&self, ctx: &AuthContext, show_id: i64, request: UpdateShowRequest) -> Result<Show> {
        self.auth_service.require_admin(ctx)?;

        let existing = self
            .show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        // The window check applies to the effective values after the update
        let start = request.start_time.unwrap_or(existing.start_time);
        let end = request.end_time.unwrap_or(existing.end_time);
        validate_show_window(start, end)?;

        let show = self.show_repository.update(show_id, request).await?;
        log_admin_action(&ctx.email, "update_show", Some(&show.name));
        Ok(show)
    }

    /// Delete a show, cascading its registrations, assignments, and votes
    pub async fn delete_show(&self, ctx: &AuthContext, show_id: i64) -> Result<()> {
        self.auth_service.require_admin(ctx)?;

        let deleted = self.show_repository.delete(show_id).await?;
        if deleted == 0 {
            return Err(RunwayVoteError::ShowNotFound { show_id });
        }

        log_admin_action(&ctx.email, "delete_show", Some(&show_id.to_string()));
        Ok(())
    }

    /// List shows with pagination
    pub async fn list_shows(&self, ctx: &AuthContext, limit: i64, offset: i64) -> Result<Vec<Show>> {
        self.auth_service.require_admin(ctx)?;
        self.show_repository.list(limit, offset).await
    }

    /// Assign a designer to a show
    pub async fn assign_designer(&self, ctx: &AuthContext, designer_id: i64, show_id: i64) -> Result<DesignerAssignment> {
        self.auth_service.require_admin(ctx)?;

        self.designer_repository
            .find_by_id(designer_id)
            .await?
            .ok_or(RunwayVoteError::DesignerNotFound { designer_id })?;
        self.show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        let assignment = self.show_repository.assign_designer(designer_id, show_id).await?;

        info!(designer_id = designer_id, show_id = show_id, "Designer assigned to show");
        Ok(assignment)
    }

    /// Remove a designer assignment from a show
    pub async fn unassign_designer(&self, ctx: &AuthContext, designer_id: i64, show_id: i64) -> Result<()> {
        self.auth_service.require_admin(ctx)?;

        let removed = self.show_repository.unassign_designer(designer_id, show_id).await?;
        if removed == 0 {
            return Err(RunwayVoteError::NotAssigned { designer_id, show_id });
        }

        info!(designer_id = designer_id, show_id = show_id, "Designer unassigned from show");
        Ok(())
    }

    /// Create a new designer
    pub async fn create_designer(&self, ctx: &AuthContext, request: CreateDesignerRequest) -> Result<Designer> {
        self.auth_service.require_admin(ctx)?;

        if request.name.trim().is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "Designer name must not be empty".to_string(),
            ));
        }
        if request.category.trim().is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "Designer category must not be empty".to_string(),
            ));
        }

        let designer = self.designer_repository.create(request).await?;
        log_admin_action(&ctx.email, "create_designer", Some(&designer.name));
        Ok(designer)
    }

    /// Update an existing designer
    pub async fn update_designer(&self, ctx: &AuthContext, designer_id: i64, request: UpdateDesignerRequest) -> Result<Designer> {
        self.auth_service.require_admin(ctx)?;

        self.designer_repository
            .find_by_id(designer_id)
            .await?
            .ok_or(RunwayVoteError::DesignerNotFound { designer_id })?;

        let designer = self.designer_repository.update(designer_id, request).await?;
        log_admin_action(&ctx.email, "update_designer", Some(&designer.name));
        Ok(designer)
    }

    /// Delete a designer, cascading assignments and votes
    pub async fn delete_designer(&self, ctx: &AuthContext, designer_id: i64) -> Result<()> {
        self.auth_service.require_admin(ctx)?;

        let deleted = self.designer_repository.delete(designer_id).await?;
        if deleted == 0 {
            return Err(RunwayVoteError::DesignerNotFound { designer_id });
        }

        log_admin_action(&ctx.email, "delete_designer", Some(&designer_id.to_string()));
        Ok(())
    }

    /// List designers with pagination
    pub async fn list_designers(&self, ctx: &AuthContext, limit: i64, offset: i64) -> Result<Vec<Designer>> {
        self.auth_service.require_admin(ctx)?;
        self.designer_repository.list(limit, offset).await
    }

    /// Create a new participant account
    pub async fn create_participant(&self, ctx: &AuthContext, request: CreateParticipantRequest) -> Result<Participant> {
        self.auth_service.require_admin(ctx)?;

        if request.name.trim().is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "Participant name must not be empty".to_string(),
            ));
        }
        if !is_valid_email(&request.email) {
            return Err(RunwayVoteError::InvalidInput(format!(
                "Invalid participant email: {}",
                request.email
            )));
        }

        let participant = self.participant_repository.create(request).await?;
        log_admin_action(&ctx.email, "create_participant", Some(&participant.email));
        Ok(participant)
    }

    /// Update an existing participant
    pub async fn update_participant(&self, ctx: &AuthContext, participant_id: i64, request: UpdateParticipantRequest) -> Result<Participant> {
        self.auth_service.require_admin(ctx)?;

        self.participant_repository
            .find_by_id(participant_id)
            .await?
            .ok_or(RunwayVoteError::ParticipantNotFound { participant_id })?;

        if let Some(email) = &request.email {
            if !is_valid_email(email) {
                return Err(RunwayVoteError::InvalidInput(format!(
                    "Invalid participant email: {}",
                    email
                )));
            }
        }

        let participant = self.participant_repository.update(participant_id, request).await?;
        log_admin_action(&ctx.email, "update_participant", Some(&participant.email));
        Ok(participant)
    }

    /// Delete a participant, cascading registrations and votes
    pub async fn delete_participant(&self, ctx: &AuthContext, participant_id: i64) -> Result<()> {
        self.auth_service.require_admin(ctx)?;

        let deleted = self.participant_repository.delete(participant_id).await?;
        if deleted == 0 {
            return Err(RunwayVoteError::ParticipantNotFound { participant_id });
        }

        log_admin_action(&ctx.email, "delete_participant", Some(&participant_id.to_string()));
        Ok(())
    }

    /// List participants with pagination
    pub async fn list_participants(&self, ctx: &AuthContext, limit: i64, offset: i64) -> Result<Vec<Participant>> {
        self.auth_service.require_admin(ctx)?;
        self.participant_repository.list(limit, offset).await
    }
}

fn validate_show_fields(name: &str, location: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RunwayVoteError::InvalidInput(
            "Show name must not be empty".to_string(),
        ));
    }
    if location.trim().is_empty() {
        return Err(RunwayVoteError::InvalidInput(
            "Show location must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_show_window(start: chrono::DateTime<chrono::Utc>, end: chrono::DateTime<chrono::Utc>) -> Result<()> {
    if start >= end {
        return Err(RunwayVoteError::InvalidInput(
            "Show start time must be before its end time".to_string(),
        ));
    }

    Ok(())
}
