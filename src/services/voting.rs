//! Voting service implementation
//!
//! This service records votes (at most one per participant, designer, and
//! show), removes them together with any attached image, and aggregates
//! per-designer tallies for a show.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::config::settings::Settings;
use crate::database::repositories::{RegistrationRepository, ShowRepository, VoteRepository};
use crate::models::designer::Designer;
use crate::models::vote::{DesignerTally, ShowTally, Vote, VotePage, VoteSubmission, VoteWithDetails};
use crate::services::auth::{AuthContext, AuthService};
use crate::services::notification::{VoteUpdate, VoteUpdateChannel};
use crate::services::storage::FileStore;
use crate::utils::errors::{Result, RunwayVoteError};
use crate::utils::logging::log_vote_action;

/// Collapse a designer selection to its first-occurrence order
///
/// A submission is a set: duplicates in the input must not produce duplicate
/// vote rows.
pub fn dedup_selection(designer_ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    designer_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Rank a show's assigned designers by descending vote count
///
/// Designers without votes appear with a count of 0. The sort is stable, so
/// ties keep the assignment order of the input.
pub fn rank_tally(assigned: &[Designer], counts: &HashMap<i64, i64>) -> Vec<DesignerTally> {
    let mut tallies: Vec<DesignerTally> = assigned
        .iter()
        .map(|designer| DesignerTally {
            designer_id: designer.id,
            name: designer.name.clone(),
            category: designer.category.clone(),
            vote_count: counts.get(&designer.id).copied().unwrap_or(0),
        })
        .collect();

    tallies.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
    tallies
}

/// Voting service for recording votes and computing tallies
#[derive(Clone)]
pub struct VoteService {
    auth_service: AuthService,
    vote_repository: VoteRepository,
    registration_repository: RegistrationRepository,
    show_repository: ShowRepository,
    file_store: Arc<dyn FileStore>,
    update_channel: Arc<dyn VoteUpdateChannel>,
    settings: Settings,
}

impl VoteService {
    /// Create a new VoteService instance
    pub fn new(
        auth_service: AuthService,
        vote_repository: VoteRepository,
        registration_repository: RegistrationRepository,
        show_repository: ShowRepository,
        file_store: Arc<dyn FileStore>,
        update_channel: Arc<dyn VoteUpdateChannel>,
        settings: Settings,
    ) -> Self {
        Self {
            auth_service,
            vote_repository,
            registration_repository,
            show_repository,
            file_store,
            update_channel,
            settings,
        }
    }

    /// Record the caller's votes for the selected designers in a show
    ///
    /// The caller must be registered for the show and select at least one
    /// designer. Designers already voted for are skipped silently; the
    /// returned count covers newly created votes only.
    pub async fn submit_votes(&self, ctx: &AuthContext, submission: VoteSubmission) -> Result<u64> {
        if submission.designer_ids.is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "You must vote for at least one designer".to_string(),
            ));
        }

        let participant = self.auth_service.resolve_participant(ctx).await?;
        let show_id = submission.show_id;

        if !self
            .registration_repository
            .is_registered(participant.id, show_id)
            .await?
        {
            return Err(RunwayVoteError::NotRegistered { show_id });
        }

        self.show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        let assigned = self.show_repository.get_assigned_designers(show_id).await?;
        if assigned.is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "No designers are assigned to this show, voting is not possible".to_string(),
            ));
        }

        let mut created = 0;
        for designer_id in dedup_selection(&submission.designer_ids) {
            let inserted = self
                .vote_repository
                .insert_if_absent(participant.id, designer_id, show_id)
                .await?;
            if inserted > 0 {
                log_vote_action(participant.id, show_id, designer_id, "vote");
            } else {
                debug!(
                    participant_id = participant.id,
                    show_id = show_id,
                    designer_id = designer_id,
                    "Vote already recorded, skipping"
                );
            }
            created += inserted;
        }

        info!(
            participant_id = participant.id,
            show_id = show_id,
            new_votes = created,
            "Vote submission processed"
        );

        if created > 0 {
            self.notify(show_id).await;
        }

        Ok(created)
    }

    /// Remove the caller's vote for a designer in a show
    ///
    /// Any attached image is released after the vote row is gone; a failed
    /// release is logged but never fails the removal.
    pub async fn unvote(&self, ctx: &AuthContext, show_id: i64, designer_id: i64) -> Result<()> {
        let participant = self.auth_service.resolve_participant(ctx).await?;

        let vote = self
            .vote_repository
            .find(participant.id, designer_id, show_id)
            .await?
            .ok_or(RunwayVoteError::VoteNotFound { designer_id, show_id })?;

        self.vote_repository
            .delete(participant.id, designer_id, show_id)
            .await?;

        if let Some(reference) = &vote.image_ref {
            self.release_image(reference).await;
        }

        log_vote_action(participant.id, show_id, designer_id, "unvote");
        self.notify(show_id).await;
        Ok(())
    }

    /// Attach an image to the caller's existing vote
    ///
    /// Replacing an image releases the previous one after the vote row has
    /// been updated.
    pub async fn attach_image(
        &self,
        ctx: &AuthContext,
        show_id: i64,
        designer_id: i64,
        bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<Vote> {
        if !self.settings.features.vote_images {
            return Err(RunwayVoteError::InvalidInput(
                "Vote image attachments are disabled".to_string(),
            ));
        }

        if bytes.is_empty() {
            return Err(RunwayVoteError::InvalidInput(
                "Image attachment must not be empty".to_string(),
            ));
        }

        let participant = self.auth_service.resolve_participant(ctx).await?;

        let vote = self
            .vote_repository
            .find(participant.id, designer_id, show_id)
            .await?
            .ok_or(RunwayVoteError::VoteNotFound { designer_id, show_id })?;

        let reference = self.file_store.store(bytes, extension).await?;
        let updated = self
            .vote_repository
            .set_image_ref(vote.id, Some(&reference))
            .await?;

        if let Some(previous) = &vote.image_ref {
            self.release_image(previous).await;
        }

        log_vote_action(participant.id, show_id, designer_id, "attach_image");
        Ok(updated)
    }

    /// Get the caller's votes within a show
    pub async fn my_votes(&self, ctx: &AuthContext, show_id: i64) -> Result<Vec<Vote>> {
        let participant = self.auth_service.resolve_participant(ctx).await?;
        self.vote_repository
            .get_votes_for_participant_in_show(participant.id, show_id)
            .await
    }

    /// Compute the per-designer tally for a show, admin only
    pub async fn tally_show(&self, ctx: &AuthContext, show_id: i64) -> Result<ShowTally> {
        self.auth_service.require_admin(ctx)?;
        self.tally(show_id).await
    }

    /// Voting page for a registered participant: tally plus own selections
    pub async fn vote_page(&self, ctx: &AuthContext, show_id: i64) -> Result<VotePage> {
        let participant = self.auth_service.resolve_participant(ctx).await?;

        if !self
            .registration_repository
            .is_registered(participant.id, show_id)
            .await?
        {
            return Err(RunwayVoteError::NotRegistered { show_id });
        }

        let tally = self.tally(show_id).await?;
        let voted_designer_ids = self
            .vote_repository
            .get_votes_for_participant_in_show(participant.id, show_id)
            .await?
            .into_iter()
            .map(|vote| vote.designer_id)
            .collect();

        Ok(VotePage {
            tally,
            voted_designer_ids,
        })
    }

    /// List all votes with participant, designer, and show names, admin only
    pub async fn list_votes(&self, ctx: &AuthContext) -> Result<Vec<VoteWithDetails>> {
        self.auth_service.require_admin(ctx)?;
        self.vote_repository.list_with_details().await
    }

    async fn tally(&self, show_id: i64) -> Result<ShowTally> {
        let show = self
            .show_repository
            .find_by_id(show_id)
            .await?
            .ok_or(RunwayVoteError::ShowNotFound { show_id })?;

        let assigned = self.show_repository.get_assigned_designers(show_id).await?;
        let counts: HashMap<i64, i64> = self
            .vote_repository
            .count_by_designer_for_show(show_id)
            .await?
            .into_iter()
            .collect();
        let total_votes = self.vote_repository.count_for_show(show_id).await?;

        Ok(ShowTally {
            show_id,
            show_name: show.name,
            total_votes,
            designers: rank_tally(&assigned, &counts),
        })
    }

    async fn release_image(&self, reference: &str) {
        if let Err(e) = self.file_store.delete(reference).await {
            warn!(reference = %reference, error = %e, "Failed to release vote image");
        }
    }

    async fn notify(&self, show_id: i64) {
        if !self.settings.features.live_updates {
            return;
        }

        if let Err(e) = self.update_channel.publish(VoteUpdate { show_id }).await {
            warn!(show_id = show_id, error = %e, "Failed to publish vote update");
        }
    }
}
