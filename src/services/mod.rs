//! Services module
//!
//! This module contains business logic services

pub mod admin;
pub mod auth;
pub mod notification;
pub mod registration;
pub mod storage;
pub mod voting;

// Re-export commonly used services
pub use admin::AdminService;
pub use auth::{AuthContext, AuthService, Role};
pub use notification::{BroadcastChannel, NullChannel, VoteUpdate, VoteUpdateChannel};
pub use registration::RegistrationService;
pub use storage::{FileStore, LocalFileStore};
pub use voting::VoteService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub registration_service: RegistrationService,
    pub vote_service: VoteService,
    pub admin_service: AdminService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        database: DatabaseService,
        file_store: Arc<dyn FileStore>,
        update_channel: Arc<dyn VoteUpdateChannel>,
    ) -> Self {
        let auth_service = AuthService::new(database.participants.clone(), settings.clone());
        let registration_service = RegistrationService::new(
            auth_service.clone(),
            database.registrations.clone(),
            database.shows.clone(),
        );
        let vote_service = VoteService::new(
            auth_service.clone(),
            database.votes.clone(),
            database.registrations.clone(),
            database.shows.clone(),
            file_store,
            update_channel,
            settings,
        );
        let admin_service = AdminService::new(
            auth_service.clone(),
            database.shows.clone(),
            database.designers.clone(),
            database.participants.clone(),
        );

        Self {
            auth_service,
            registration_service,
            vote_service,
            admin_service,
        }
    }
}
