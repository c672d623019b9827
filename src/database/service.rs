//! Database service layer
//!
//! This module bundles the repositories behind a single handle

use crate::database::{
    DatabasePool, DesignerRepository, ParticipantRepository, RegistrationRepository,
    ShowRepository, VoteRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub participants: ParticipantRepository,
    pub designers: DesignerRepository,
    pub shows: ShowRepository,
    pub registrations: RegistrationRepository,
    pub votes: VoteRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            participants: ParticipantRepository::new(pool.clone()),
            designers: DesignerRepository::new(pool.clone()),
            shows: ShowRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            votes: VoteRepository::new(pool),
        }
    }
}
