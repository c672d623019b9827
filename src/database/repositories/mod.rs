//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod participant;
pub mod designer;
pub mod show;
pub mod registration;
pub mod vote;

// Re-export repositories
pub use participant::ParticipantRepository;
pub use designer::DesignerRepository;
pub use show::ShowRepository;
pub use registration::RegistrationRepository;
pub use vote::VoteRepository;
