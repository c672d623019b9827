//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod participant;
pub mod designer;
pub mod show;
pub mod registration;
pub mod vote;

// Re-export commonly used models
pub use participant::{CreateParticipantRequest, Participant, UpdateParticipantRequest};
pub use designer::{CreateDesignerRequest, Designer, UpdateDesignerRequest};
pub use show::{CreateShowRequest, DesignerAssignment, Show, UpdateShowRequest};
pub use registration::Registration;
pub use vote::{DesignerTally, ShowTally, Vote, VotePage, VoteSubmission, VoteWithDetails};
