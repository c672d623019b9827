//! Test data builders
//!
//! Generates realistic request payloads for integration tests.

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use RunwayVote::models::designer::CreateDesignerRequest;
use RunwayVote::models::participant::CreateParticipantRequest;
use RunwayVote::models::show::CreateShowRequest;

/// Build a participant request with a generated name and email
pub fn participant_request() -> CreateParticipantRequest {
    CreateParticipantRequest {
        name: Name().fake(),
        email: SafeEmail().fake(),
    }
}

/// Build a designer request with a generated name
pub fn designer_request(category: &str) -> CreateDesignerRequest {
    CreateDesignerRequest {
        name: Name().fake(),
        category: category.to_string(),
    }
}

/// Build a show request offset from now by whole minutes
///
/// Negative offsets place the window in the past.
pub fn show_request(name: &str, start_offset_min: i64, duration_min: i64) -> CreateShowRequest {
    let start = Utc::now() + Duration::minutes(start_offset_min);
    CreateShowRequest {
        name: name.to_string(),
        location: "Main Hall".to_string(),
        start_time: start,
        end_time: start + Duration::minutes(duration_min),
    }
}
