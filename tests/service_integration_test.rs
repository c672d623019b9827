//! Service integration tests
//!
//! End-to-end tests for registration, voting, and tallying against a real
//! PostgreSQL database. Set TEST_DATABASE_URL to run against an existing
//! database, or RUN_DB_TESTS to spin up a throwaway container; without
//! either variable these tests skip.

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use serial_test::serial;
use helpers::database_helper::{db_tests_enabled, TestDatabase};
use helpers::test_data::{designer_request, participant_request, show_request};
use RunwayVote::models::participant::Participant;
use RunwayVote::models::vote::VoteSubmission;
use RunwayVote::services::auth::AuthContext;
use RunwayVote::services::notification::BroadcastChannel;
use RunwayVote::services::storage::{FileStore, LocalFileStore};
use RunwayVote::{DatabaseService, RunwayVoteError, ServiceFactory, Settings};

const ADMIN_EMAIL: &str = "admin@runwayvote.com";

struct TestHarness {
    db: TestDatabase,
    services: ServiceFactory,
    admin_ctx: AuthContext,
    _storage_dir: tempfile::TempDir,
    storage_root: std::path::PathBuf,
}

impl TestHarness {
    async fn new() -> Option<Self> {
        if !db_tests_enabled() {
            eprintln!("skipping: set TEST_DATABASE_URL or RUN_DB_TESTS to run DB-backed tests");
            return None;
        }

        let db = TestDatabase::new().await.expect("test database");
        db.cleanup().await.expect("cleanup");

        let storage_dir = tempfile::tempdir().expect("tempdir");
        let storage_root = storage_dir.path().to_path_buf();

        let mut settings = Settings::default();
        settings.auth.admin_emails = vec![ADMIN_EMAIL.to_string()];
        settings.storage.root_path = storage_root.to_string_lossy().to_string();

        let database = DatabaseService::new(db.pool.clone());
        let file_store: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(&settings.storage));
        let channel = Arc::new(BroadcastChannel::new(16));
        let services = ServiceFactory::new(settings, database, file_store, channel);
        let admin_ctx = services.auth_service.context_for(ADMIN_EMAIL);

        Some(Self {
            db,
            services,
            admin_ctx,
            _storage_dir: storage_dir,
            storage_root,
        })
    }

    async fn create_participant(&self) -> (Participant, AuthContext) {
        let participant = self
            .services
            .admin_service
            .create_participant(&self.admin_ctx, participant_request())
            .await
            .expect("create participant");
        let ctx = self.services.auth_service.context_for(&participant.email);
        (participant, ctx)
    }
}

#[tokio::test]
#[serial]
async fn registration_enforces_schedule_conflicts() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    // Tomorrow: A 10:00-12:00, B 11:00-13:00 (overlap), C 12:00-13:00 (touching)
    let base = 24 * 60;
    let show_a = svc.admin_service.create_show(admin, show_request("A", base + 600, 120)).await.unwrap();
    let show_b = svc.admin_service.create_show(admin, show_request("B", base + 660, 120)).await.unwrap();
    let show_c = svc.admin_service.create_show(admin, show_request("C", base + 720, 60)).await.unwrap();

    svc.registration_service.register(&ctx, show_a.id).await.unwrap();

    let conflict = svc.registration_service.register(&ctx, show_b.id).await;
    assert_matches!(
        conflict,
        Err(RunwayVoteError::ScheduleConflict { conflicting_show_id, .. }) if conflicting_show_id == show_a.id
    );

    // Touching boundary is not a conflict
    svc.registration_service.register(&ctx, show_c.id).await.unwrap();

    let duplicate = svc.registration_service.register(&ctx, show_a.id).await;
    assert_matches!(duplicate, Err(RunwayVoteError::AlreadyRegistered { .. }));

    let missing = svc.registration_service.register(&ctx, 999_999).await;
    assert_matches!(missing, Err(RunwayVoteError::ShowNotFound { .. }));

    let my_shows = svc.registration_service.my_shows(&ctx).await.unwrap();
    assert_eq!(my_shows.len(), 2);
}

#[tokio::test]
#[serial]
async fn voting_is_idempotent_and_tally_keeps_zero_counts() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Gala", 60, 120)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Winter Jackets")).await.unwrap();
    let d2 = svc.admin_service.create_designer(admin, designer_request("Bridal Wear")).await.unwrap();
    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();
    svc.admin_service.assign_designer(admin, d2.id, show.id).await.unwrap();

    svc.registration_service.register(&ctx, show.id).await.unwrap();

    // Duplicates in one submission collapse
    let created = svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id, d1.id, d2.id] })
        .await
        .unwrap();
    assert_eq!(created, 2);

    // Resubmission is a no-op, not an error
    let created = svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await
        .unwrap();
    assert_eq!(created, 0);

    // Two more voters for d1 only
    for _ in 0..2 {
        let (_, other_ctx) = harness.create_participant().await;
        svc.registration_service.register(&other_ctx, show.id).await.unwrap();
        svc.vote_service
            .submit_votes(&other_ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
            .await
            .unwrap();
    }

    let tally = svc.vote_service.tally_show(admin, show.id).await.unwrap();
    assert_eq!(tally.total_votes, 4);
    assert_eq!(tally.designers.len(), 2);
    assert_eq!((tally.designers[0].designer_id, tally.designers[0].vote_count), (d1.id, 3));
    assert_eq!((tally.designers[1].designer_id, tally.designers[1].vote_count), (d2.id, 1));
}

#[tokio::test]
#[serial]
async fn voting_requires_registration_and_a_selection() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Gated", 60, 60)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Street")).await.unwrap();
    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();

    let not_registered = svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await;
    assert_matches!(not_registered, Err(RunwayVoteError::NotRegistered { .. }));

    svc.registration_service.register(&ctx, show.id).await.unwrap();

    let empty = svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![] })
        .await;
    assert_matches!(empty, Err(RunwayVoteError::InvalidInput(_)));

    let unknown_ctx = svc.auth_service.context_for("nobody@example.com");
    let unknown = svc.vote_service
        .submit_votes(&unknown_ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await;
    assert_matches!(unknown, Err(RunwayVoteError::NotAParticipant { .. }));

    // Tally stays admin-only
    let forbidden = svc.vote_service.tally_show(&ctx, show.id).await;
    assert_matches!(forbidden, Err(RunwayVoteError::PermissionDenied(_)));
}

#[tokio::test]
#[serial]
async fn unvote_removes_the_row_and_releases_the_image() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Pictures", 60, 60)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Formal")).await.unwrap();
    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();
    svc.registration_service.register(&ctx, show.id).await.unwrap();

    let missing = svc.vote_service.unvote(&ctx, show.id, d1.id).await;
    assert_matches!(missing, Err(RunwayVoteError::VoteNotFound { .. }));

    svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await
        .unwrap();

    let vote = svc.vote_service
        .attach_image(&ctx, show.id, d1.id, b"jpeg bytes", Some("jpg"))
        .await
        .unwrap();
    let reference = vote.image_ref.expect("image reference recorded");
    assert!(harness.storage_root.join(&reference).exists());

    svc.vote_service.unvote(&ctx, show.id, d1.id).await.unwrap();
    assert!(!harness.storage_root.join(&reference).exists());

    let page = svc.vote_service.vote_page(&ctx, show.id).await.unwrap();
    assert!(page.voted_designer_ids.is_empty());
    assert_eq!(page.tally.total_votes, 0);
}

#[tokio::test]
#[serial]
async fn unvote_succeeds_when_the_image_is_already_gone() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Lost", 60, 60)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Casual")).await.unwrap();
    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();
    svc.registration_service.register(&ctx, show.id).await.unwrap();
    svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await
        .unwrap();

    let vote = svc.vote_service
        .attach_image(&ctx, show.id, d1.id, b"bytes", None)
        .await
        .unwrap();
    let reference = vote.image_ref.unwrap();

    // Image disappears out from under us; release is best-effort
    std::fs::remove_file(harness.storage_root.join(&reference)).unwrap();
    svc.vote_service.unvote(&ctx, show.id, d1.id).await.unwrap();

    let page = svc.vote_service.vote_page(&ctx, show.id).await.unwrap();
    assert_eq!(page.tally.total_votes, 0);
}

#[tokio::test]
#[serial]
async fn unregistration_windows_are_enforced() {
    let Some(harness) = TestHarness::new().await else { return };
    let (_, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    // Started an hour ago, still running
    let running = svc.admin_service.create_show(admin, show_request("Running", -60, 180)).await.unwrap();
    // Ended an hour ago
    let finished = svc.admin_service.create_show(admin, show_request("Finished", -180, 120)).await.unwrap();
    // Starts in an hour
    let upcoming = svc.admin_service.create_show(admin, show_request("Upcoming", 60, 60)).await.unwrap();

    svc.registration_service.register(&ctx, running.id).await.unwrap();
    svc.registration_service.register(&ctx, finished.id).await.unwrap();
    svc.registration_service.register(&ctx, upcoming.id).await.unwrap();

    let started = svc.registration_service.unregister(&ctx, running.id).await;
    assert_matches!(started, Err(RunwayVoteError::ShowAlreadyStarted { .. }));

    svc.registration_service.unregister(&ctx, upcoming.id).await.unwrap();

    let not_past = svc.registration_service.delete_past_registration(&ctx, running.id).await;
    assert_matches!(not_past, Err(RunwayVoteError::ShowNotFinished { .. }));

    svc.registration_service.delete_past_registration(&ctx, finished.id).await.unwrap();

    let gone = svc.registration_service.unregister(&ctx, upcoming.id).await;
    assert_matches!(gone, Err(RunwayVoteError::RegistrationNotFound { .. }));
}

#[tokio::test]
#[serial]
async fn deleting_a_show_cascades_to_registrations_and_votes() {
    let Some(harness) = TestHarness::new().await else { return };
    let (participant, ctx) = harness.create_participant().await;
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Doomed", 60, 60)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Bridal")).await.unwrap();
    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();
    svc.registration_service.register(&ctx, show.id).await.unwrap();
    svc.vote_service
        .submit_votes(&ctx, VoteSubmission { show_id: show.id, designer_ids: vec![d1.id] })
        .await
        .unwrap();

    svc.admin_service.delete_show(admin, show.id).await.unwrap();

    let database = DatabaseService::new(harness.db.pool.clone());
    assert!(!database.registrations.is_registered(participant.id, show.id).await.unwrap());
    assert_eq!(database.votes.count_for_show(show.id).await.unwrap(), 0);

    let tally = svc.vote_service.tally_show(admin, show.id).await;
    assert_matches!(tally, Err(RunwayVoteError::ShowNotFound { .. }));
}

#[tokio::test]
#[serial]
async fn duplicate_participant_email_is_a_conflict() {
    let Some(harness) = TestHarness::new().await else { return };
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let mut request = participant_request();
    request.email = "taken@runwayvote.com".to_string();
    svc.admin_service.create_participant(admin, request.clone()).await.unwrap();

    let duplicate = svc.admin_service.create_participant(admin, request).await;
    assert_matches!(duplicate, Err(RunwayVoteError::EmailTaken { .. }));
}

#[tokio::test]
#[serial]
async fn duplicate_designer_assignment_is_a_conflict() {
    let Some(harness) = TestHarness::new().await else { return };
    let admin = &harness.admin_ctx;
    let svc = &harness.services;

    let show = svc.admin_service.create_show(admin, show_request("Once", 60, 60)).await.unwrap();
    let d1 = svc.admin_service.create_designer(admin, designer_request("Avant Garde")).await.unwrap();

    svc.admin_service.assign_designer(admin, d1.id, show.id).await.unwrap();
    let duplicate = svc.admin_service.assign_designer(admin, d1.id, show.id).await;
    assert_matches!(duplicate, Err(RunwayVoteError::AlreadyAssigned { .. }));
}
