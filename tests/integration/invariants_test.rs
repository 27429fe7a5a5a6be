//! Database-backed invariant tests
//!
//! Exercises the transactional free functions directly against Postgres:
//! capacity enforcement, counter maintenance, the primary-photo swap, and
//! the idempotent status transitions. Each test skips when no test database
//! is reachable.

mod common;

use chrono::{TimeZone, Utc};

use pitchside_common::{Error, RepositoryError};
use pitchside_teams::{
    add_member_tx, adjust_teams_count_tx, remove_member_tx, update_team_tx, Booking,
    BookingStatus, TeamStatus, TeamsRepositories,
};
use pitchside_venues::{
    insert_photo_tx, set_primary_photo_tx, Venue, VenuePhoto, VenueType, VenuesRepositories,
};

use common::TestDb;

#[tokio::test]
async fn test_capacity_is_never_exceeded() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let first = db.create_user().await;
    let second = db.create_user().await;
    let team = db.create_team(leader.id, 2).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    // Leader occupies one slot; this fills the team
    let mut tx = repos.begin().await.unwrap();
    add_member_tx(&mut tx, team.id, first.id).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = repos.begin().await.unwrap();
    let err = add_member_tx(&mut tx, team.id, second.id)
        .await
        .unwrap_err();
    tx.rollback().await.unwrap();

    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(
        repos
            .memberships
            .count_active_for_team(team.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_duplicate_member_rejected() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let member = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    let mut tx = repos.begin().await.unwrap();
    add_member_tx(&mut tx, team.id, member.id).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = repos.begin().await.unwrap();
    let err = add_member_tx(&mut tx, team.id, member.id)
        .await
        .unwrap_err();
    tx.rollback().await.unwrap();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_teams_count_tracks_membership() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let member = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    assert_eq!(db.teams_count(leader.id).await, 1);
    assert_eq!(db.teams_count(member.id).await, 0);

    let mut tx = repos.begin().await.unwrap();
    add_member_tx(&mut tx, team.id, member.id).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(db.teams_count(member.id).await, 1);

    let mut tx = repos.begin().await.unwrap();
    remove_member_tx(&mut tx, team.id, member.id).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(db.teams_count(member.id).await, 0);

    // The leader's membership and counter are untouched throughout
    assert_eq!(db.teams_count(leader.id).await, 1);
}

#[tokio::test]
async fn test_leader_cannot_be_removed() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    let mut tx = repos.begin().await.unwrap();
    let err = remove_member_tx(&mut tx, team.id, leader.id)
        .await
        .unwrap_err();
    tx.rollback().await.unwrap();

    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(db.teams_count(leader.id).await, 1);
}

#[tokio::test]
async fn test_counter_decrement_below_zero_is_desync() {
    let Some(db) = TestDb::new().await else { return };
    let user = db.create_user().await;
    let repos = TeamsRepositories::new(db.pool.clone());

    let mut tx = repos.begin().await.unwrap();
    let err = adjust_teams_count_tx(&mut tx, user.id, -1)
        .await
        .unwrap_err();
    tx.rollback().await.unwrap();

    assert!(matches!(err, RepositoryError::CounterDesync(_)));
    assert_eq!(db.teams_count(user.id).await, 0);
}

#[tokio::test]
async fn test_lowering_capacity_below_member_count_conflicts() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let first = db.create_user().await;
    let second = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    let mut tx = repos.begin().await.unwrap();
    add_member_tx(&mut tx, team.id, first.id).await.unwrap();
    add_member_tx(&mut tx, team.id, second.id).await.unwrap();
    tx.commit().await.unwrap();

    // Three active members; max_members 2 must be refused under the lock
    let mut resized = team.clone();
    resized.max_members = 2;
    let mut tx = repos.begin().await.unwrap();
    let err = update_team_tx(&mut tx, &resized).await.unwrap_err();
    tx.rollback().await.unwrap();
    assert!(matches!(err, Error::Conflict(_)));

    resized.max_members = 3;
    let mut tx = repos.begin().await.unwrap();
    let updated = update_team_tx(&mut tx, &resized).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(updated.max_members, 3);
}

#[tokio::test]
async fn test_archive_is_idempotent() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let repos = TeamsRepositories::new(db.pool.clone());

    repos
        .teams
        .set_status(team.id, TeamStatus::Archived)
        .await
        .unwrap();
    repos
        .teams
        .set_status(team.id, TeamStatus::Archived)
        .await
        .unwrap();

    let archived = repos.teams.get_by_id(team.id).await.unwrap().unwrap();
    assert_eq!(archived.status, TeamStatus::Archived);
}

#[tokio::test]
async fn test_cancel_booking_is_idempotent() {
    let Some(db) = TestDb::new().await else { return };
    let leader = db.create_user().await;
    let team = db.create_team(leader.id, 5).await;
    let owner = db.create_user().await;

    let venue = Venue::new(
        "Riverside Court".to_string(),
        None,
        VenueType::Court,
        None,
        None,
        owner.id,
        None,
    )
    .unwrap();
    let venue = VenuesRepositories::new(db.pool.clone())
        .venues
        .create(&venue)
        .await
        .unwrap();

    let start = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 6, 1, 11, 30, 0).unwrap();
    let booking = Booking::new(venue.id, team.id, start, end, None).unwrap();

    let repos = TeamsRepositories::new(db.pool.clone());
    let booking = repos.bookings.create(&booking).await.unwrap();

    repos
        .bookings
        .set_status(booking.id, BookingStatus::Cancelled)
        .await
        .unwrap();
    repos
        .bookings
        .set_status(booking.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    let cancelled = repos.bookings.get_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_primary_photo_is_exclusive() {
    let Some(db) = TestDb::new().await else { return };
    let owner = db.create_user().await;
    let repos = VenuesRepositories::new(db.pool.clone());

    let venue = Venue::new(
        "City Gym".to_string(),
        None,
        VenueType::Gym,
        None,
        None,
        owner.id,
        None,
    )
    .unwrap();
    let venue = repos.venues.create(&venue).await.unwrap();

    let mut photos = Vec::new();
    let mut tx = repos.begin().await.unwrap();
    for n in 0..3 {
        let photo = VenuePhoto::new(venue.id, format!("https://cdn.test/p{}.png", n), None);
        photos.push(insert_photo_tx(&mut tx, &photo).await.unwrap());
    }
    tx.commit().await.unwrap();

    for target in [&photos[0], &photos[2]] {
        let mut tx = repos.begin().await.unwrap();
        set_primary_photo_tx(&mut tx, venue.id, target.id)
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    let primary_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM venue_photos WHERE venue_id = $1 AND is_primary",
    )
    .bind(venue.id)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(primary_count, 1);

    let current = repos.photos.get_by_id(photos[2].id).await.unwrap().unwrap();
    assert!(current.is_primary);

    // A photo from outside the venue cannot become its primary
    let mut tx = repos.begin().await.unwrap();
    let err = set_primary_photo_tx(&mut tx, venue.id, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    tx.rollback().await.unwrap();
    assert!(matches!(err, RepositoryError::NotFound));
}
