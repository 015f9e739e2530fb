use time::{Duration, OffsetDateTime, macros::datetime};
use uuid::Uuid;

use compass_storage::{
	Error, db::Db, embeddings, matches, mentors, models::MentorProfile, recommendations,
};

// Whole-second timestamps round-trip exactly through timestamptz columns.
const BASE: OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

async fn connect_with_schema(dsn: &str) -> Db {
	let cfg = compass_config::Postgres { dsn: dsn.to_string(), pool_max_conns: 2 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn mentor(user_id: Uuid, status: &str, now: OffsetDateTime) -> MentorProfile {
	MentorProfile {
		user_id,
		status: status.to_string(),
		meeting_format: Some("virtual".to_string()),
		monthly_hours: Some(6),
		profile_summary: Some("Backend engineer mentoring on distributed systems.".to_string()),
		why_interested: None,
		hope_to_gain: None,
		created_at: now,
		updated_at: now,
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn mentor_upsert_replaces_fields_and_keeps_created_at() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping mentor_upsert_replaces_fields_and_keeps_created_at; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let user_id = Uuid::new_v4();
	let first = mentor(user_id, "requested", BASE);

	mentors::upsert_mentor_profile(&db, &first).await.expect("Failed to insert mentor.");

	let mut second = mentor(user_id, "active", BASE + Duration::minutes(5));

	second.monthly_hours = Some(10);

	mentors::upsert_mentor_profile(&db, &second).await.expect("Failed to update mentor.");

	let stored = mentors::mentor_profile(&db, user_id)
		.await
		.expect("Failed to read mentor.")
		.expect("Mentor must exist.");

	assert_eq!(stored.status, "active");
	assert_eq!(stored.monthly_hours, Some(10));
	assert_eq!(stored.created_at, first.created_at);
	assert_eq!(stored.updated_at, second.updated_at);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn active_mentors_filters_status_and_orders_by_id() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping active_mentors_filters_status_and_orders_by_id; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let mut active_ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

	for id in &active_ids {
		mentors::upsert_mentor_profile(&db, &mentor(*id, "active", BASE))
			.await
			.expect("Failed to insert mentor.");
	}

	mentors::upsert_mentor_profile(&db, &mentor(Uuid::new_v4(), "requested", BASE))
		.await
		.expect("Failed to insert mentor.");

	let listed = mentors::active_mentors(&db).await.expect("Failed to list mentors.");

	active_ids.sort();

	assert_eq!(listed.iter().map(|m| m.user_id).collect::<Vec<_>>(), active_ids);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn match_pair_is_unique_and_settles_once() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping match_pair_is_unique_and_settles_once; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let mentee_id = Uuid::new_v4();
	let mentor_id = Uuid::new_v4();

	matches::insert_match(&db, mentee_id, mentor_id, BASE).await.expect("Failed to insert match.");

	let err = matches::insert_match(&db, mentee_id, mentor_id, BASE)
		.await
		.expect_err("Expected duplicate pair conflict.");

	assert!(matches!(err, Error::Conflict(_)), "Unexpected error: {err}");

	matches::update_match_status(&db, mentee_id, mentor_id, "accepted", BASE)
		.await
		.expect("Failed to accept match.");

	let err = matches::update_match_status(&db, mentee_id, mentor_id, "declined", BASE)
		.await
		.expect_err("Expected settled match to reject a second transition.");

	assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err}");

	let records = matches::matches_for(&db, mentee_id).await.expect("Failed to list matches.");

	assert_eq!(records.len(), 1);
	assert_eq!(records[0].status, "accepted");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn accepted_counts_aggregate_in_one_pass() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping accepted_counts_aggregate_in_one_pass; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let busy_mentor = Uuid::new_v4();
	let idle_mentor = Uuid::new_v4();

	for _ in 0..2 {
		let mentee_id = Uuid::new_v4();

		matches::insert_match(&db, mentee_id, busy_mentor, BASE)
			.await
			.expect("Failed to insert match.");
		matches::update_match_status(&db, mentee_id, busy_mentor, "accepted", BASE)
			.await
			.expect("Failed to accept match.");
	}

	matches::insert_match(&db, Uuid::new_v4(), idle_mentor, BASE)
		.await
		.expect("Failed to insert match.");

	let counts = matches::accepted_counts_by_mentor(&db).await.expect("Failed to count matches.");

	assert_eq!(counts.get(&busy_mentor), Some(&2));
	assert_eq!(counts.get(&idle_mentor), None);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn recommendation_cache_replaces_the_whole_list() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping recommendation_cache_replaces_the_whole_list; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let mentee_id = Uuid::new_v4();
	let first = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

	recommendations::upsert_recommendations(&db, mentee_id, &first, BASE + Duration::days(30), BASE)
		.await
		.expect("Failed to write cache.");

	let entry = recommendations::read_recommendations(&db, mentee_id)
		.await
		.expect("Failed to read cache.")
		.expect("Cache entry must exist.");

	assert_eq!(entry.mentor_ids, first);

	let second = vec![first[2]];
	let later = BASE + Duration::minutes(1);

	recommendations::upsert_recommendations(
		&db,
		mentee_id,
		&second,
		later + Duration::days(30),
		later,
	)
	.await
	.expect("Failed to replace cache.");

	let entry = recommendations::read_recommendations(&db, mentee_id)
		.await
		.expect("Failed to read cache.")
		.expect("Cache entry must exist.");

	assert_eq!(entry.mentor_ids, second);
	assert_eq!(entry.expires_at, Some(later + Duration::days(30)));
	assert_eq!(entry.created_at, BASE);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set COMPASS_PG_DSN to run."]
async fn embeddings_round_trip_and_batch_fetch() {
	let Some(base_dsn) = compass_testkit::env_dsn() else {
		eprintln!(
			"Skipping embeddings_round_trip_and_batch_fetch; set COMPASS_PG_DSN to run this test."
		);
		return;
	};
	let test_db = compass_testkit::TestDatabase::new(&base_dsn)
		.await
		.expect("Failed to create test database.");
	let db = connect_with_schema(test_db.dsn()).await;
	let first = Uuid::new_v4();
	let second = Uuid::new_v4();

	embeddings::upsert_profile_embedding(&db, first, "mentor", "profile", &[0.1, 0.2, 0.3], BASE)
		.await
		.expect("Failed to write embedding.");
	embeddings::upsert_profile_embedding(
		&db,
		first,
		"mentor",
		"why_interested",
		&[1.0, 0.0, 0.0],
		BASE,
	)
	.await
	.expect("Failed to write embedding.");
	embeddings::upsert_profile_embedding(&db, second, "mentor", "profile", &[0.5, 0.5, 0.5], BASE)
		.await
		.expect("Failed to write embedding.");
	// Same user, different role: must not leak into mentor reads.
	embeddings::upsert_profile_embedding(&db, first, "mentee", "profile", &[9.0, 9.0, 9.0], BASE)
		.await
		.expect("Failed to write embedding.");

	let single = embeddings::embeddings_for_user(&db, first, "mentor")
		.await
		.expect("Failed to read embeddings.");

	assert_eq!(single.len(), 2);

	let batch = embeddings::embeddings_for_users(&db, &[first, second], "mentor")
		.await
		.expect("Failed to batch read embeddings.");

	assert_eq!(batch.len(), 3);
	assert!(batch.iter().all(|row| row.role == "mentor"));

	let replaced = vec![0.9, 0.9, 0.9];

	embeddings::upsert_profile_embedding(&db, first, "mentor", "profile", &replaced, BASE)
		.await
		.expect("Failed to replace embedding.");

	let single = embeddings::embeddings_for_user(&db, first, "mentor")
		.await
		.expect("Failed to read embeddings.");
	let profile_row =
		single.iter().find(|row| row.field == "profile").expect("Profile embedding must exist.");

	assert_eq!(profile_row.vec, replaced);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
