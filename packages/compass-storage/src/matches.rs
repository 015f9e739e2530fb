use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::MatchRecord};

/// All match records for one mentee, oldest request first.
pub async fn matches_for(db: &Db, mentee_id: Uuid) -> Result<Vec<MatchRecord>> {
	let records = sqlx::query_as::<_, MatchRecord>(
		"\
SELECT requestor_id, mentor_id, status, created_at, updated_at
FROM mentorship_matches
WHERE requestor_id = $1
ORDER BY created_at, mentor_id",
	)
	.bind(mentee_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(records)
}

/// Accepted-mentee count per mentor, computed in one aggregate pass. Mentors
/// with no accepted matches are simply absent.
pub async fn accepted_counts_by_mentor(db: &Db) -> Result<HashMap<Uuid, i64>> {
	let rows: Vec<(Uuid, i64)> = sqlx::query_as(
		"\
SELECT mentor_id, COUNT(*)
FROM mentorship_matches
WHERE status = 'accepted'
GROUP BY mentor_id",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().collect())
}

/// Creates a pending match. The pair key is unique for all time: a prior
/// record in any status makes this a conflict.
pub async fn insert_match(
	db: &Db,
	requestor_id: Uuid,
	mentor_id: Uuid,
	now: OffsetDateTime,
) -> Result<()> {
	let result = sqlx::query(
		"\
INSERT INTO mentorship_matches (requestor_id, mentor_id, status, created_at, updated_at)
VALUES ($1, $2, 'pending', $3, $3)
ON CONFLICT (requestor_id, mentor_id) DO NOTHING",
	)
	.bind(requestor_id)
	.bind(mentor_id)
	.bind(now)
	.execute(&db.pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::Conflict(format!(
			"A match between {requestor_id} and {mentor_id} already exists."
		)));
	}

	Ok(())
}

/// Moves a pending match to `accepted` or `declined`. Settled or missing
/// records are not found.
pub async fn update_match_status(
	db: &Db,
	requestor_id: Uuid,
	mentor_id: Uuid,
	status: &str,
	now: OffsetDateTime,
) -> Result<()> {
	let result = sqlx::query(
		"\
UPDATE mentorship_matches
SET status = $3, updated_at = $4
WHERE requestor_id = $1
	AND mentor_id = $2
	AND status = 'pending'",
	)
	.bind(requestor_id)
	.bind(mentor_id)
	.bind(status)
	.bind(now)
	.execute(&db.pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!(
			"No pending match between {requestor_id} and {mentor_id}."
		)));
	}

	Ok(())
}
