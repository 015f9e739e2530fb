use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, db::Db, models::RecommendationCacheEntry};

pub async fn read_recommendations(
	db: &Db,
	mentee_id: Uuid,
) -> Result<Option<RecommendationCacheEntry>> {
	let entry = sqlx::query_as::<_, RecommendationCacheEntry>(
		"\
SELECT mentee_id, mentor_ids, expires_at, created_at, updated_at
FROM recommendation_cache
WHERE mentee_id = $1",
	)
	.bind(mentee_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(entry)
}

/// Replaces the cached list as a whole in one statement. Concurrent refreshes
/// for the same mentee resolve to last-committed-write-wins; a reader never
/// observes a partial list.
pub async fn upsert_recommendations(
	db: &Db,
	mentee_id: Uuid,
	mentor_ids: &[Uuid],
	expires_at: OffsetDateTime,
	now: OffsetDateTime,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO recommendation_cache (mentee_id, mentor_ids, expires_at, created_at, updated_at)
VALUES ($1, $2, $3, $4, $4)
ON CONFLICT (mentee_id) DO UPDATE
SET
	mentor_ids = EXCLUDED.mentor_ids,
	expires_at = EXCLUDED.expires_at,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(mentee_id)
	.bind(mentor_ids)
	.bind(expires_at)
	.bind(now)
	.execute(&db.pool)
	.await?;

	Ok(())
}
