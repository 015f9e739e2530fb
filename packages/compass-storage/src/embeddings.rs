use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, db::Db, models::ProfileEmbedding};

pub async fn embeddings_for_user(
	db: &Db,
	user_id: Uuid,
	role: &str,
) -> Result<Vec<ProfileEmbedding>> {
	let rows = sqlx::query_as::<_, ProfileEmbedding>(
		"\
SELECT user_id, role, field, vec, updated_at
FROM profile_embeddings
WHERE user_id = $1 AND role = $2",
	)
	.bind(user_id)
	.bind(role)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Batch fetch for the scoring pool. One round-trip regardless of pool size.
pub async fn embeddings_for_users(
	db: &Db,
	user_ids: &[Uuid],
	role: &str,
) -> Result<Vec<ProfileEmbedding>> {
	if user_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, ProfileEmbedding>(
		"\
SELECT user_id, role, field, vec, updated_at
FROM profile_embeddings
WHERE user_id = ANY($1) AND role = $2",
	)
	.bind(user_ids)
	.bind(role)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn upsert_profile_embedding(
	db: &Db,
	user_id: Uuid,
	role: &str,
	field: &str,
	vec: &[f32],
	now: OffsetDateTime,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO profile_embeddings (user_id, role, field, vec, updated_at)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (user_id, role, field) DO UPDATE
SET vec = EXCLUDED.vec, updated_at = EXCLUDED.updated_at",
	)
	.bind(user_id)
	.bind(role)
	.bind(field)
	.bind(vec)
	.bind(now)
	.execute(&db.pool)
	.await?;

	Ok(())
}
