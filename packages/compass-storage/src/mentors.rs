use uuid::Uuid;

use crate::{Result, db::Db, models::MentorProfile};

/// Eligible mentor pool in a fixed enumeration order. Downstream ranking
/// relies on this order as the deterministic tie-break.
pub async fn active_mentors(db: &Db) -> Result<Vec<MentorProfile>> {
	let mentors = sqlx::query_as::<_, MentorProfile>(
		"\
SELECT
	user_id,
	status,
	meeting_format,
	monthly_hours,
	profile_summary,
	why_interested,
	hope_to_gain,
	created_at,
	updated_at
FROM mentor_profiles
WHERE status = 'active'
ORDER BY user_id",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(mentors)
}

pub async fn mentor_profile(db: &Db, user_id: Uuid) -> Result<Option<MentorProfile>> {
	let mentor = sqlx::query_as::<_, MentorProfile>(
		"\
SELECT
	user_id,
	status,
	meeting_format,
	monthly_hours,
	profile_summary,
	why_interested,
	hope_to_gain,
	created_at,
	updated_at
FROM mentor_profiles
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(mentor)
}

/// Inserts or replaces the profile row. `created_at` survives replacement.
pub async fn upsert_mentor_profile(db: &Db, profile: &MentorProfile) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO mentor_profiles (
	user_id,
	status,
	meeting_format,
	monthly_hours,
	profile_summary,
	why_interested,
	hope_to_gain,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
ON CONFLICT (user_id) DO UPDATE
SET
	status = EXCLUDED.status,
	meeting_format = EXCLUDED.meeting_format,
	monthly_hours = EXCLUDED.monthly_hours,
	profile_summary = EXCLUDED.profile_summary,
	why_interested = EXCLUDED.why_interested,
	hope_to_gain = EXCLUDED.hope_to_gain,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(profile.user_id)
	.bind(profile.status.as_str())
	.bind(profile.meeting_format.as_deref())
	.bind(profile.monthly_hours)
	.bind(profile.profile_summary.as_deref())
	.bind(profile.why_interested.as_deref())
	.bind(profile.hope_to_gain.as_deref())
	.bind(profile.created_at)
	.bind(profile.updated_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}
