use uuid::Uuid;

use crate::{Result, db::Db, models::MenteeProfile};

pub async fn mentee_profile(db: &Db, user_id: Uuid) -> Result<Option<MenteeProfile>> {
	let mentee = sqlx::query_as::<_, MenteeProfile>(
		"\
SELECT
	user_id,
	meeting_format,
	monthly_hours,
	profile_summary,
	why_interested,
	hope_to_gain,
	created_at,
	updated_at
FROM mentee_profiles
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(mentee)
}

/// Inserts or replaces the profile row. `created_at` survives replacement.
pub async fn upsert_mentee_profile(db: &Db, profile: &MenteeProfile) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO mentee_profiles (
	user_id,
	meeting_format,
	monthly_hours,
	profile_summary,
	why_interested,
	hope_to_gain,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
ON CONFLICT (user_id) DO UPDATE
SET
	meeting_format = EXCLUDED.meeting_format,
	monthly_hours = EXCLUDED.monthly_hours,
	profile_summary = EXCLUDED.profile_summary,
	why_interested = EXCLUDED.why_interested,
	hope_to_gain = EXCLUDED.hope_to_gain,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(profile.user_id)
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
