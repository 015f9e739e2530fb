use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct MentorProfile {
	pub user_id: Uuid,
	pub status: String,
	pub meeting_format: Option<String>,
	pub monthly_hours: Option<i32>,
	pub profile_summary: Option<String>,
	pub why_interested: Option<String>,
	pub hope_to_gain: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MenteeProfile {
	pub user_id: Uuid,
	pub meeting_format: Option<String>,
	pub monthly_hours: Option<i32>,
	pub profile_summary: Option<String>,
	pub why_interested: Option<String>,
	pub hope_to_gain: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MatchRecord {
	pub requestor_id: Uuid,
	pub mentor_id: Uuid,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ProfileEmbedding {
	pub user_id: Uuid,
	pub role: String,
	pub field: String,
	pub vec: Vec<f32>,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RecommendationCacheEntry {
	pub mentee_id: Uuid,
	pub mentor_ids: Vec<Uuid>,
	pub expires_at: Option<OffsetDateTime>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
