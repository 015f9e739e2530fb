//! Mentor recommendation pipeline: cache read, tier assembly, scored
//! gap-fill, merge, cache write-back.

mod candidates;
mod rank;

use compass_storage::{
	matches, mentees, mentors, models::RecommendationCacheEntry, recommendations,
};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{CompassService, Error, Result};

/// Mentors the mentee already reached out to. These stay at the head of the
/// list regardless of score.
pub const PRIORITY_REQUESTED: i16 = 1;
/// Everyone else, cached or freshly scored.
pub const PRIORITY_DISCOVERY: i16 = 2;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecommendationRequest {
	pub mentee_id: Uuid,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecommendationItem {
	pub mentor_id: Uuid,
	/// Absent for entries carried over from the cache or an open request;
	/// those were never scored on this pass.
	pub score: Option<f32>,
	pub priority: i16,
	pub from_existing: bool,
	pub has_requested: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecommendationResponse {
	pub mentee_id: Uuid,
	pub items: Vec<RecommendationItem>,
}

impl CompassService {
	/// Produces the ranked mentor list for one mentee. A still-valid cache
	/// seeds the list in its stored order; the remainder is scored fresh.
	pub async fn recommend_mentors(
		&self,
		req: RecommendationRequest,
	) -> Result<RecommendationResponse> {
		if req.mentee_id.is_nil() {
			return Err(Error::InvalidRequest { message: "mentee_id is required.".to_string() });
		}

		let limit = req.limit.unwrap_or(self.cfg.matching.recommendation_limit).max(1) as usize;
		let Some(mentee) = mentees::mentee_profile(&self.db, req.mentee_id).await? else {
			return Err(Error::NotFound {
				message: format!("No mentee profile for {}.", req.mentee_id),
			});
		};
		let now = OffsetDateTime::now_utc();
		let cache = recommendations::read_recommendations(&self.db, req.mentee_id).await?;
		let records = matches::matches_for(&self.db, req.mentee_id).await?;
		let requested = candidates::requested_mentors(&records);
		let pool = mentors::active_mentors(&self.db).await?;
		let primary = match cache {
			Some(entry) if cache_is_valid(&entry, now) => {
				candidates::cached_candidates(&entry.mentor_ids, &pool, &requested)
			},
			_ => candidates::requested_candidates(&records, &pool),
		};
		let mut fill = Vec::new();

		if primary.len() < limit {
			let mut excluded = requested.clone();

			excluded.extend(primary.iter().map(|item| item.mentor_id));

			fill = candidates::scored_fill(self, &mentee, &pool, &excluded).await?;
			fill.truncate(limit - primary.len());
		}

		let items = rank::merge_ranked(primary, fill, limit);
		let mentor_ids = items.iter().map(|item| item.mentor_id).collect::<Vec<_>>();
		let expires_at = now + Duration::days(self.cfg.matching.cache_ttl_days);

		// A stale cache is degraded service, not a failed request.
		if let Err(err) =
			recommendations::upsert_recommendations(&self.db, req.mentee_id, &mentor_ids, expires_at, now)
				.await
		{
			tracing::warn!(
				error = %err,
				mentee_id = %req.mentee_id,
				"Recommendation cache write failed."
			);
		}

		Ok(RecommendationResponse { mentee_id: req.mentee_id, items })
	}
}

/// A missing expiry means the entry never expires. An entry expiring exactly
/// at `now` is already stale.
fn cache_is_valid(entry: &RecommendationCacheEntry, now: OffsetDateTime) -> bool {
	entry.expires_at.is_none_or(|expires_at| expires_at > now)
}
