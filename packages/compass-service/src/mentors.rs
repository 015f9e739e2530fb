use compass_storage::mentors;
use uuid::Uuid;

use crate::{CompassService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MentorDirectoryEntry {
	pub user_id: Uuid,
	pub meeting_format: Option<String>,
	pub monthly_hours: Option<i32>,
	pub profile_summary: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MentorDirectoryResponse {
	pub mentors: Vec<MentorDirectoryEntry>,
}

impl CompassService {
	/// Lists active mentors in stable `user_id` order.
	pub async fn list_active_mentors(&self) -> Result<MentorDirectoryResponse> {
		let mentors = mentors::active_mentors(&self.db)
			.await?
			.into_iter()
			.map(|profile| MentorDirectoryEntry {
				user_id: profile.user_id,
				meeting_format: profile.meeting_format,
				monthly_hours: profile.monthly_hours,
				profile_summary: profile.profile_summary,
			})
			.collect();

		Ok(MentorDirectoryResponse { mentors })
	}
}
