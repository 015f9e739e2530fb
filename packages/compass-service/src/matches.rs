use compass_domain::types::{MatchStatus, MentorStatus};
use compass_storage::{matches, mentees, mentors};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{CompassService, Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MentorRequest {
	pub mentee_id: Uuid,
	pub mentor_id: Uuid,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MatchDecisionRequest {
	pub mentee_id: Uuid,
	pub mentor_id: Uuid,
	pub accept: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MatchResponse {
	pub mentee_id: Uuid,
	pub mentor_id: Uuid,
	pub status: String,
}

impl CompassService {
	/// Opens a pending request from a mentee to an active mentor. A pair that
	/// was ever matched before, in any state, cannot be requested again.
	pub async fn request_mentor(&self, req: MentorRequest) -> Result<MatchResponse> {
		if req.mentee_id.is_nil() || req.mentor_id.is_nil() {
			return Err(Error::InvalidRequest {
				message: "mentee_id and mentor_id are required.".to_string(),
			});
		}
		if req.mentee_id == req.mentor_id {
			return Err(Error::InvalidRequest {
				message: "A mentee cannot request themselves.".to_string(),
			});
		}
		if mentees::mentee_profile(&self.db, req.mentee_id).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("No mentee profile for {}.", req.mentee_id),
			});
		}

		let Some(mentor) = mentors::mentor_profile(&self.db, req.mentor_id).await? else {
			return Err(Error::NotFound {
				message: format!("No mentor profile for {}.", req.mentor_id),
			});
		};

		if MentorStatus::parse(&mentor.status) != Some(MentorStatus::Active) {
			return Err(Error::InvalidRequest {
				message: format!("Mentor {} is not accepting requests.", req.mentor_id),
			});
		}

		let now = OffsetDateTime::now_utc();

		matches::insert_match(&self.db, req.mentee_id, req.mentor_id, now).await?;

		Ok(MatchResponse {
			mentee_id: req.mentee_id,
			mentor_id: req.mentor_id,
			status: MatchStatus::Pending.as_str().to_string(),
		})
	}

	/// Settles a pending request. Anything already settled, or never opened,
	/// is not found.
	pub async fn respond_to_match(&self, req: MatchDecisionRequest) -> Result<MatchResponse> {
		if req.mentee_id.is_nil() || req.mentor_id.is_nil() {
			return Err(Error::InvalidRequest {
				message: "mentee_id and mentor_id are required.".to_string(),
			});
		}

		let status = if req.accept { MatchStatus::Accepted } else { MatchStatus::Declined };
		let now = OffsetDateTime::now_utc();

		matches::update_match_status(&self.db, req.mentee_id, req.mentor_id, status.as_str(), now)
			.await?;

		Ok(MatchResponse {
			mentee_id: req.mentee_id,
			mentor_id: req.mentor_id,
			status: status.as_str().to_string(),
		})
	}
}
