//! Profile write paths. Every upsert re-embeds the free-text fields in the
//! same request; there is no background indexing pass to catch up later.

use compass_domain::types::{EmbeddingField, MeetingFormat, MentorStatus, ParticipantRole};
use compass_storage::{
	embeddings, mentees, mentors,
	models::{MenteeProfile, MentorProfile},
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{CompassService, Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MenteeProfileUpsert {
	pub user_id: Uuid,
	pub meeting_format: Option<String>,
	pub monthly_hours: Option<i32>,
	pub profile_summary: Option<String>,
	pub why_interested: Option<String>,
	pub hope_to_gain: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MentorProfileUpsert {
	pub user_id: Uuid,
	/// Defaults to `requested` for a first-time mentor.
	pub status: Option<String>,
	pub meeting_format: Option<String>,
	pub monthly_hours: Option<i32>,
	pub profile_summary: Option<String>,
	pub why_interested: Option<String>,
	pub hope_to_gain: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileUpsertResponse {
	pub user_id: Uuid,
	pub embedded_fields: usize,
}

impl CompassService {
	pub async fn upsert_mentee_profile(
		&self,
		req: MenteeProfileUpsert,
	) -> Result<ProfileUpsertResponse> {
		if req.user_id.is_nil() {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}

		let meeting_format = parse_meeting_format(req.meeting_format.as_deref())?;
		let monthly_hours = validate_hours(req.monthly_hours)?;
		let now = OffsetDateTime::now_utc();
		let profile = MenteeProfile {
			user_id: req.user_id,
			meeting_format: meeting_format.map(|format| format.as_str().to_string()),
			monthly_hours,
			profile_summary: clean_text(req.profile_summary),
			why_interested: clean_text(req.why_interested),
			hope_to_gain: clean_text(req.hope_to_gain),
			created_at: now,
			updated_at: now,
		};

		mentees::upsert_mentee_profile(&self.db, &profile).await?;

		let embedded_fields = self
			.refresh_embeddings(
				req.user_id,
				ParticipantRole::Mentee,
				&[
					(EmbeddingField::Profile, profile.profile_summary.as_deref()),
					(EmbeddingField::WhyInterested, profile.why_interested.as_deref()),
					(EmbeddingField::HopeToGain, profile.hope_to_gain.as_deref()),
				],
				now,
			)
			.await?;

		Ok(ProfileUpsertResponse { user_id: req.user_id, embedded_fields })
	}

	pub async fn upsert_mentor_profile(
		&self,
		req: MentorProfileUpsert,
	) -> Result<ProfileUpsertResponse> {
		if req.user_id.is_nil() {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}

		let status = match req.status.as_deref() {
			None => MentorStatus::Requested,
			Some(raw) => MentorStatus::parse(raw).ok_or_else(|| Error::InvalidRequest {
				message: format!("Unknown mentor status `{raw}`."),
			})?,
		};
		let meeting_format = parse_meeting_format(req.meeting_format.as_deref())?;
		let monthly_hours = validate_hours(req.monthly_hours)?;
		let now = OffsetDateTime::now_utc();
		let profile = MentorProfile {
			user_id: req.user_id,
			status: status.as_str().to_string(),
			meeting_format: meeting_format.map(|format| format.as_str().to_string()),
			monthly_hours,
			profile_summary: clean_text(req.profile_summary),
			why_interested: clean_text(req.why_interested),
			hope_to_gain: clean_text(req.hope_to_gain),
			created_at: now,
			updated_at: now,
		};

		mentors::upsert_mentor_profile(&self.db, &profile).await?;

		let embedded_fields = self
			.refresh_embeddings(
				req.user_id,
				ParticipantRole::Mentor,
				&[
					(EmbeddingField::Profile, profile.profile_summary.as_deref()),
					(EmbeddingField::WhyInterested, profile.why_interested.as_deref()),
					(EmbeddingField::HopeToGain, profile.hope_to_gain.as_deref()),
				],
				now,
			)
			.await?;

		Ok(ProfileUpsertResponse { user_id: req.user_id, embedded_fields })
	}

	/// Embeds the populated fields in one provider call and stores one row
	/// per vector. Every vector is checked against the configured dimension
	/// before anything is written.
	async fn refresh_embeddings(
		&self,
		user_id: Uuid,
		role: ParticipantRole,
		fields: &[(EmbeddingField, Option<&str>)],
		now: OffsetDateTime,
	) -> Result<usize> {
		let mut targets = Vec::new();
		let mut texts = Vec::new();

		for &(field, text) in fields {
			if let Some(text) = text
				&& !text.is_empty()
			{
				targets.push(field);
				texts.push(text.to_string());
			}
		}

		if texts.is_empty() {
			return Ok(0);
		}

		let vectors = self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != targets.len() {
			return Err(Error::Provider {
				message: format!(
					"Expected {} embeddings but the provider returned {}.",
					targets.len(),
					vectors.len()
				),
			});
		}

		let expected = self.cfg.providers.embedding.dimensions as usize;

		for (field, vec) in targets.iter().zip(&vectors) {
			if vec.len() != expected {
				return Err(Error::Provider {
					message: format!(
						"Provider returned a {}-dimensional vector for {}, expected {expected}.",
						vec.len(),
						field.as_str()
					),
				});
			}
		}

		for (field, vec) in targets.iter().zip(&vectors) {
			embeddings::upsert_profile_embedding(
				&self.db,
				user_id,
				role.as_str(),
				field.as_str(),
				vec,
				now,
			)
			.await?;
		}

		Ok(texts.len())
	}
}

fn parse_meeting_format(value: Option<&str>) -> Result<Option<MeetingFormat>> {
	match value {
		None => Ok(None),
		Some(raw) => MeetingFormat::parse(raw).map(Some).ok_or_else(|| Error::InvalidRequest {
			message: format!("Unknown meeting format `{raw}`."),
		}),
	}
}

fn validate_hours(value: Option<i32>) -> Result<Option<i32>> {
	if let Some(hours) = value
		&& hours <= 0
	{
		return Err(Error::InvalidRequest {
			message: "monthly_hours must be greater than zero.".to_string(),
		});
	}

	Ok(value)
}

fn clean_text(value: Option<String>) -> Option<String> {
	value.map(|text| text.trim().to_string()).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn meeting_format_parses_or_rejects() {
		assert_eq!(parse_meeting_format(None).unwrap(), None);
		assert_eq!(parse_meeting_format(Some("hybrid")).unwrap(), Some(MeetingFormat::Hybrid));
		assert!(parse_meeting_format(Some("telepathy")).is_err());
	}

	#[test]
	fn hours_must_be_positive_when_present() {
		assert_eq!(validate_hours(None).unwrap(), None);
		assert_eq!(validate_hours(Some(6)).unwrap(), Some(6));
		assert!(validate_hours(Some(0)).is_err());
		assert!(validate_hours(Some(-3)).is_err());
	}

	#[test]
	fn text_fields_are_trimmed_to_none() {
		assert_eq!(clean_text(Some("  ".to_string())), None);
		assert_eq!(clean_text(Some(" mentoring ".to_string())), Some("mentoring".to_string()));
		assert_eq!(clean_text(None), None);
	}
}
