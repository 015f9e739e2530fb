use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingFormat {
	InPerson,
	Virtual,
	Hybrid,
	NoPreference,
}
impl MeetingFormat {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InPerson => "in_person",
			Self::Virtual => "virtual",
			Self::Hybrid => "hybrid",
			Self::NoPreference => "no_preference",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"in_person" => Some(Self::InPerson),
			"virtual" => Some(Self::Virtual),
			"hybrid" => Some(Self::Hybrid),
			"no_preference" => Some(Self::NoPreference),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MentorStatus {
	Requested,
	Approved,
	Active,
}
impl MentorStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Requested => "requested",
			Self::Approved => "approved",
			Self::Active => "active",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"requested" => Some(Self::Requested),
			"approved" => Some(Self::Approved),
			"active" => Some(Self::Active),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
	Pending,
	Accepted,
	Declined,
}
impl MatchStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Accepted => "accepted",
			Self::Declined => "declined",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"pending" => Some(Self::Pending),
			"accepted" => Some(Self::Accepted),
			"declined" => Some(Self::Declined),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
	Mentor,
	Mentee,
}
impl ParticipantRole {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Mentor => "mentor",
			Self::Mentee => "mentee",
		}
	}
}

/// Free-text profile fields that carry an embedding.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingField {
	Profile,
	WhyInterested,
	HopeToGain,
}
impl EmbeddingField {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Profile => "profile",
			Self::WhyInterested => "why_interested",
			Self::HopeToGain => "hope_to_gain",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"profile" => Some(Self::Profile),
			"why_interested" => Some(Self::WhyInterested),
			"hope_to_gain" => Some(Self::HopeToGain),
			_ => None,
		}
	}
}

/// The stored vectors for one (user, role). Any field may be absent when the
/// matching free text was never provided.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingSet {
	pub profile: Option<Vec<f32>>,
	pub why_interested: Option<Vec<f32>>,
	pub hope_to_gain: Option<Vec<f32>>,
}
impl EmbeddingSet {
	pub fn is_empty(&self) -> bool {
		self.profile.is_none() && self.why_interested.is_none() && self.hope_to_gain.is_none()
	}
}

/// One side of a scored pairing, as the scorer sees it.
#[derive(Clone, Debug, Default)]
pub struct MatchParty {
	pub meeting_format: Option<MeetingFormat>,
	pub monthly_hours: Option<i32>,
	pub embeddings: Option<EmbeddingSet>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn meeting_format_round_trips() {
		for format in [
			MeetingFormat::InPerson,
			MeetingFormat::Virtual,
			MeetingFormat::Hybrid,
			MeetingFormat::NoPreference,
		] {
			assert_eq!(MeetingFormat::parse(format.as_str()), Some(format));
		}

		assert_eq!(MeetingFormat::parse("carrier_pigeon"), None);
	}

	#[test]
	fn statuses_round_trip() {
		for status in [MentorStatus::Requested, MentorStatus::Approved, MentorStatus::Active] {
			assert_eq!(MentorStatus::parse(status.as_str()), Some(status));
		}
		for status in [MatchStatus::Pending, MatchStatus::Accepted, MatchStatus::Declined] {
			assert_eq!(MatchStatus::parse(status.as_str()), Some(status));
		}

		assert_eq!(MentorStatus::parse(""), None);
		assert_eq!(MatchStatus::parse("rejected"), None);
	}

	#[test]
	fn embedding_field_round_trips() {
		for field in
			[EmbeddingField::Profile, EmbeddingField::WhyInterested, EmbeddingField::HopeToGain]
		{
			assert_eq!(EmbeddingField::parse(field.as_str()), Some(field));
		}
	}
}
