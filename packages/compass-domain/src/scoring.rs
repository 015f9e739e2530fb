//! Pairwise mentor/mentee scoring. Every sub-score lands in [0, 1]; the
//! weighted pieces sum directly to the final score with no renormalization.

use compass_config::{ScoringWeights, SemanticBlend};

use crate::types::{EmbeddingSet, MatchParty, MeetingFormat};

#[derive(Clone, Copy, Debug)]
pub struct ScoreBreakdown {
	pub semantic: f32,
	pub meeting_format: f32,
	pub hours: f32,
	pub load: f32,
	pub total: f32,
}

pub fn score_match(
	weights: &ScoringWeights,
	mentee: &MatchParty,
	mentor: &MatchParty,
	mentor_active_load: i64,
) -> ScoreBreakdown {
	let semantic = semantic_similarity_score(
		&weights.semantic_blend,
		mentee.embeddings.as_ref(),
		mentor.embeddings.as_ref(),
	);
	let meeting_format = meeting_format_score(mentee.meeting_format, mentor.meeting_format);
	let hours = hours_compatibility_score(mentee.monthly_hours, mentor.monthly_hours);
	let load = load_balance_score(mentor_active_load);
	let total = weights.semantic * semantic
		+ weights.meeting_format * meeting_format
		+ weights.hours * hours
		+ weights.load * load;

	ScoreBreakdown { semantic, meeting_format, hours, load, total }
}

/// Blend of three vector pairings. The fallback applies to the whole
/// component as soon as any required vector is absent on either side; terms
/// are never dropped individually.
pub fn semantic_similarity_score(
	blend: &SemanticBlend,
	mentee: Option<&EmbeddingSet>,
	mentor: Option<&EmbeddingSet>,
) -> f32 {
	let (Some(mentee), Some(mentor)) = (mentee, mentor) else {
		return blend.missing_fallback;
	};
	let (
		Some(mentor_profile),
		Some(mentor_interest),
		Some(mentee_profile),
		Some(mentee_goals),
		Some(mentee_interest),
	) = (
		mentor.profile.as_ref(),
		mentor.why_interested.as_ref(),
		mentee.profile.as_ref(),
		mentee.hope_to_gain.as_ref(),
		mentee.why_interested.as_ref(),
	)
	else {
		return blend.missing_fallback;
	};

	let profile_term = cosine_similarity(mentor_profile, mentee_profile).clamp(0.0, 1.0);
	let goal_term = cosine_similarity(mentor_interest, mentee_goals).clamp(0.0, 1.0);
	let interest_term = cosine_similarity(mentor_profile, mentee_interest).clamp(0.0, 1.0);

	blend.profile * profile_term
		+ blend.goal_alignment * goal_term
		+ blend.interest_overlap * interest_term
}

/// First matching rule wins, top to bottom. A shared `no_preference` counts
/// as an exact match, and `no_preference` against a missing value still
/// scores as the no-preference row, not the missing row.
pub fn meeting_format_score(
	mentee: Option<MeetingFormat>,
	mentor: Option<MeetingFormat>,
) -> f32 {
	if let (Some(mentee), Some(mentor)) = (mentee, mentor)
		&& mentee == mentor
	{
		return 1.0;
	}
	if mentee == Some(MeetingFormat::NoPreference) || mentor == Some(MeetingFormat::NoPreference) {
		return 0.9;
	}
	if mentee.is_none() || mentor.is_none() {
		return 0.8;
	}
	if mentee == Some(MeetingFormat::Hybrid) || mentor == Some(MeetingFormat::Hybrid) {
		return 0.7;
	}

	0.3
}

/// Asymmetric on large gaps: a mentor offering far more time than asked is a
/// mild mismatch, a mentor offering far less degrades with the deficit.
pub fn hours_compatibility_score(mentee: Option<i32>, mentor: Option<i32>) -> f32 {
	let (mentee, mentor) = match (mentee, mentor) {
		(None, None) => return 0.7,
		(Some(_), None) | (None, Some(_)) => return 0.6,
		(Some(mentee), Some(mentor)) => (mentee, mentor),
	};
	let gap = (mentor - mentee).abs();

	if gap <= 2 {
		return 1.0;
	}
	if gap <= 5 {
		return 0.8;
	}
	if mentor > mentee {
		return 0.6;
	}

	let deficit = (mentee - mentor) as f32;

	(1.0 - deficit / 10.0).max(0.2)
}

pub fn load_balance_score(accepted_count: i64) -> f32 {
	match accepted_count {
		0 => 1.0,
		1 => 0.85,
		2 => 0.7,
		3 => 0.5,
		count => (1.0 - count as f32 / 10.0).max(0.2),
	}
}

/// Plain cosine over equal-length vectors. Length mismatches and zero-norm
/// inputs yield 0.0 instead of an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	if a.len() != b.len() {
		return 0.0;
	}

	let mut dot = 0.0_f32;
	let mut norm_a = 0.0_f32;
	let mut norm_b = 0.0_f32;

	for (x, y) in a.iter().zip(b.iter()) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a.sqrt() * norm_b.sqrt())
}
