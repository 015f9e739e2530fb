//! Candidate stages feeding the merge: cache carry-over, open requests, and
//! the freshly scored discovery pool.

use std::collections::{HashMap, HashSet};

use compass_domain::{
	scoring,
	types::{MatchParty, MatchStatus, MeetingFormat, ParticipantRole},
};
use compass_storage::{
	embeddings, matches,
	models::{MatchRecord, MenteeProfile, MentorProfile, ProfileEmbedding},
};
use uuid::Uuid;

use super::{PRIORITY_DISCOVERY, PRIORITY_REQUESTED, RecommendationItem, rank};
use crate::{CompassService, Result};

/// Mentor ids with an open or settled-positive request from this mentee.
pub(super) fn requested_mentors(records: &[MatchRecord]) -> HashSet<Uuid> {
	records
		.iter()
		.filter(|record| is_requested_status(&record.status))
		.map(|record| record.mentor_id)
		.collect()
}

fn is_requested_status(status: &str) -> bool {
	matches!(MatchStatus::parse(status), Some(MatchStatus::Pending | MatchStatus::Accepted))
}

/// Cache carry-over: stored order, no scores. Ids whose mentor has since
/// left the active pool are dropped here.
pub(super) fn cached_candidates(
	cached: &[Uuid],
	pool: &[MentorProfile],
	requested: &HashSet<Uuid>,
) -> Vec<RecommendationItem> {
	let active = pool.iter().map(|mentor| mentor.user_id).collect::<HashSet<_>>();

	cached
		.iter()
		.filter(|id| active.contains(id))
		.map(|&mentor_id| {
			let has_requested = requested.contains(&mentor_id);

			RecommendationItem {
				mentor_id,
				score: None,
				priority: if has_requested { PRIORITY_REQUESTED } else { PRIORITY_DISCOVERY },
				from_existing: true,
				has_requested,
			}
		})
		.collect()
}

/// Cold-start seed when no valid cache exists: the mentee's own open
/// requests, in match-record order.
pub(super) fn requested_candidates(
	records: &[MatchRecord],
	pool: &[MentorProfile],
) -> Vec<RecommendationItem> {
	let active = pool.iter().map(|mentor| mentor.user_id).collect::<HashSet<_>>();

	records
		.iter()
		.filter(|record| is_requested_status(&record.status) && active.contains(&record.mentor_id))
		.map(|record| RecommendationItem {
			mentor_id: record.mentor_id,
			score: None,
			priority: PRIORITY_REQUESTED,
			from_existing: false,
			has_requested: true,
		})
		.collect()
}

/// Scores every active mentor not already placed, in two round-trips: one
/// batch load aggregate and one batch embedding fetch.
pub(super) async fn scored_fill(
	svc: &CompassService,
	mentee: &MenteeProfile,
	pool: &[MentorProfile],
	excluded: &HashSet<Uuid>,
) -> Result<Vec<RecommendationItem>> {
	let eligible = pool
		.iter()
		.filter(|mentor| mentor.user_id != mentee.user_id && !excluded.contains(&mentor.user_id))
		.collect::<Vec<_>>();

	if eligible.is_empty() {
		return Ok(Vec::new());
	}

	let loads = matches::accepted_counts_by_mentor(&svc.db).await?;
	let mentee_rows =
		embeddings::embeddings_for_user(&svc.db, mentee.user_id, ParticipantRole::Mentee.as_str())
			.await?;
	let mentee_party = party_for_mentee(mentee, &mentee_rows);
	let eligible_ids = eligible.iter().map(|mentor| mentor.user_id).collect::<Vec<_>>();
	let mentor_rows =
		embeddings::embeddings_for_users(&svc.db, &eligible_ids, ParticipantRole::Mentor.as_str())
			.await?;
	let mut rows_by_mentor: HashMap<Uuid, Vec<ProfileEmbedding>> = HashMap::new();

	for row in mentor_rows {
		rows_by_mentor.entry(row.user_id).or_default().push(row);
	}

	let weights = &svc.cfg.matching.weights;
	let mut scored = eligible
		.iter()
		.map(|mentor| {
			let rows = rows_by_mentor.get(&mentor.user_id).map(Vec::as_slice).unwrap_or(&[]);
			let mentor_party = party_for_mentor(mentor, rows);
			let load = loads.get(&mentor.user_id).copied().unwrap_or(0);
			let breakdown = scoring::score_match(weights, &mentee_party, &mentor_party, load);

			RecommendationItem {
				mentor_id: mentor.user_id,
				score: Some(breakdown.total),
				priority: PRIORITY_DISCOVERY,
				from_existing: false,
				has_requested: false,
			}
		})
		.collect::<Vec<_>>();

	// Stable sort keeps the pool's user_id enumeration as the tie-break.
	scored.sort_by(|a, b| rank::cmp_score_desc(a.score, b.score));

	Ok(scored)
}

fn party_for_mentor(profile: &MentorProfile, rows: &[ProfileEmbedding]) -> MatchParty {
	MatchParty {
		meeting_format: profile.meeting_format.as_deref().and_then(MeetingFormat::parse),
		monthly_hours: profile.monthly_hours,
		embeddings: crate::embedding_set(rows),
	}
}

fn party_for_mentee(profile: &MenteeProfile, rows: &[ProfileEmbedding]) -> MatchParty {
	MatchParty {
		meeting_format: profile.meeting_format.as_deref().and_then(MeetingFormat::parse),
		monthly_hours: profile.monthly_hours,
		embeddings: crate::embedding_set(rows),
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn mentor(id: u128) -> MentorProfile {
		let stamp = datetime!(2026-03-01 12:00:00 UTC);

		MentorProfile {
			user_id: Uuid::from_u128(id),
			status: "active".to_string(),
			meeting_format: Some("virtual".to_string()),
			monthly_hours: Some(4),
			profile_summary: None,
			why_interested: None,
			hope_to_gain: None,
			created_at: stamp,
			updated_at: stamp,
		}
	}

	fn record(mentor: u128, status: &str) -> MatchRecord {
		let stamp = datetime!(2026-03-01 12:00:00 UTC);

		MatchRecord {
			requestor_id: Uuid::from_u128(99),
			mentor_id: Uuid::from_u128(mentor),
			status: status.to_string(),
			created_at: stamp,
			updated_at: stamp,
		}
	}

	#[test]
	fn cached_candidates_keep_stored_order_and_drop_inactive() {
		let pool = vec![mentor(1), mentor(3)];
		let cached = vec![Uuid::from_u128(3), Uuid::from_u128(2), Uuid::from_u128(1)];
		let items = cached_candidates(&cached, &pool, &HashSet::new());

		assert_eq!(
			items.iter().map(|item| item.mentor_id).collect::<Vec<_>>(),
			vec![Uuid::from_u128(3), Uuid::from_u128(1)]
		);
		assert!(items.iter().all(|item| {
			item.score.is_none()
				&& item.priority == PRIORITY_DISCOVERY
				&& item.from_existing
				&& !item.has_requested
		}));
	}

	#[test]
	fn cached_candidates_promote_requested_mentors() {
		let pool = vec![mentor(1), mentor(2)];
		let cached = vec![Uuid::from_u128(1), Uuid::from_u128(2)];
		let requested = HashSet::from([Uuid::from_u128(2)]);
		let items = cached_candidates(&cached, &pool, &requested);

		assert_eq!(items[0].priority, PRIORITY_DISCOVERY);
		assert_eq!(items[1].priority, PRIORITY_REQUESTED);
		assert!(items[1].has_requested);
	}

	#[test]
	fn requested_candidates_skip_declines_and_missing_mentors() {
		let pool = vec![mentor(1), mentor(2), mentor(3)];
		let records =
			vec![record(1, "pending"), record(2, "declined"), record(5, "accepted"), record(3, "accepted")];
		let items = requested_candidates(&records, &pool);

		// Mentor 5 left the active pool and the declined pair never counts.
		assert_eq!(
			items.iter().map(|item| item.mentor_id).collect::<Vec<_>>(),
			vec![Uuid::from_u128(1), Uuid::from_u128(3)]
		);
		assert!(items.iter().all(|item| {
			item.score.is_none() && item.priority == PRIORITY_REQUESTED && item.has_requested
		}));
	}

	#[test]
	fn parties_parse_stored_enum_fields() {
		let profile = mentor(1);
		let party = party_for_mentor(&profile, &[]);

		assert_eq!(party.meeting_format, Some(MeetingFormat::Virtual));
		assert_eq!(party.monthly_hours, Some(4));
		assert!(party.embeddings.is_none());
	}
}
