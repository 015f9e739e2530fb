use std::{cmp::Ordering, collections::HashSet};

use super::RecommendationItem;

/// Final ordering: priority bands ascending, score descending inside a band.
/// Duplicate mentor ids keep their first occurrence, so a cached entry wins
/// over a scored duplicate from the fill. The sort is stable; unscored
/// entries rank ahead of scored ones inside a band, which keeps the cache's
/// stored order intact in front of fresh fill.
pub(super) fn merge_ranked(
	primary: Vec<RecommendationItem>,
	fill: Vec<RecommendationItem>,
	limit: usize,
) -> Vec<RecommendationItem> {
	let mut merged = Vec::with_capacity(primary.len() + fill.len());
	let mut seen = HashSet::new();

	for item in primary.into_iter().chain(fill) {
		if seen.insert(item.mentor_id) {
			merged.push(item);
		}
	}

	merged
		.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| cmp_score_desc(a.score, b.score)));
	merged.truncate(limit);

	merged
}

pub(super) fn cmp_score_desc(a: Option<f32>, b: Option<f32>) -> Ordering {
	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		// NaN pairs fall back to the incoming order.
		(Some(left), Some(right)) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
	}
}
