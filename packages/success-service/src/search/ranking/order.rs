use std::cmp::Ordering;

use super::{RankedCandidate, SortField, SortKey};
use crate::search::SortDirection;

/// Descending order for scores. NaN sorts after every number.
pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Explicit sort key, then relevance, then click boost, then id.
pub fn order_candidates(candidates: &mut [RankedCandidate], sort: Option<SortKey>) {
	candidates.sort_by(|a, b| compare(a, b, sort));
}

fn compare(a: &RankedCandidate, b: &RankedCandidate, sort: Option<SortKey>) -> Ordering {
	sort.map_or(Ordering::Equal, |key| cmp_sort_key(a, b, key))
		.then_with(|| cmp_f32_desc(a.relevance, b.relevance))
		.then_with(|| cmp_f32_desc(a.click_boost, b.click_boost))
		.then_with(|| a.item_id.cmp(&b.item_id))
}

fn cmp_sort_key(a: &RankedCandidate, b: &RankedCandidate, key: SortKey) -> Ordering {
	let ordering = match key.field {
		SortField::CreatedAt => a.created_at.cmp(&b.created_at),
		SortField::ItemType => a.kind.as_str().cmp(b.kind.as_str()),
		SortField::ClickCount => a.click_count.cmp(&b.click_count),
	};

	match key.direction {
		SortDirection::Asc => ordering,
		SortDirection::Desc => ordering.reverse(),
	}
}
