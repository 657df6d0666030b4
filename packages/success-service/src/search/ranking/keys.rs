use time::OffsetDateTime;
use uuid::Uuid;

use success_storage::models::{ItemKind, SearchCandidate};

#[derive(Debug, Clone)]
pub struct RankedCandidate {
	pub kind: ItemKind,
	pub item_id: Uuid,
	pub created_at: OffsetDateTime,
	pub relevance: f32,
	pub click_count: i64,
	pub click_boost: f32,
}

/// `weight * ln(click_count + 1)` for links and zero for every other kind.
pub fn click_boost(kind: ItemKind, click_count: i64, weight: f32) -> f32 {
	if kind != ItemKind::Link {
		return 0.0;
	}

	weight * (click_count.max(0) as f32).ln_1p()
}

pub fn compute_rank_keys(rows: Vec<SearchCandidate>, weight: f32) -> Vec<RankedCandidate> {
	let mut out = Vec::with_capacity(rows.len());

	for row in rows {
		let Ok(kind) = row.item_type.parse::<ItemKind>() else {
			tracing::warn!(
				item_type = %row.item_type,
				item_id = %row.item_id,
				"Unknown item type in search index."
			);

			continue;
		};
		let click_count = if kind == ItemKind::Link { row.click_count } else { 0 };

		out.push(RankedCandidate {
			kind,
			item_id: row.item_id,
			created_at: row.created_at,
			relevance: row.relevance,
			click_count,
			click_boost: click_boost(kind, click_count, weight),
		});
	}

	out
}
