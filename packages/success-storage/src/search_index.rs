use sqlx::PgConnection;

use crate::{
	Result,
	models::{ItemKind, SearchCandidate},
};

const WRITE_LOCK_ID: i64 = 5_117_555;

/// Escapes `LIKE` metacharacters so user text matches literally.
pub fn escape_like(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for ch in input.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

/// Serializes transactions that end in [`refresh`]. Take it before the entity write.
///
/// A refresh snapshots the tables before it waits on the view lock, so an unserialized writer
/// can rebuild the view without a row another writer has just committed.
pub async fn lock_writes(executor: &mut PgConnection) -> Result<()> {
	sqlx::query("SELECT pg_advisory_xact_lock($1)")
		.bind(WRITE_LOCK_ID)
		.execute(&mut *executor)
		.await?;

	Ok(())
}

/// Re-projects `links`, `people`, and `projects` into `search_index`.
///
/// Runs on the caller's connection so an entity write and its refresh share one transaction.
pub async fn refresh(executor: &mut PgConnection) -> Result<()> {
	sqlx::query("REFRESH MATERIALIZED VIEW CONCURRENTLY search_index").execute(&mut *executor).await?;

	Ok(())
}

/// Rows whose text matches `query` through full text or case-insensitive substring match.
pub async fn fetch_candidates(
	executor: &mut PgConnection,
	query: &str,
	kind: Option<ItemKind>,
) -> Result<Vec<SearchCandidate>> {
	let pattern = format!("%{}%", escape_like(query));
	let rows = sqlx::query_as::<_, SearchCandidate>(
		"\
SELECT
	si.item_type,
	si.item_id,
	si.created_at,
	ts_rank(si.body_vector, q.query)::real AS relevance,
	COALESCE(l.click_count, 0)::bigint AS click_count
FROM search_index si
CROSS JOIN websearch_to_tsquery('english', $1) AS q(query)
LEFT JOIN links l ON si.item_type = 'link' AND l.link_id = si.item_id
WHERE (si.body_vector @@ q.query OR si.body ILIKE $2)
	AND ($3::text IS NULL OR si.item_type = $3::text)",
	)
	.bind(query)
	.bind(pattern)
	.bind(kind.map(ItemKind::as_str))
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn count_rows(executor: &mut PgConnection) -> Result<i64> {
	let count = sqlx::query_scalar("SELECT count(*) FROM search_index")
		.fetch_one(&mut *executor)
		.await?;

	Ok(count)
}
