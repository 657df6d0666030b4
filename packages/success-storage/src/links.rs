use sqlx::PgConnection;
use uuid::Uuid;

use crate::{Result, models::Link};

const LINK_COLUMNS: &str = "\
link_id,
	url,
	title,
	description,
	tags,
	click_count,
	hidden,
	created_at,
	updated_at";

pub async fn list_links(executor: &mut PgConnection) -> Result<Vec<Link>> {
	let sql = format!(
		"\
SELECT
	{LINK_COLUMNS}
FROM links
WHERE NOT hidden
ORDER BY created_at DESC, link_id"
	);
	let rows = sqlx::query_as::<_, Link>(&sql).fetch_all(&mut *executor).await?;

	Ok(rows)
}

pub async fn get_link(executor: &mut PgConnection, link_id: Uuid) -> Result<Option<Link>> {
	let sql = format!(
		"\
SELECT
	{LINK_COLUMNS}
FROM links
WHERE link_id = $1"
	);
	let row = sqlx::query_as::<_, Link>(&sql).bind(link_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn get_link_for_update(
	executor: &mut PgConnection,
	link_id: Uuid,
) -> Result<Option<Link>> {
	let sql = format!(
		"\
SELECT
	{LINK_COLUMNS}
FROM links
WHERE link_id = $1
FOR UPDATE"
	);
	let row = sqlx::query_as::<_, Link>(&sql).bind(link_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

/// Visible links among `link_ids`, in no particular order.
pub async fn fetch_links_by_ids(executor: &mut PgConnection, link_ids: &[Uuid]) -> Result<Vec<Link>> {
	if link_ids.is_empty() {
		return Ok(vec![]);
	}

	let sql = format!(
		"\
SELECT
	{LINK_COLUMNS}
FROM links
WHERE link_id = ANY($1::uuid[])
	AND NOT hidden"
	);
	let rows = sqlx::query_as::<_, Link>(&sql).bind(link_ids).fetch_all(&mut *executor).await?;

	Ok(rows)
}

pub async fn insert_link(executor: &mut PgConnection, link: &Link) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO links (
	link_id,
	url,
	title,
	description,
	tags,
	click_count,
	hidden,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
	)
	.bind(link.link_id)
	.bind(link.url.as_str())
	.bind(link.title.as_str())
	.bind(link.description.as_str())
	.bind(&link.tags)
	.bind(link.click_count)
	.bind(link.hidden)
	.bind(link.created_at)
	.bind(link.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

pub async fn update_link(executor: &mut PgConnection, link: &Link) -> Result<()> {
	sqlx::query(
		"\
UPDATE links
SET
	url = $2,
	title = $3,
	description = $4,
	tags = $5,
	hidden = $6,
	updated_at = $7
WHERE link_id = $1",
	)
	.bind(link.link_id)
	.bind(link.url.as_str())
	.bind(link.title.as_str())
	.bind(link.description.as_str())
	.bind(&link.tags)
	.bind(link.hidden)
	.bind(link.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

/// Returns whether a row was removed.
pub async fn delete_link(executor: &mut PgConnection, link_id: Uuid) -> Result<bool> {
	let result =
		sqlx::query("DELETE FROM links WHERE link_id = $1").bind(link_id).execute(&mut *executor).await?;

	Ok(result.rows_affected() > 0)
}

pub async fn increment_click_count(
	executor: &mut PgConnection,
	link_id: Uuid,
) -> Result<Option<Link>> {
	let sql = format!(
		"\
UPDATE links
SET click_count = click_count + 1
WHERE link_id = $1
RETURNING
	{LINK_COLUMNS}"
	);
	let row = sqlx::query_as::<_, Link>(&sql).bind(link_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn list_tags(executor: &mut PgConnection) -> Result<Vec<String>> {
	let rows = sqlx::query_scalar::<_, String>(
		"\
SELECT DISTINCT tag
FROM links, unnest(tags) AS tag
WHERE NOT hidden
ORDER BY tag",
	)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn count_links(executor: &mut PgConnection) -> Result<i64> {
	let count = sqlx::query_scalar("SELECT count(*) FROM links WHERE NOT hidden")
		.fetch_one(&mut *executor)
		.await?;

	Ok(count)
}
