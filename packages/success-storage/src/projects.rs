use sqlx::PgConnection;
use uuid::Uuid;

use crate::{Result, models::Project};

const PROJECT_COLUMNS: &str = "\
project_id,
	name,
	description,
	due,
	complete,
	notes,
	position,
	hidden,
	created_at,
	updated_at";
const ORDERING_LOCK_ID: i64 = 5_117_554;

/// Serializes position changes for the rest of the transaction.
pub async fn lock_ordering(executor: &mut PgConnection) -> Result<()> {
	sqlx::query("SELECT pg_advisory_xact_lock($1)")
		.bind(ORDERING_LOCK_ID)
		.execute(&mut *executor)
		.await?;

	Ok(())
}

pub async fn list_projects(executor: &mut PgConnection) -> Result<Vec<Project>> {
	let sql = format!(
		"\
SELECT
	{PROJECT_COLUMNS}
FROM projects
WHERE NOT hidden
ORDER BY position, project_id"
	);
	let rows = sqlx::query_as::<_, Project>(&sql).fetch_all(&mut *executor).await?;

	Ok(rows)
}

pub async fn get_project(executor: &mut PgConnection, project_id: Uuid) -> Result<Option<Project>> {
	let sql = format!(
		"\
SELECT
	{PROJECT_COLUMNS}
FROM projects
WHERE project_id = $1"
	);
	let row =
		sqlx::query_as::<_, Project>(&sql).bind(project_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn get_project_for_update(
	executor: &mut PgConnection,
	project_id: Uuid,
) -> Result<Option<Project>> {
	let sql = format!(
		"\
SELECT
	{PROJECT_COLUMNS}
FROM projects
WHERE project_id = $1
FOR UPDATE"
	);
	let row =
		sqlx::query_as::<_, Project>(&sql).bind(project_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn fetch_projects_by_ids(
	executor: &mut PgConnection,
	project_ids: &[Uuid],
) -> Result<Vec<Project>> {
	if project_ids.is_empty() {
		return Ok(vec![]);
	}

	let sql = format!(
		"\
SELECT
	{PROJECT_COLUMNS}
FROM projects
WHERE project_id = ANY($1::uuid[])
	AND NOT hidden"
	);
	let rows =
		sqlx::query_as::<_, Project>(&sql).bind(project_ids).fetch_all(&mut *executor).await?;

	Ok(rows)
}

/// Number of rows holding a position, hidden ones included.
pub async fn count_positions(executor: &mut PgConnection) -> Result<i64> {
	let count = sqlx::query_scalar("SELECT count(*) FROM projects").fetch_one(&mut *executor).await?;

	Ok(count)
}

pub async fn insert_project(executor: &mut PgConnection, project: &Project) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO projects (
	project_id,
	name,
	description,
	due,
	complete,
	notes,
	position,
	hidden,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
	)
	.bind(project.project_id)
	.bind(project.name.as_str())
	.bind(project.description.as_str())
	.bind(project.due)
	.bind(project.complete)
	.bind(project.notes.as_str())
	.bind(project.position)
	.bind(project.hidden)
	.bind(project.created_at)
	.bind(project.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

/// Writes every field except `position`, which only moves through [`move_project`].
pub async fn update_project(executor: &mut PgConnection, project: &Project) -> Result<()> {
	sqlx::query(
		"\
UPDATE projects
SET
	name = $2,
	description = $3,
	due = $4,
	complete = $5,
	notes = $6,
	hidden = $7,
	updated_at = $8
WHERE project_id = $1",
	)
	.bind(project.project_id)
	.bind(project.name.as_str())
	.bind(project.description.as_str())
	.bind(project.due)
	.bind(project.complete)
	.bind(project.notes.as_str())
	.bind(project.hidden)
	.bind(project.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

/// Removes the row and pulls every later position down by one.
pub async fn delete_project(executor: &mut PgConnection, project_id: Uuid) -> Result<bool> {
	let position: Option<i32> =
		sqlx::query_scalar("DELETE FROM projects WHERE project_id = $1 RETURNING position")
			.bind(project_id)
			.fetch_optional(&mut *executor)
			.await?;
	let Some(position) = position else {
		return Ok(false);
	};

	sqlx::query("UPDATE projects SET position = position - 1 WHERE position > $1")
		.bind(position)
		.execute(&mut *executor)
		.await?;

	Ok(true)
}

/// Moves a project from `from` to `to`, shifting the rows in between by one.
pub async fn move_project(
	executor: &mut PgConnection,
	project_id: Uuid,
	from: i32,
	to: i32,
) -> Result<()> {
	if from == to {
		return Ok(());
	}
	if to < from {
		sqlx::query(
			"\
UPDATE projects
SET position = position + 1
WHERE position >= $1
	AND position < $2
	AND project_id <> $3",
		)
		.bind(to)
		.bind(from)
		.bind(project_id)
		.execute(&mut *executor)
		.await?;
	} else {
		sqlx::query(
			"\
UPDATE projects
SET position = position - 1
WHERE position > $1
	AND position <= $2
	AND project_id <> $3",
		)
		.bind(from)
		.bind(to)
		.bind(project_id)
		.execute(&mut *executor)
		.await?;
	}

	sqlx::query("UPDATE projects SET position = $2, updated_at = now() WHERE project_id = $1")
		.bind(project_id)
		.bind(to)
		.execute(&mut *executor)
		.await?;

	Ok(())
}
