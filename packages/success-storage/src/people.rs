use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
	Result,
	models::{Person, PersonLog},
};

const PERSON_COLUMNS: &str = "\
person_id,
	name,
	email,
	team,
	role,
	hidden,
	created_at,
	updated_at";

pub async fn list_people(executor: &mut PgConnection) -> Result<Vec<Person>> {
	let sql = format!(
		"\
SELECT
	{PERSON_COLUMNS}
FROM people
WHERE NOT hidden
ORDER BY name, person_id"
	);
	let rows = sqlx::query_as::<_, Person>(&sql).fetch_all(&mut *executor).await?;

	Ok(rows)
}

pub async fn get_person(executor: &mut PgConnection, person_id: Uuid) -> Result<Option<Person>> {
	let sql = format!(
		"\
SELECT
	{PERSON_COLUMNS}
FROM people
WHERE person_id = $1"
	);
	let row =
		sqlx::query_as::<_, Person>(&sql).bind(person_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn get_person_for_update(
	executor: &mut PgConnection,
	person_id: Uuid,
) -> Result<Option<Person>> {
	let sql = format!(
		"\
SELECT
	{PERSON_COLUMNS}
FROM people
WHERE person_id = $1
FOR UPDATE"
	);
	let row =
		sqlx::query_as::<_, Person>(&sql).bind(person_id).fetch_optional(&mut *executor).await?;

	Ok(row)
}

pub async fn fetch_people_by_ids(
	executor: &mut PgConnection,
	person_ids: &[Uuid],
) -> Result<Vec<Person>> {
	if person_ids.is_empty() {
		return Ok(vec![]);
	}

	let sql = format!(
		"\
SELECT
	{PERSON_COLUMNS}
FROM people
WHERE person_id = ANY($1::uuid[])
	AND NOT hidden"
	);
	let rows = sqlx::query_as::<_, Person>(&sql).bind(person_ids).fetch_all(&mut *executor).await?;

	Ok(rows)
}

pub async fn insert_person(executor: &mut PgConnection, person: &Person) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO people (
	person_id,
	name,
	email,
	team,
	role,
	hidden,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
	)
	.bind(person.person_id)
	.bind(person.name.as_str())
	.bind(person.email.as_str())
	.bind(person.team.as_str())
	.bind(person.role.as_str())
	.bind(person.hidden)
	.bind(person.created_at)
	.bind(person.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

pub async fn update_person(executor: &mut PgConnection, person: &Person) -> Result<()> {
	sqlx::query(
		"\
UPDATE people
SET
	name = $2,
	email = $3,
	team = $4,
	role = $5,
	hidden = $6,
	updated_at = $7
WHERE person_id = $1",
	)
	.bind(person.person_id)
	.bind(person.name.as_str())
	.bind(person.email.as_str())
	.bind(person.team.as_str())
	.bind(person.role.as_str())
	.bind(person.hidden)
	.bind(person.updated_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

/// Logs go with the person through `ON DELETE CASCADE`.
pub async fn delete_person(executor: &mut PgConnection, person_id: Uuid) -> Result<bool> {
	let result = sqlx::query("DELETE FROM people WHERE person_id = $1")
		.bind(person_id)
		.execute(&mut *executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn count_people(executor: &mut PgConnection) -> Result<i64> {
	let count = sqlx::query_scalar("SELECT count(*) FROM people WHERE NOT hidden")
		.fetch_one(&mut *executor)
		.await?;

	Ok(count)
}

pub async fn list_person_logs(
	executor: &mut PgConnection,
	person_id: Uuid,
	offset: i64,
	limit: i64,
	newest_first: bool,
) -> Result<Vec<PersonLog>> {
	let direction = if newest_first { "DESC" } else { "ASC" };
	let sql = format!(
		"\
SELECT
	log_id,
	person_id,
	date,
	note,
	hidden,
	created_at
FROM person_logs
WHERE person_id = $1
	AND NOT hidden
ORDER BY date {direction}, created_at {direction}, log_id
OFFSET $2
LIMIT $3"
	);
	let rows = sqlx::query_as::<_, PersonLog>(&sql)
		.bind(person_id)
		.bind(offset)
		.bind(limit)
		.fetch_all(&mut *executor)
		.await?;

	Ok(rows)
}

pub async fn insert_person_log(executor: &mut PgConnection, log: &PersonLog) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO person_logs (log_id, person_id, date, note, hidden, created_at)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(log.log_id)
	.bind(log.person_id)
	.bind(log.date)
	.bind(log.note.as_str())
	.bind(log.hidden)
	.bind(log.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}
