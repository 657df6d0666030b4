use sqlx::PgConnection;

use crate::{
	Result,
	models::{ScratchPad, SystemLog},
};

pub async fn get_scratch_pad(executor: &mut PgConnection) -> Result<ScratchPad> {
	let row = sqlx::query_as::<_, ScratchPad>(
		"SELECT body, updated_at FROM scratch_pads WHERE pad_id = 1",
	)
	.fetch_optional(&mut *executor)
	.await?;

	match row {
		Some(pad) => Ok(pad),
		None => upsert_scratch_pad(executor, "").await,
	}
}

pub async fn upsert_scratch_pad(executor: &mut PgConnection, body: &str) -> Result<ScratchPad> {
	let row = sqlx::query_as::<_, ScratchPad>(
		"\
INSERT INTO scratch_pads (pad_id, body, updated_at)
VALUES (1, $1, now())
ON CONFLICT (pad_id) DO UPDATE
SET
	body = EXCLUDED.body,
	updated_at = EXCLUDED.updated_at
RETURNING body, updated_at",
	)
	.bind(body)
	.fetch_one(&mut *executor)
	.await?;

	Ok(row)
}

pub async fn list_system_logs(
	executor: &mut PgConnection,
	offset: i64,
	limit: i64,
) -> Result<Vec<SystemLog>> {
	let rows = sqlx::query_as::<_, SystemLog>(
		"\
SELECT log_id, logger_name, level, msg, trace, created_at
FROM system_logs
ORDER BY created_at DESC, log_id
OFFSET $1
LIMIT $2",
	)
	.bind(offset)
	.bind(limit)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn insert_system_log(executor: &mut PgConnection, log: &SystemLog) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO system_logs (log_id, logger_name, level, msg, trace, created_at)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(log.log_id)
	.bind(log.logger_name.as_str())
	.bind(log.level.as_str())
	.bind(log.msg.as_str())
	.bind(log.trace.as_deref())
	.bind(log.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}
