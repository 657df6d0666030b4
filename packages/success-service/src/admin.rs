use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, SuccessService};
use success_storage::{links, logs, models::SystemLog, people, search_index};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RebuildReport {
	pub indexed_rows: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
	pub people: i64,
	pub links: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordSystemLogRequest {
	pub logger_name: String,
	pub level: String,
	pub msg: String,
	pub trace: Option<String>,
}

impl SuccessService {
	pub async fn rebuild_search_index(&self) -> Result<RebuildReport> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;
		search_index::refresh(&mut tx).await?;

		let indexed_rows = search_index::count_rows(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(indexed_rows, "Search index rebuilt.");

		Ok(RebuildReport { indexed_rows })
	}

	pub async fn counts(&self) -> Result<Counts> {
		let mut conn = self.db.pool.acquire().await?;
		let people = people::count_people(&mut conn).await?;
		let links = links::count_links(&mut conn).await?;

		Ok(Counts { people, links })
	}

	pub async fn system_logs(&self, offset: i64, limit: i64) -> Result<Vec<SystemLog>> {
		let (offset, limit) = crate::validate_page(offset, limit)?;
		let mut conn = self.db.pool.acquire().await?;

		Ok(logs::list_system_logs(&mut conn, offset, limit).await?)
	}

	pub async fn record_system_log(&self, req: RecordSystemLogRequest) -> Result<SystemLog> {
		let log = SystemLog {
			log_id: Uuid::new_v4(),
			logger_name: crate::require_text("logger_name", &req.logger_name)?,
			level: req.level.trim().to_uppercase(),
			msg: req.msg,
			trace: req.trace.filter(|trace| !trace.trim().is_empty()),
			created_at: OffsetDateTime::now_utc(),
		};
		let mut conn = self.db.pool.acquire().await?;

		logs::insert_system_log(&mut conn, &log).await?;

		Ok(log)
	}
}
