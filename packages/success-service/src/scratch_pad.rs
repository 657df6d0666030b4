use crate::{Result, SuccessService};
use success_storage::{logs, models::ScratchPad};

impl SuccessService {
	pub async fn scratch_pad(&self) -> Result<ScratchPad> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(logs::get_scratch_pad(&mut conn).await?)
	}

	/// Replaces the whole pad body.
	pub async fn update_scratch_pad(&self, body: &str) -> Result<ScratchPad> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(logs::upsert_scratch_pad(&mut conn, body).await?)
	}
}
