use std::sync::Arc;

use crate::graphql::{self, SuccessSchema};
use success_service::SuccessService;
use success_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SuccessService>,
	pub schema: SuccessSchema,
}
impl AppState {
	pub async fn new(config: success_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(SuccessService::new(config, db)))
	}

	/// Wraps an already constructed service, e.g. one carrying stub providers.
	pub fn from_service(service: SuccessService) -> Self {
		let service = Arc::new(service);
		let schema = graphql::build_schema(service.clone());

		Self { service, schema }
	}
}
