pub mod admin;
pub mod assistant;
pub mod links;
pub mod people;
pub mod projects;
pub mod scratch_pad;
pub mod search;

mod error;

pub use admin::{Counts, RebuildReport, RecordSystemLogRequest};
pub use assistant::{
	AskRequest, ConversationDetail, CopyEditRequest, CreatePromptTemplateRequest,
	SendMessageRequest, StartConversationRequest,
};
pub use error::{Error, Result};
pub use links::{CreateLinkRequest, UpdateLinkRequest};
pub use people::{
	CreatePersonLogRequest, CreatePersonRequest, LogOrder, PersonLogsRequest, UpdatePersonRequest,
};
pub use projects::{CreateProjectRequest, ReorderProjectRequest, UpdateProjectRequest};
pub use search::{SearchEntity, SearchHit, SearchOrder, SearchRequest, SortDirection};
pub use success_storage::models::{
	AssistantAnswer, Conversation, ItemKind, Link, Message, Person, PersonLog, Project,
	PromptTemplate, ScratchPad, SystemLog,
};

use std::{future::Future, pin::Pin, sync::Arc};

use success_config::{Config, LlmProviderConfig};
use success_providers::chat::{self, ChatMessage};
use success_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Largest page any listing accepts.
pub const MAX_PAGE_SIZE: i64 = 200;

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn chat<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub chat: Arc<dyn ChatProvider>,
}
impl Providers {
	pub fn new(chat: Arc<dyn ChatProvider>) -> Self {
		Self { chat }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { chat: Arc::new(DefaultProviders) }
	}
}

pub struct SuccessService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}
impl SuccessService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}

	pub(crate) async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
		let reply = self.providers.chat.chat(&self.cfg.providers.llm, messages).await?;

		if reply.trim().is_empty() {
			return Err(Error::Provider {
				message: "Chat provider returned an empty reply.".to_string(),
			});
		}

		Ok(reply)
	}
}

struct DefaultProviders;
impl ChatProvider for DefaultProviders {
	fn chat<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(chat::complete(cfg, messages).await?) })
	}
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(label: &str, value: &str) -> Result<String> {
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return Err(Error::invalid(format!("{label} must be non-empty.")));
	}

	Ok(trimmed.to_string())
}

pub(crate) fn validate_page(offset: i64, limit: i64) -> Result<(i64, i64)> {
	if offset < 0 {
		return Err(Error::invalid("offset must be zero or greater."));
	}
	if limit <= 0 {
		return Err(Error::invalid("limit must be greater than zero."));
	}

	Ok((offset, limit.min(MAX_PAGE_SIZE)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn require_text_trims_and_rejects_blank() {
		assert_eq!(require_text("name", "  Mike ").expect("Expected text."), "Mike");
		assert!(matches!(require_text("name", " \t"), Err(Error::InvalidRequest { .. })));
	}

	#[test]
	fn validate_page_caps_limit() {
		assert_eq!(validate_page(0, 10_000).expect("Expected page."), (0, MAX_PAGE_SIZE));
		assert!(validate_page(-1, 10).is_err());
		assert!(validate_page(0, 0).is_err());
	}
}
