use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, SuccessService};
use success_providers::chat::ChatMessage;
use success_storage::{
	assistant,
	models::{AssistantAnswer, Conversation, Message, PromptTemplate},
};

const DESCRIPTION_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromptTemplateRequest {
	pub name: String,
	pub system_message: String,
	#[serde(default)]
	pub request_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationRequest {
	#[serde(default)]
	pub system_message: String,
	pub request: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
	pub conversation_id: Uuid,
	pub request: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
	#[serde(default)]
	pub system_message: String,
	pub request: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyEditRequest {
	pub text: String,
	/// Name under `assistant.copy_editors`. Defaults to `assistant.default_copy_editor`.
	pub editor_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConversationDetail {
	pub conversation: Conversation,
	pub messages: Vec<Message>,
}

impl SuccessService {
	pub async fn prompt_templates(&self) -> Result<Vec<PromptTemplate>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(assistant::list_prompt_templates(&mut conn).await?)
	}

	pub async fn create_prompt_template(
		&self,
		req: CreatePromptTemplateRequest,
	) -> Result<PromptTemplate> {
		let template = PromptTemplate {
			template_id: Uuid::new_v4(),
			name: crate::require_text("name", &req.name)?,
			system_message: crate::require_text("system_message", &req.system_message)?,
			request_template: req.request_template,
			hidden: false,
			created_at: OffsetDateTime::now_utc(),
		};
		let mut conn = self.db.pool.acquire().await?;

		assistant::insert_prompt_template(&mut conn, &template).await?;

		Ok(template)
	}

	pub async fn conversations(&self) -> Result<Vec<Conversation>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(assistant::list_conversations(&mut conn).await?)
	}

	pub async fn conversation(&self, conversation_id: Uuid) -> Result<ConversationDetail> {
		let mut conn = self.db.pool.acquire().await?;
		let conversation = assistant::get_conversation(&mut conn, conversation_id)
			.await?
			.ok_or_else(|| conversation_not_found(conversation_id))?;
		let messages = assistant::list_messages(&mut conn, conversation_id).await?;

		Ok(ConversationDetail { conversation, messages })
	}

	/// Opens a conversation and stores the first exchange once the model has replied.
	pub async fn start_conversation(
		&self,
		req: StartConversationRequest,
	) -> Result<ConversationDetail> {
		let request = crate::require_text("request", &req.request)?;
		let system_message = req.system_message.trim().to_string();
		let mut history = Vec::with_capacity(2);

		if !system_message.is_empty() {
			history.push(ChatMessage::system(system_message.as_str()));
		}

		history.push(ChatMessage::user(request.as_str()));

		let reply = self.chat(&history).await?;

		history.push(ChatMessage::assistant(reply));

		let now = OffsetDateTime::now_utc();
		let conversation = Conversation {
			conversation_id: Uuid::new_v4(),
			system_message,
			description: truncate_chars(&request, DESCRIPTION_MAX_CHARS),
			created_at: now,
		};
		let messages = to_messages(conversation.conversation_id, 0, history, now);
		let mut tx = self.db.pool.begin().await?;

		assistant::insert_conversation(&mut tx, &conversation).await?;

		for message in &messages {
			assistant::insert_message(&mut tx, message).await?;
		}

		tx.commit().await?;

		tracing::info!(conversation_id = %conversation.conversation_id, "Conversation started.");

		Ok(ConversationDetail { conversation, messages })
	}

	/// Replays the whole history plus `req.request` and appends both new messages.
	///
	/// The appended `seq` values are taken under a lock on the conversation row, so concurrent
	/// sends to one conversation both land, in commit order.
	pub async fn send_message(&self, req: SendMessageRequest) -> Result<ConversationDetail> {
		let request = crate::require_text("request", &req.request)?;
		let ConversationDetail { conversation, messages } =
			self.conversation(req.conversation_id).await?;
		let mut history = messages
			.iter()
			.map(|message| ChatMessage {
				role: message.role.clone(),
				content: message.content.clone(),
			})
			.collect::<Vec<_>>();

		history.push(ChatMessage::user(request.as_str()));

		let reply = self.chat(&history).await?;
		let mut tx = self.db.pool.begin().await?;

		if !assistant::lock_conversation(&mut tx, conversation.conversation_id).await? {
			return Err(conversation_not_found(conversation.conversation_id));
		}

		let next_seq = assistant::next_message_seq(&mut tx, conversation.conversation_id).await?;
		let appended = to_messages(
			conversation.conversation_id,
			next_seq,
			vec![ChatMessage::user(request), ChatMessage::assistant(reply)],
			OffsetDateTime::now_utc(),
		);

		for message in &appended {
			assistant::insert_message(&mut tx, message).await?;
		}

		let messages = assistant::list_messages(&mut tx, conversation.conversation_id).await?;

		tx.commit().await?;

		Ok(ConversationDetail { conversation, messages })
	}

	pub async fn ask(&self, req: AskRequest) -> Result<AssistantAnswer> {
		let request = crate::require_text("request", &req.request)?;
		let system_message = req.system_message.trim().to_string();
		let mut history = Vec::with_capacity(2);

		if !system_message.is_empty() {
			history.push(ChatMessage::system(system_message.as_str()));
		}

		history.push(ChatMessage::user(request.as_str()));

		let response = self.chat(&history).await?;
		let answer = AssistantAnswer {
			answer_id: Uuid::new_v4(),
			system_message,
			request,
			response,
			created_at: OffsetDateTime::now_utc(),
		};
		let mut conn = self.db.pool.acquire().await?;

		assistant::insert_answer(&mut conn, &answer).await?;

		Ok(answer)
	}

	pub async fn answers(&self) -> Result<Vec<AssistantAnswer>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(assistant::list_answers(&mut conn).await?)
	}

	pub async fn answer(&self, answer_id: Uuid) -> Result<AssistantAnswer> {
		let mut conn = self.db.pool.acquire().await?;

		assistant::get_answer(&mut conn, answer_id)
			.await?
			.ok_or_else(|| Error::not_found(format!("Answer {answer_id} does not exist.")))
	}

	/// Rewrites `req.text` with the configured copy editor prompt. Nothing is stored.
	pub async fn copy_edit(&self, req: CopyEditRequest) -> Result<String> {
		let text = crate::require_text("text", &req.text)?;
		let prompt = resolve_copy_editor(&self.cfg.assistant, req.editor_type.as_deref())?;

		self.chat(&[ChatMessage::system(prompt), ChatMessage::user(text)]).await
	}
}

fn conversation_not_found(conversation_id: Uuid) -> Error {
	Error::not_found(format!("Conversation {conversation_id} does not exist."))
}

fn resolve_copy_editor<'a>(
	cfg: &'a success_config::Assistant,
	editor_type: Option<&str>,
) -> Result<&'a str> {
	let name = match editor_type.map(|raw| raw.trim().to_lowercase()) {
		Some(name) if !name.is_empty() => name,
		_ => cfg.default_copy_editor.clone(),
	};

	cfg.copy_editors
		.get(&name)
		.map(String::as_str)
		.ok_or_else(|| Error::invalid(format!("Unknown copy editor: {name}.")))
}

fn to_messages(
	conversation_id: Uuid,
	first_seq: i32,
	history: Vec<ChatMessage>,
	created_at: OffsetDateTime,
) -> Vec<Message> {
	history
		.into_iter()
		.zip(first_seq..)
		.map(|(message, seq)| Message {
			message_id: Uuid::new_v4(),
			conversation_id,
			seq,
			role: message.role,
			content: message.content,
			created_at,
		})
		.collect()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((end, _)) => text[..end].to_string(),
		None => text.to_string(),
	}
}
