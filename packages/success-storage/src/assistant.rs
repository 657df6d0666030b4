use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
	Result,
	models::{AssistantAnswer, Conversation, Message, PromptTemplate},
};

pub async fn list_prompt_templates(executor: &mut PgConnection) -> Result<Vec<PromptTemplate>> {
	let rows = sqlx::query_as::<_, PromptTemplate>(
		"\
SELECT
	template_id,
	name,
	system_message,
	request_template,
	hidden,
	created_at
FROM prompt_templates
WHERE NOT hidden
ORDER BY name, template_id",
	)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn insert_prompt_template(
	executor: &mut PgConnection,
	template: &PromptTemplate,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO prompt_templates (
	template_id,
	name,
	system_message,
	request_template,
	hidden,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(template.template_id)
	.bind(template.name.as_str())
	.bind(template.system_message.as_str())
	.bind(template.request_template.as_str())
	.bind(template.hidden)
	.bind(template.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

pub async fn list_conversations(executor: &mut PgConnection) -> Result<Vec<Conversation>> {
	let rows = sqlx::query_as::<_, Conversation>(
		"\
SELECT conversation_id, system_message, description, created_at
FROM assistant_conversations
ORDER BY created_at DESC, conversation_id",
	)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn get_conversation(
	executor: &mut PgConnection,
	conversation_id: Uuid,
) -> Result<Option<Conversation>> {
	let row = sqlx::query_as::<_, Conversation>(
		"\
SELECT conversation_id, system_message, description, created_at
FROM assistant_conversations
WHERE conversation_id = $1",
	)
	.bind(conversation_id)
	.fetch_optional(&mut *executor)
	.await?;

	Ok(row)
}

/// Locks the conversation row for the rest of the transaction. `false` when it does not exist.
pub async fn lock_conversation(executor: &mut PgConnection, conversation_id: Uuid) -> Result<bool> {
	let row = sqlx::query(
		"\
SELECT 1
FROM assistant_conversations
WHERE conversation_id = $1
FOR UPDATE",
	)
	.bind(conversation_id)
	.fetch_optional(&mut *executor)
	.await?;

	Ok(row.is_some())
}

pub async fn next_message_seq(executor: &mut PgConnection, conversation_id: Uuid) -> Result<i32> {
	let next: i32 = sqlx::query_scalar(
		"\
SELECT COALESCE(MAX(seq) + 1, 0)
FROM assistant_messages
WHERE conversation_id = $1",
	)
	.bind(conversation_id)
	.fetch_one(&mut *executor)
	.await?;

	Ok(next)
}

pub async fn insert_conversation(
	executor: &mut PgConnection,
	conversation: &Conversation,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO assistant_conversations (conversation_id, system_message, description, created_at)
VALUES ($1, $2, $3, $4)",
	)
	.bind(conversation.conversation_id)
	.bind(conversation.system_message.as_str())
	.bind(conversation.description.as_str())
	.bind(conversation.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

/// Messages of one conversation in the order they were written.
pub async fn list_messages(
	executor: &mut PgConnection,
	conversation_id: Uuid,
) -> Result<Vec<Message>> {
	let rows = sqlx::query_as::<_, Message>(
		"\
SELECT message_id, conversation_id, seq, role, content, created_at
FROM assistant_messages
WHERE conversation_id = $1
ORDER BY seq",
	)
	.bind(conversation_id)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn insert_message(executor: &mut PgConnection, message: &Message) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO assistant_messages (message_id, conversation_id, seq, role, content, created_at)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(message.message_id)
	.bind(message.conversation_id)
	.bind(message.seq)
	.bind(message.role.as_str())
	.bind(message.content.as_str())
	.bind(message.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}

pub async fn list_answers(executor: &mut PgConnection) -> Result<Vec<AssistantAnswer>> {
	let rows = sqlx::query_as::<_, AssistantAnswer>(
		"\
SELECT answer_id, system_message, request, response, created_at
FROM assistant_answers
ORDER BY created_at DESC, answer_id",
	)
	.fetch_all(&mut *executor)
	.await?;

	Ok(rows)
}

pub async fn get_answer(
	executor: &mut PgConnection,
	answer_id: Uuid,
) -> Result<Option<AssistantAnswer>> {
	let row = sqlx::query_as::<_, AssistantAnswer>(
		"\
SELECT answer_id, system_message, request, response, created_at
FROM assistant_answers
WHERE answer_id = $1",
	)
	.bind(answer_id)
	.fetch_optional(&mut *executor)
	.await?;

	Ok(row)
}

pub async fn insert_answer(executor: &mut PgConnection, answer: &AssistantAnswer) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO assistant_answers (answer_id, system_message, request, response, created_at)
VALUES ($1, $2, $3, $4, $5)",
	)
	.bind(answer.answer_id)
	.bind(answer.system_message.as_str())
	.bind(answer.request.as_str())
	.bind(answer.response.as_str())
	.bind(answer.created_at)
	.execute(&mut *executor)
	.await?;

	Ok(())
}
