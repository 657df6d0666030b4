use async_graphql::{Context, Enum, InputObject, Object, Result, SimpleObject, Union};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::{gql_error, service};
use success_service::{
	self as svc, CreateLinkRequest, CreatePersonLogRequest, CreatePersonRequest,
	CreateProjectRequest, CreatePromptTemplateRequest, LogOrder, PersonLogsRequest, SearchEntity,
	SearchHit, SearchOrder, SortDirection, UpdateLinkRequest, UpdatePersonRequest,
	UpdateProjectRequest,
};

/// Rank metadata attached to entities returned by `search`.
#[derive(Clone, Copy, Debug, SimpleObject)]
pub struct SearchRank {
	pub relevance: f32,
	pub click_boost: f32,
}

#[derive(Union)]
pub enum SearchResult {
	Link(Link),
	Person(Person),
	Project(Project),
}
impl From<SearchHit> for SearchResult {
	fn from(hit: SearchHit) -> Self {
		let rank = Some(SearchRank { relevance: hit.relevance, click_boost: hit.click_boost });

		match hit.entity {
			SearchEntity::Link(row) => Self::Link(Link { row, rank }),
			SearchEntity::Person(row) => Self::Person(Person { row, rank }),
			SearchEntity::Project(row) => Self::Project(Project { row, rank }),
		}
	}
}

pub struct Link {
	row: svc::Link,
	rank: Option<SearchRank>,
}
impl From<svc::Link> for Link {
	fn from(row: svc::Link) -> Self {
		Self { row, rank: None }
	}
}

#[Object]
impl Link {
	async fn pk(&self) -> Uuid {
		self.row.link_id
	}

	async fn url(&self) -> &str {
		&self.row.url
	}

	async fn title(&self) -> &str {
		&self.row.title
	}

	async fn description(&self) -> &str {
		&self.row.description
	}

	async fn tags(&self) -> &[String] {
		&self.row.tags
	}

	async fn click_count(&self) -> i64 {
		self.row.click_count
	}

	async fn hidden(&self) -> bool {
		self.row.hidden
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.row.created_at
	}

	async fn updated_at(&self) -> OffsetDateTime {
		self.row.updated_at
	}

	/// Set only when the link comes from `search`.
	async fn search_rank(&self) -> Option<SearchRank> {
		self.rank
	}
}

pub struct Person {
	row: svc::Person,
	rank: Option<SearchRank>,
}
impl From<svc::Person> for Person {
	fn from(row: svc::Person) -> Self {
		Self { row, rank: None }
	}
}

#[Object]
impl Person {
	async fn pk(&self) -> Uuid {
		self.row.person_id
	}

	async fn name(&self) -> &str {
		&self.row.name
	}

	async fn email(&self) -> &str {
		&self.row.email
	}

	async fn team(&self) -> &str {
		&self.row.team
	}

	async fn role(&self) -> &str {
		&self.row.role
	}

	async fn hidden(&self) -> bool {
		self.row.hidden
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.row.created_at
	}

	async fn updated_at(&self) -> OffsetDateTime {
		self.row.updated_at
	}

	/// One page of this person's log entries.
	async fn logs(
		&self,
		ctx: &Context<'_>,
		#[graphql(default = 0)] offset: i64,
		limit: Option<i64>,
		#[graphql(default)] order: LogOrderInput,
	) -> Result<Vec<PersonLog>> {
		let req =
			PersonLogsRequest { person_id: self.row.person_id, offset, limit, order: order.into() };
		let logs = service(ctx)?.person_logs(req).await.map_err(gql_error)?;

		Ok(logs.into_iter().map(PersonLog).collect())
	}

	async fn search_rank(&self) -> Option<SearchRank> {
		self.rank
	}
}

pub struct PersonLog(pub svc::PersonLog);

#[Object]
impl PersonLog {
	async fn pk(&self) -> Uuid {
		self.0.log_id
	}

	async fn person_pk(&self) -> Uuid {
		self.0.person_id
	}

	async fn date(&self) -> Date {
		self.0.date
	}

	async fn note(&self) -> &str {
		&self.0.note
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.0.created_at
	}
}

pub struct Project {
	row: svc::Project,
	rank: Option<SearchRank>,
}
impl From<svc::Project> for Project {
	fn from(row: svc::Project) -> Self {
		Self { row, rank: None }
	}
}

#[Object]
impl Project {
	async fn pk(&self) -> Uuid {
		self.row.project_id
	}

	async fn name(&self) -> &str {
		&self.row.name
	}

	async fn description(&self) -> &str {
		&self.row.description
	}

	async fn due(&self) -> Date {
		self.row.due
	}

	async fn complete(&self) -> bool {
		self.row.complete
	}

	async fn notes(&self) -> &str {
		&self.row.notes
	}

	/// Zero-based position in the project list.
	async fn order(&self) -> i32 {
		self.row.position
	}

	async fn hidden(&self) -> bool {
		self.row.hidden
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.row.created_at
	}

	async fn updated_at(&self) -> OffsetDateTime {
		self.row.updated_at
	}

	async fn search_rank(&self) -> Option<SearchRank> {
		self.rank
	}
}

pub struct PromptTemplate(pub svc::PromptTemplate);

#[Object]
impl PromptTemplate {
	async fn pk(&self) -> Uuid {
		self.0.template_id
	}

	async fn name(&self) -> &str {
		&self.0.name
	}

	async fn system_message(&self) -> &str {
		&self.0.system_message
	}

	async fn request_template(&self) -> &str {
		&self.0.request_template
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.0.created_at
	}
}

pub struct AssistantConversation {
	conversation: svc::Conversation,
	messages: Option<Vec<svc::Message>>,
}
impl From<svc::Conversation> for AssistantConversation {
	fn from(conversation: svc::Conversation) -> Self {
		Self { conversation, messages: None }
	}
}
impl From<svc::ConversationDetail> for AssistantConversation {
	fn from(detail: svc::ConversationDetail) -> Self {
		Self { conversation: detail.conversation, messages: Some(detail.messages) }
	}
}

#[Object]
impl AssistantConversation {
	async fn pk(&self) -> Uuid {
		self.conversation.conversation_id
	}

	async fn system_message(&self) -> &str {
		&self.conversation.system_message
	}

	async fn description(&self) -> &str {
		&self.conversation.description
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.conversation.created_at
	}

	async fn messages(&self, ctx: &Context<'_>) -> Result<Vec<AssistantMessage>> {
		let messages = match &self.messages {
			Some(messages) => messages.clone(),
			None =>
				service(ctx)?
					.conversation(self.conversation.conversation_id)
					.await
					.map_err(gql_error)?
					.messages,
		};

		Ok(messages.into_iter().map(AssistantMessage).collect())
	}
}

pub struct AssistantMessage(pub svc::Message);

#[Object]
impl AssistantMessage {
	async fn pk(&self) -> Uuid {
		self.0.message_id
	}

	async fn seq(&self) -> i32 {
		self.0.seq
	}

	async fn role(&self) -> &str {
		&self.0.role
	}

	async fn content(&self) -> &str {
		&self.0.content
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.0.created_at
	}
}

pub struct AssistantAnswer(pub svc::AssistantAnswer);

#[Object]
impl AssistantAnswer {
	async fn pk(&self) -> Uuid {
		self.0.answer_id
	}

	async fn system_message(&self) -> &str {
		&self.0.system_message
	}

	async fn request(&self) -> &str {
		&self.0.request
	}

	async fn response(&self) -> &str {
		&self.0.response
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.0.created_at
	}
}

pub struct ScratchPad(pub svc::ScratchPad);

#[Object]
impl ScratchPad {
	async fn body(&self) -> &str {
		&self.0.body
	}

	async fn updated_at(&self) -> OffsetDateTime {
		self.0.updated_at
	}
}

pub struct SystemLog(pub svc::SystemLog);

#[Object]
impl SystemLog {
	async fn pk(&self) -> Uuid {
		self.0.log_id
	}

	async fn logger_name(&self) -> &str {
		&self.0.logger_name
	}

	async fn level(&self) -> &str {
		&self.0.level
	}

	async fn msg(&self) -> &str {
		&self.0.msg
	}

	async fn trace(&self) -> Option<&str> {
		self.0.trace.as_deref()
	}

	async fn created_at(&self) -> OffsetDateTime {
		self.0.created_at
	}
}

/// Non-hidden row counts.
#[derive(SimpleObject)]
pub struct Count {
	pub people: i64,
	pub link: i64,
}
impl From<svc::Counts> for Count {
	fn from(counts: svc::Counts) -> Self {
		Self { people: counts.people, link: counts.links }
	}
}

#[derive(SimpleObject)]
pub struct RebuildReport {
	pub indexed_rows: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
pub enum OrderDirection {
	#[default]
	Asc,
	Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[graphql(name = "LogOrder")]
pub enum LogOrderInput {
	#[default]
	NewestFirst,
	OldestFirst,
}
impl From<LogOrderInput> for LogOrder {
	fn from(order: LogOrderInput) -> Self {
		match order {
			LogOrderInput::NewestFirst => Self::NewestFirst,
			LogOrderInput::OldestFirst => Self::OldestFirst,
		}
	}
}

#[derive(Debug, InputObject)]
pub struct SearchOrderInput {
	/// `createdAt`, `itemType`, or `clickCount` (snake_case also accepted).
	pub field: String,
	#[graphql(default)]
	pub direction: OrderDirection,
}
impl From<SearchOrderInput> for SearchOrder {
	fn from(input: SearchOrderInput) -> Self {
		let direction = match input.direction {
			OrderDirection::Asc => SortDirection::Asc,
			OrderDirection::Desc => SortDirection::Desc,
		};

		Self { field: input.field, direction }
	}
}

#[derive(Debug, InputObject)]
pub struct CreateLinkInput {
	pub url: String,
	pub title: String,
	#[graphql(default)]
	pub description: String,
	#[graphql(default)]
	pub tags: Vec<String>,
}
impl From<CreateLinkInput> for CreateLinkRequest {
	fn from(input: CreateLinkInput) -> Self {
		Self { url: input.url, title: input.title, description: input.description, tags: input.tags }
	}
}

#[derive(Debug, InputObject)]
pub struct UpdateLinkInput {
	pub pk: Uuid,
	pub url: Option<String>,
	pub title: Option<String>,
	pub description: Option<String>,
	pub tags: Option<Vec<String>>,
	pub hidden: Option<bool>,
}
impl From<UpdateLinkInput> for UpdateLinkRequest {
	fn from(input: UpdateLinkInput) -> Self {
		Self {
			link_id: input.pk,
			url: input.url,
			title: input.title,
			description: input.description,
			tags: input.tags,
			hidden: input.hidden,
		}
	}
}

#[derive(Debug, InputObject)]
pub struct CreatePersonInput {
	pub name: String,
	#[graphql(default)]
	pub email: String,
	#[graphql(default)]
	pub team: String,
	#[graphql(default)]
	pub role: String,
}
impl From<CreatePersonInput> for CreatePersonRequest {
	fn from(input: CreatePersonInput) -> Self {
		Self { name: input.name, email: input.email, team: input.team, role: input.role }
	}
}

#[derive(Debug, InputObject)]
pub struct UpdatePersonInput {
	pub pk: Uuid,
	pub name: Option<String>,
	pub email: Option<String>,
	pub team: Option<String>,
	pub role: Option<String>,
	pub hidden: Option<bool>,
}
impl From<UpdatePersonInput> for UpdatePersonRequest {
	fn from(input: UpdatePersonInput) -> Self {
		Self {
			person_id: input.pk,
			name: input.name,
			email: input.email,
			team: input.team,
			role: input.role,
			hidden: input.hidden,
		}
	}
}

#[derive(Debug, InputObject)]
pub struct CreatePersonLogInput {
	pub person_pk: Uuid,
	pub date: Date,
	pub note: String,
}
impl From<CreatePersonLogInput> for CreatePersonLogRequest {
	fn from(input: CreatePersonLogInput) -> Self {
		Self { person_id: input.person_pk, date: input.date, note: input.note }
	}
}

#[derive(Debug, InputObject)]
pub struct CreateProjectInput {
	pub name: String,
	#[graphql(default)]
	pub description: String,
	pub due: Date,
	#[graphql(default)]
	pub notes: String,
}
impl From<CreateProjectInput> for CreateProjectRequest {
	fn from(input: CreateProjectInput) -> Self {
		Self {
			name: input.name,
			description: input.description,
			due: input.due,
			notes: input.notes,
		}
	}
}

#[derive(Debug, InputObject)]
pub struct UpdateProjectInput {
	pub pk: Uuid,
	pub name: Option<String>,
	pub description: Option<String>,
	pub due: Option<Date>,
	pub complete: Option<bool>,
	pub notes: Option<String>,
	pub hidden: Option<bool>,
}
impl From<UpdateProjectInput> for UpdateProjectRequest {
	fn from(input: UpdateProjectInput) -> Self {
		Self {
			project_id: input.pk,
			name: input.name,
			description: input.description,
			due: input.due,
			complete: input.complete,
			notes: input.notes,
			hidden: input.hidden,
		}
	}
}

#[derive(Debug, InputObject)]
pub struct CreatePromptTemplateInput {
	pub name: String,
	pub system_message: String,
	#[graphql(default)]
	pub request_template: String,
}
impl From<CreatePromptTemplateInput> for CreatePromptTemplateRequest {
	fn from(input: CreatePromptTemplateInput) -> Self {
		Self {
			name: input.name,
			system_message: input.system_message,
			request_template: input.request_template,
		}
	}
}
