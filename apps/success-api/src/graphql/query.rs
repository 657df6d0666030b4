use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use super::{
	gql_error, service,
	types::{
		AssistantAnswer, AssistantConversation, Count, Link, Person, Project, PromptTemplate,
		ScratchPad, SearchOrderInput, SearchResult, SystemLog,
	},
};
use success_service::SearchRequest;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
	/// Federated search over links, people, and projects.
	///
	/// A blank query or an unknown `type` yields an empty list.
	async fn search(
		&self,
		ctx: &Context<'_>,
		query: String,
		#[graphql(name = "type")] item_type: Option<String>,
		order: Option<SearchOrderInput>,
	) -> Result<Vec<SearchResult>> {
		let req = SearchRequest { query, item_type, order: order.map(Into::into) };
		let hits = service(ctx)?.search(req).await.map_err(gql_error)?;

		Ok(hits.into_iter().map(SearchResult::from).collect())
	}

	async fn links(&self, ctx: &Context<'_>) -> Result<Vec<Link>> {
		let links = service(ctx)?.links().await.map_err(gql_error)?;

		Ok(links.into_iter().map(Link::from).collect())
	}

	async fn link(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Link> {
		Ok(service(ctx)?.link(pk).await.map_err(gql_error)?.into())
	}

	/// Distinct tags across visible links.
	async fn tags(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
		service(ctx)?.tags().await.map_err(gql_error)
	}

	async fn people(&self, ctx: &Context<'_>) -> Result<Vec<Person>> {
		let people = service(ctx)?.people().await.map_err(gql_error)?;

		Ok(people.into_iter().map(Person::from).collect())
	}

	async fn person(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Person> {
		Ok(service(ctx)?.person(pk).await.map_err(gql_error)?.into())
	}

	async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
		let projects = service(ctx)?.projects().await.map_err(gql_error)?;

		Ok(projects.into_iter().map(Project::from).collect())
	}

	async fn project(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Project> {
		Ok(service(ctx)?.project(pk).await.map_err(gql_error)?.into())
	}

	async fn count(&self, ctx: &Context<'_>) -> Result<Count> {
		Ok(service(ctx)?.counts().await.map_err(gql_error)?.into())
	}

	async fn prompt_templates(&self, ctx: &Context<'_>) -> Result<Vec<PromptTemplate>> {
		let templates = service(ctx)?.prompt_templates().await.map_err(gql_error)?;

		Ok(templates.into_iter().map(PromptTemplate).collect())
	}

	async fn assistant_conversations(
		&self,
		ctx: &Context<'_>,
	) -> Result<Vec<AssistantConversation>> {
		let conversations = service(ctx)?.conversations().await.map_err(gql_error)?;

		Ok(conversations.into_iter().map(AssistantConversation::from).collect())
	}

	async fn assistant_conversation(
		&self,
		ctx: &Context<'_>,
		pk: Uuid,
	) -> Result<AssistantConversation> {
		Ok(service(ctx)?.conversation(pk).await.map_err(gql_error)?.into())
	}

	async fn assistant_answers(&self, ctx: &Context<'_>) -> Result<Vec<AssistantAnswer>> {
		let answers = service(ctx)?.answers().await.map_err(gql_error)?;

		Ok(answers.into_iter().map(AssistantAnswer).collect())
	}

	async fn assistant_answer(&self, ctx: &Context<'_>, pk: Uuid) -> Result<AssistantAnswer> {
		Ok(AssistantAnswer(service(ctx)?.answer(pk).await.map_err(gql_error)?))
	}

	async fn scratch_pad(&self, ctx: &Context<'_>) -> Result<ScratchPad> {
		Ok(ScratchPad(service(ctx)?.scratch_pad().await.map_err(gql_error)?))
	}

	/// Newest first.
	async fn system_logs(
		&self,
		ctx: &Context<'_>,
		#[graphql(default = 0)] offset: i64,
		#[graphql(default = 50)] limit: i64,
	) -> Result<Vec<SystemLog>> {
		let logs = service(ctx)?.system_logs(offset, limit).await.map_err(gql_error)?;

		Ok(logs.into_iter().map(SystemLog).collect())
	}
}
