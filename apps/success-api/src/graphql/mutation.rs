use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use super::{
	gql_error, service,
	types::{
		AssistantAnswer, AssistantConversation, CreateLinkInput, CreatePersonInput,
		CreatePersonLogInput, CreateProjectInput, CreatePromptTemplateInput, Link, Person,
		PersonLog, Project, PromptTemplate, RebuildReport, ScratchPad, UpdateLinkInput,
		UpdatePersonInput, UpdateProjectInput,
	},
};
use success_service::{
	AskRequest, CopyEditRequest, ReorderProjectRequest, SendMessageRequest,
	StartConversationRequest,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
	async fn create_link(&self, ctx: &Context<'_>, input: CreateLinkInput) -> Result<Link> {
		Ok(service(ctx)?.create_link(input.into()).await.map_err(gql_error)?.into())
	}

	async fn update_link(&self, ctx: &Context<'_>, input: UpdateLinkInput) -> Result<Link> {
		Ok(service(ctx)?.update_link(input.into()).await.map_err(gql_error)?.into())
	}

	/// Returns the deleted link's key.
	async fn delete_link(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Uuid> {
		service(ctx)?.delete_link(pk).await.map_err(gql_error)
	}

	/// Records one click; links with more clicks win relevance ties in search.
	async fn click_link(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Link> {
		Ok(service(ctx)?.click_link(pk).await.map_err(gql_error)?.into())
	}

	async fn create_person(&self, ctx: &Context<'_>, input: CreatePersonInput) -> Result<Person> {
		Ok(service(ctx)?.create_person(input.into()).await.map_err(gql_error)?.into())
	}

	async fn update_person(&self, ctx: &Context<'_>, input: UpdatePersonInput) -> Result<Person> {
		Ok(service(ctx)?.update_person(input.into()).await.map_err(gql_error)?.into())
	}

	async fn delete_person(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Uuid> {
		service(ctx)?.delete_person(pk).await.map_err(gql_error)
	}

	async fn create_person_log(
		&self,
		ctx: &Context<'_>,
		input: CreatePersonLogInput,
	) -> Result<PersonLog> {
		Ok(PersonLog(service(ctx)?.create_person_log(input.into()).await.map_err(gql_error)?))
	}

	async fn create_project(
		&self,
		ctx: &Context<'_>,
		input: CreateProjectInput,
	) -> Result<Project> {
		Ok(service(ctx)?.create_project(input.into()).await.map_err(gql_error)?.into())
	}

	async fn update_project(
		&self,
		ctx: &Context<'_>,
		input: UpdateProjectInput,
	) -> Result<Project> {
		Ok(service(ctx)?.update_project(input.into()).await.map_err(gql_error)?.into())
	}

	async fn delete_project(&self, ctx: &Context<'_>, pk: Uuid) -> Result<Uuid> {
		service(ctx)?.delete_project(pk).await.map_err(gql_error)
	}

	/// Moves a project to `order`, clamped to the list bounds.
	async fn reorder_project(&self, ctx: &Context<'_>, pk: Uuid, order: i32) -> Result<Project> {
		let req = ReorderProjectRequest { project_id: pk, order };

		Ok(service(ctx)?.reorder_project(req).await.map_err(gql_error)?.into())
	}

	async fn create_prompt_template(
		&self,
		ctx: &Context<'_>,
		input: CreatePromptTemplateInput,
	) -> Result<PromptTemplate> {
		let template =
			service(ctx)?.create_prompt_template(input.into()).await.map_err(gql_error)?;

		Ok(PromptTemplate(template))
	}

	async fn start_conversation(
		&self,
		ctx: &Context<'_>,
		#[graphql(default)] system_message: String,
		request: String,
	) -> Result<AssistantConversation> {
		let req = StartConversationRequest { system_message, request };

		Ok(service(ctx)?.start_conversation(req).await.map_err(gql_error)?.into())
	}

	async fn send_message(
		&self,
		ctx: &Context<'_>,
		conversation_pk: Uuid,
		request: String,
	) -> Result<AssistantConversation> {
		let req = SendMessageRequest { conversation_id: conversation_pk, request };

		Ok(service(ctx)?.send_message(req).await.map_err(gql_error)?.into())
	}

	/// One-shot question; the exchange is kept as an answer.
	async fn ask(
		&self,
		ctx: &Context<'_>,
		#[graphql(default)] system_message: String,
		request: String,
	) -> Result<AssistantAnswer> {
		let req = AskRequest { system_message, request };

		Ok(AssistantAnswer(service(ctx)?.ask(req).await.map_err(gql_error)?))
	}

	async fn copy_edit(
		&self,
		ctx: &Context<'_>,
		text: String,
		editor_type: Option<String>,
	) -> Result<String> {
		service(ctx)?.copy_edit(CopyEditRequest { text, editor_type }).await.map_err(gql_error)
	}

	async fn update_scratch_pad(&self, ctx: &Context<'_>, body: String) -> Result<ScratchPad> {
		Ok(ScratchPad(service(ctx)?.update_scratch_pad(&body).await.map_err(gql_error)?))
	}

	async fn rebuild_search_index(&self, ctx: &Context<'_>) -> Result<RebuildReport> {
		let report = service(ctx)?.rebuild_search_index().await.map_err(gql_error)?;

		Ok(RebuildReport { indexed_rows: report.indexed_rows })
	}
}
