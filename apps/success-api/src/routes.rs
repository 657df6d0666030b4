use async_graphql::{ServerError, http::GraphiQLSource};
use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse},
	routing::get,
};

use crate::state::AppState;
use success_service::{RecordSystemLogRequest, SuccessService};

const GRAPHQL_PATH: &str = "/graphql";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route(GRAPHQL_PATH, get(graphiql).post(graphql))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn graphiql() -> impl IntoResponse {
	Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn graphql(
	State(state): State<AppState>,
	Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
	let response = state.schema.execute(request).await;

	for error in &response.errors {
		record_error(&state.service, error).await;
	}

	Json(response)
}

async fn record_error(service: &SuccessService, error: &ServerError) {
	let trace = if error.path.is_empty() { None } else { serde_json::to_string(&error.path).ok() };

	tracing::warn!(error = %error.message, ?trace, "GraphQL request failed.");

	let req = RecordSystemLogRequest {
		logger_name: "graphql".to_string(),
		level: "ERROR".to_string(),
		msg: error.message.clone(),
		trace,
	};

	if let Err(err) = service.record_system_log(req).await {
		tracing::error!(error = %err, "Failed to record GraphQL error as a system log.");
	}
}
