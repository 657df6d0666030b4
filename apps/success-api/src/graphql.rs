//! GraphQL surface over [`SuccessService`].

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema, SchemaBuilder};

use success_service::{Error as ServiceError, SuccessService};

pub type SuccessSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema without context data. Enough for SDL export.
pub fn schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
	Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

pub fn build_schema(service: Arc<SuccessService>) -> SuccessSchema {
	schema_builder().data(service).finish()
}

pub(crate) fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SuccessService> {
	Ok(ctx.data::<Arc<SuccessService>>()?.as_ref())
}

/// Value placed under `extensions.code` for a service failure.
pub fn error_code(err: &ServiceError) -> &'static str {
	match err {
		ServiceError::InvalidRequest { .. } => "INVALID_ARGUMENT",
		ServiceError::NotFound { .. } => "NOT_FOUND",
		ServiceError::Provider { .. } => "PROVIDER_ERROR",
		ServiceError::Storage { .. } => "STORE_UNAVAILABLE",
	}
}

pub(crate) fn gql_error(err: ServiceError) -> async_graphql::Error {
	let code = error_code(&err);

	async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}
