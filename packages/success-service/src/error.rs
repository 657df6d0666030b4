pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}

	pub(crate) fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound { message: message.into() }
	}
}

impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<success_storage::Error> for Error {
	fn from(err: success_storage::Error) -> Self {
		match err {
			success_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			success_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<success_providers::Error> for Error {
	fn from(err: success_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
