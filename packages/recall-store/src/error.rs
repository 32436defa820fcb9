use crate::index::IndexError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Absence is never an error here; `get`/`update` return `None` and
/// `delete`/`mark_sent` return `false` for ids that do not exist.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("Embedding failed: {message}")]
	EmbeddingFailed { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
}
impl From<recall_providers::Error> for Error {
	fn from(err: recall_providers::Error) -> Self {
		Self::EmbeddingFailed { message: err.to_string() }
	}
}
impl From<IndexError> for Error {
	fn from(err: IndexError) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}
