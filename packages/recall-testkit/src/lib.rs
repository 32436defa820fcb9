mod embeddings;
mod index;

pub use embeddings::{FailingEmbeddings, StubEmbeddings};
pub use index::InMemoryIndex;

use serde_json::Map;

use recall_config::EmbeddingConfig;

/// An embedding config for stores that never talk to a real provider.
pub fn embedding_config(dimensions: u32) -> EmbeddingConfig {
	EmbeddingConfig {
		api_base: "http://embedding.invalid".to_string(),
		api_key: "test-key".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "stub-embedding".to_string(),
		dimensions,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}
