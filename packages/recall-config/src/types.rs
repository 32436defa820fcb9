use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub store: StoreConfig,
	pub embedding: EmbeddingConfig,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
	pub url: String,
	pub ideas_collection: String,
	pub memories_collection: String,
	pub vector_dim: u32,
	#[serde(default)]
	pub on_start: ProvisionPolicy,
}

/// What to do with an already-provisioned collection at startup. `Recreate`
/// drops every indexed record and is only meant for disposable environments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionPolicy {
	#[default]
	Ensure,
	Recreate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingConfig {
	pub api_base: String,
	pub api_key: String,
	#[serde(default = "default_embedding_path")]
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_embedding_path() -> String {
	"/v1/embeddings".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}
