pub mod codec;
pub mod index;
pub mod predicate;
pub mod qdrant;
pub mod schema;

mod create;
mod delete;
mod error;
mod fetch;
mod list;
mod reindex;
mod reminders;
mod search;
mod update;

pub use error::{Error, Result};
pub use list::DEFAULT_LIST_LIMIT;
pub use reindex::ReindexReport;
pub use search::{DEFAULT_SCORE_THRESHOLD, DEFAULT_SEARCH_LIMIT, SearchHit, SearchOptions};

use std::{future::Future, marker::PhantomData, pin::Pin, sync::Arc};

use index::DocumentIndex;
use recall_config::{EmbeddingConfig, ProvisionPolicy};
use recall_domain::{Idea, Memory, RecordKind};
use recall_providers::embedding::{self, Embedding};
use schema::IndexSchema;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, recall_providers::Result<Vec<Embedding>>>;
}

/// The production embedding provider, backed by the configured HTTP endpoint.
pub struct HttpEmbeddings;
impl EmbeddingProvider for HttpEmbeddings {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, recall_providers::Result<Vec<Embedding>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

/// One instantiation of the semantic record store: CRUD over records and
/// their reminders, similarity search, and the reminder due scan, all backed
/// by a single collection of the document index.
pub struct RecordStore<K>
where
	K: RecordKind,
{
	index: Arc<dyn DocumentIndex>,
	embeddings: Arc<dyn EmbeddingProvider>,
	embedding_cfg: EmbeddingConfig,
	vector_dim: u32,
	_kind: PhantomData<K>,
}

pub type IdeaStore = RecordStore<Idea>;
pub type MemoryStore = RecordStore<Memory>;

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Provisions the backing collection and returns a ready store. Nothing
	/// is accepted before provisioning has completed.
	pub async fn open(
		index: Arc<dyn DocumentIndex>,
		embeddings: Arc<dyn EmbeddingProvider>,
		embedding_cfg: EmbeddingConfig,
		policy: ProvisionPolicy,
	) -> Result<Self> {
		let vector_dim = embedding_cfg.dimensions;
		let schema = IndexSchema::new(vector_dim);

		index.provision(&schema, policy).await?;

		tracing::info!(kind = K::KIND, vector_dim, "Record store ready.");

		Ok(Self { index, embeddings, embedding_cfg, vector_dim, _kind: PhantomData })
	}

	pub(crate) async fn embed_text(&self, text: &str) -> Result<Embedding> {
		let texts = vec![text.to_string()];
		let mut embeddings = self.embeddings.embed(&self.embedding_cfg, &texts).await?;

		if embeddings.len() != 1 {
			return Err(Error::EmbeddingFailed {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		}

		let embedding = embeddings.remove(0);

		self.check_dim(&embedding.vector)?;

		Ok(embedding)
	}

	// A provider answering with the wrong dimension is a configuration
	// mismatch, never something to retry.
	pub(crate) fn check_dim(&self, vector: &[f32]) -> Result<()> {
		if vector.len() != self.vector_dim as usize {
			return Err(Error::EmbeddingFailed {
				message: format!(
					"Embedding dimension {} does not match configured vector_dim {}.",
					vector.len(),
					self.vector_dim
				),
			});
		}

		Ok(())
	}
}
