use serde_json::Value;
use uuid::Uuid;

use crate::{BoxFuture, predicate::Predicate, schema::IndexSchema};
use recall_config::ProvisionPolicy;

pub type IndexResult<T> = Result<T, IndexError>;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct IndexError(pub String);

/// A stored record body. The vector is only populated by `fetch`; listing
/// and scanning read payloads alone.
#[derive(Clone, Debug)]
pub struct Document {
	pub id: Uuid,
	pub payload: Value,
	pub vector: Option<Vec<f32>>,
}

#[derive(Clone, Debug)]
pub struct ScoredDocument {
	pub document: Document,
	pub score: f32,
}

/// One page of an unordered full scan.
#[derive(Clone, Debug)]
pub struct Page {
	pub documents: Vec<Document>,
	pub next: Option<Uuid>,
}

/// The document store seam: per-key JSON documents with one dense vector
/// each, filtered nearest-neighbour queries, and collection provisioning.
/// `query` results arrive best-first; the score is a cosine similarity
/// (higher is better).
pub trait DocumentIndex
where
	Self: Send + Sync,
{
	fn provision<'a>(
		&'a self,
		schema: &'a IndexSchema,
		policy: ProvisionPolicy,
	) -> BoxFuture<'a, IndexResult<()>>;

	fn upsert<'a>(
		&'a self,
		id: Uuid,
		vector: Vec<f32>,
		payload: Value,
	) -> BoxFuture<'a, IndexResult<()>>;

	fn fetch<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<Option<Document>>>;

	fn remove<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<()>>;

	fn query<'a>(
		&'a self,
		vector: Vec<f32>,
		predicate: &'a Predicate,
		limit: u64,
		score_threshold: f32,
	) -> BoxFuture<'a, IndexResult<Vec<ScoredDocument>>>;

	fn list_recent<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, IndexResult<Vec<Document>>>;

	fn scan<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
		offset: Option<Uuid>,
	) -> BoxFuture<'a, IndexResult<Page>>;
}
