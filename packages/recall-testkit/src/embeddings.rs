use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use recall_config::EmbeddingConfig;
use recall_providers::embedding::Embedding;
use recall_store::{BoxFuture, EmbeddingProvider};

/// Deterministic bag-of-tokens embeddings: every distinct token gets its own
/// dimension (first come, first served), so texts sharing tokens have
/// positive cosine similarity and unrelated texts score zero. Collisions are
/// impossible while a test uses fewer distinct tokens than dimensions.
#[derive(Default)]
pub struct StubEmbeddings {
	buckets: Mutex<HashMap<String, usize>>,
	calls: AtomicUsize,
}
impl StubEmbeddings {
	pub fn new() -> Self {
		Self::default()
	}

	/// How many embedding requests reached this provider.
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn embed_one(&self, text: &str, dimensions: u32) -> Embedding {
		let mut vector = vec![0.0_f32; dimensions as usize];
		let mut tokens = 0_u32;
		let mut buckets = self.buckets.lock().unwrap_or_else(|err| err.into_inner());

		for token in text
			.to_lowercase()
			.split(|ch: char| !ch.is_alphanumeric())
			.filter(|token| !token.is_empty())
		{
			let next = buckets.len();
			let bucket = *buckets.entry(token.to_string()).or_insert(next);

			vector[bucket % dimensions as usize] += 1.0;
			tokens += 1;
		}

		let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();

		if norm > 0.0 {
			for value in &mut vector {
				*value /= norm;
			}
		}

		Embedding { vector, tokens }
	}
}
impl EmbeddingProvider for StubEmbeddings {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, recall_providers::Result<Vec<Embedding>>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			Ok(texts.iter().map(|text| self.embed_one(text, cfg.dimensions)).collect())
		})
	}
}

/// A provider that fails every request, the way a rate-limited or
/// misconfigured endpoint would.
pub struct FailingEmbeddings {
	pub message: String,
}
impl FailingEmbeddings {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}
impl EmbeddingProvider for FailingEmbeddings {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, recall_providers::Result<Vec<Embedding>>> {
		Box::pin(async move {
			Err(recall_providers::Error::InvalidResponse { message: self.message.clone() })
		})
	}
}
