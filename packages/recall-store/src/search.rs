use crate::{Error, RecordStore, Result, codec, predicate::Predicate};
use recall_domain::{Record, RecordFilter, RecordKind};

pub const DEFAULT_SEARCH_LIMIT: u64 = 10;
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct SearchOptions<K>
where
	K: RecordKind,
{
	pub limit: Option<u64>,
	pub threshold: Option<f32>,
	pub filter: RecordFilter<K>,
}
impl<K> Default for SearchOptions<K>
where
	K: RecordKind,
{
	fn default() -> Self {
		Self { limit: None, threshold: None, filter: RecordFilter::default() }
	}
}

/// `score` is the engine's cosine similarity, higher is better; `distance`
/// is the derived `1 - score`.
#[derive(Clone, Debug)]
pub struct SearchHit<K>
where
	K: RecordKind,
{
	pub record: Record<K>,
	pub score: f32,
	pub distance: f32,
}

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	pub async fn search(&self, query: &str, options: SearchOptions<K>) -> Result<Vec<SearchHit<K>>> {
		let limit = options.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

		if limit == 0 {
			return Err(Error::Validation { message: "limit must be greater than zero.".to_string() });
		}

		let threshold = options.threshold.unwrap_or(DEFAULT_SCORE_THRESHOLD);

		if !threshold.is_finite() {
			return Err(Error::Validation { message: "threshold must be a finite number.".to_string() });
		}

		let predicate = Predicate::from_filter(&options.filter)?;
		// An empty query is embedded like any other text; a provider that
		// rejects it fails the search instead of returning an empty set.
		let embedding = self.embed_text(query).await?;
		let hits = self.index.query(embedding.vector, &predicate, limit, threshold).await?;
		let mut out = Vec::with_capacity(hits.len());

		for hit in hits {
			if hit.score < threshold {
				continue;
			}

			let record = codec::from_payload(hit.document.payload)?;

			out.push(SearchHit { record, score: hit.score, distance: 1.0 - hit.score });
		}

		Ok(out)
	}
}
