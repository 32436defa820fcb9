use std::{cmp::Ordering, collections::BTreeMap, sync::Mutex};

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use recall_config::ProvisionPolicy;
use recall_store::{
	BoxFuture,
	index::{Document, DocumentIndex, IndexError, IndexResult, Page, ScoredDocument},
	predicate::Predicate,
	schema::IndexSchema,
};

struct StoredPoint {
	vector: Vec<f32>,
	payload: Value,
}

struct State {
	vector_dim: Option<u32>,
	points: BTreeMap<Uuid, StoredPoint>,
}

/// An in-process [`DocumentIndex`] with the same observable semantics as the
/// production one: cosine scoring, conjunctive payload filters, newest-first
/// listing, and paged scans in stable id order.
#[derive(Default)]
pub struct InMemoryIndex {
	state: Mutex<State>,
}
impl Default for State {
	fn default() -> Self {
		Self { vector_dim: None, points: BTreeMap::new() }
	}
}
impl InMemoryIndex {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn point_count(&self) -> usize {
		self.state.lock().unwrap_or_else(|err| err.into_inner()).points.len()
	}
}
impl DocumentIndex for InMemoryIndex {
	fn provision<'a>(
		&'a self,
		schema: &'a IndexSchema,
		policy: ProvisionPolicy,
	) -> BoxFuture<'a, IndexResult<()>> {
		Box::pin(async move {
			let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

			if policy == ProvisionPolicy::Recreate {
				state.points.clear();
			}

			state.vector_dim = Some(schema.vector_dim);

			Ok(())
		})
	}

	fn upsert<'a>(
		&'a self,
		id: Uuid,
		vector: Vec<f32>,
		payload: Value,
	) -> BoxFuture<'a, IndexResult<()>> {
		Box::pin(async move {
			let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

			if let Some(dim) = state.vector_dim
				&& vector.len() != dim as usize
			{
				return Err(IndexError(format!(
					"Vector dimension {} does not match collection dimension {dim}.",
					vector.len()
				)));
			}

			state.points.insert(id, StoredPoint { vector, payload });

			Ok(())
		})
	}

	fn fetch<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<Option<Document>>> {
		Box::pin(async move {
			let state = self.state.lock().unwrap_or_else(|err| err.into_inner());

			Ok(state.points.get(&id).map(|point| Document {
				id,
				payload: point.payload.clone(),
				vector: Some(point.vector.clone()),
			}))
		})
	}

	fn remove<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<()>> {
		Box::pin(async move {
			let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

			state.points.remove(&id);

			Ok(())
		})
	}

	fn query<'a>(
		&'a self,
		vector: Vec<f32>,
		predicate: &'a Predicate,
		limit: u64,
		score_threshold: f32,
	) -> BoxFuture<'a, IndexResult<Vec<ScoredDocument>>> {
		Box::pin(async move {
			let state = self.state.lock().unwrap_or_else(|err| err.into_inner());
			let mut hits = state
				.points
				.iter()
				.filter(|(_, point)| predicate.matches(&point.payload))
				.map(|(id, point)| ScoredDocument {
					document: Document { id: *id, payload: point.payload.clone(), vector: None },
					score: cosine(&vector, &point.vector),
				})
				.filter(|hit| hit.score >= score_threshold)
				.collect::<Vec<_>>();

			hits.sort_by(|left, right| {
				right
					.score
					.partial_cmp(&left.score)
					.unwrap_or(Ordering::Equal)
					.then_with(|| left.document.id.cmp(&right.document.id))
			});
			hits.truncate(limit as usize);

			Ok(hits)
		})
	}

	fn list_recent<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, IndexResult<Vec<Document>>> {
		Box::pin(async move {
			let state = self.state.lock().unwrap_or_else(|err| err.into_inner());
			let mut documents = state
				.points
				.iter()
				.filter(|(_, point)| predicate.matches(&point.payload))
				.map(|(id, point)| Document {
					id: *id,
					payload: point.payload.clone(),
					vector: None,
				})
				.collect::<Vec<_>>();

			documents.sort_by(|left, right| {
				created_at(&right.payload)
					.cmp(&created_at(&left.payload))
					.then_with(|| left.id.cmp(&right.id))
			});
			documents.truncate(limit as usize);

			Ok(documents)
		})
	}

	fn scan<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
		offset: Option<Uuid>,
	) -> BoxFuture<'a, IndexResult<Page>> {
		Box::pin(async move {
			let state = self.state.lock().unwrap_or_else(|err| err.into_inner());
			let mut documents = Vec::new();
			let mut next = None;

			for (id, point) in &state.points {
				if let Some(offset) = offset
					&& *id <= offset
				{
					continue;
				}
				if !predicate.matches(&point.payload) {
					continue;
				}
				if documents.len() as u64 == limit {
					next = documents.last().map(|document: &Document| document.id);

					break;
				}

				documents.push(Document { id: *id, payload: point.payload.clone(), vector: None });
			}

			Ok(Page { documents, next })
		})
	}
}

fn cosine(left: &[f32], right: &[f32]) -> f32 {
	if left.len() != right.len() {
		return 0.0;
	}

	let dot = left.iter().zip(right).map(|(l, r)| l * r).sum::<f32>();
	let left_norm = left.iter().map(|value| value * value).sum::<f32>().sqrt();
	let right_norm = right.iter().map(|value| value * value).sum::<f32>().sqrt();

	if left_norm == 0.0 || right_norm == 0.0 {
		return 0.0;
	}

	dot / (left_norm * right_norm)
}

fn created_at(payload: &Value) -> OffsetDateTime {
	payload
		.get("created_at")
		.and_then(Value::as_str)
		.and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
		.unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
