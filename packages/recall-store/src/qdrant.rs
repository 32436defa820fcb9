use std::{collections::HashMap, sync::Arc};

use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		Condition, CreateCollectionBuilder, CreateFieldIndexCollection, DeletePointsBuilder,
		Direction, Distance, FieldType, Filter, GetPointsBuilder, OrderBy, PointId, PointStruct,
		Query, QueryPointsBuilder, Range, RetrievedPoint, ScoredPoint, ScrollPointsBuilder,
		UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder, VectorsOutput,
		point_id::PointIdOptions, value::Kind, vectors_output::VectorsOptions,
	},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
	BoxFuture,
	index::{Document, DocumentIndex, IndexError, IndexResult, Page, ScoredDocument},
	predicate::{FieldCondition, Predicate},
	schema::{IndexSchema, PayloadFieldKind},
};
use recall_config::ProvisionPolicy;

/// The production [`DocumentIndex`]: one Qdrant collection per store
/// instance, cosine distance over a single dense vector.
pub struct QdrantIndex {
	client: Arc<Qdrant>,
	collection: String,
}
impl QdrantIndex {
	pub fn connect(url: &str, collection: impl Into<String>) -> IndexResult<Self> {
		let client = Qdrant::from_url(url).build().map_err(index_err)?;

		Ok(Self { client: Arc::new(client), collection: collection.into() })
	}

	/// A second index over another collection, sharing this connection
	/// handle.
	pub fn for_collection(&self, collection: impl Into<String>) -> Self {
		Self { client: self.client.clone(), collection: collection.into() }
	}

	pub fn collection(&self) -> &str {
		&self.collection
	}

	async fn collection_exists(&self) -> IndexResult<bool> {
		let collections = self.client.list_collections().await.map_err(index_err)?;

		Ok(collections.collections.into_iter().any(|collection| collection.name == self.collection))
	}

	async fn create_collection(&self, schema: &IndexSchema) -> IndexResult<()> {
		self.client
			.create_collection(
				CreateCollectionBuilder::new(self.collection.clone()).vectors_config(
					VectorParamsBuilder::new(u64::from(schema.vector_dim), Distance::Cosine),
				),
			)
			.await
			.map_err(index_err)?;

		for (field, kind) in IndexSchema::payload_fields() {
			let request = CreateFieldIndexCollection {
				collection_name: self.collection.clone(),
				wait: Some(true),
				field_name: (*field).to_string(),
				field_type: Some(field_type(*kind) as i32),
				field_index_params: None,
				ordering: None,
			};

			self.client.create_field_index(request).await.map_err(index_err)?;
		}

		Ok(())
	}
}

impl DocumentIndex for QdrantIndex {
	fn provision<'a>(
		&'a self,
		schema: &'a IndexSchema,
		policy: ProvisionPolicy,
	) -> BoxFuture<'a, IndexResult<()>> {
		Box::pin(async move {
			if self.collection_exists().await? {
				match policy {
					ProvisionPolicy::Ensure => return Ok(()),
					ProvisionPolicy::Recreate => {
						tracing::warn!(
							collection = %self.collection,
							"Dropping existing collection before recreate."
						);
						self.client
							.delete_collection(self.collection.clone())
							.await
							.map_err(index_err)?;
					},
				}
			}

			self.create_collection(schema).await?;

			tracing::info!(collection = %self.collection, "Provisioned collection.");

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
			let payload = payload_from_json(payload)?;
			let point = PointStruct::new(id.to_string(), vector, payload);

			self.client
				.upsert_points(UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true))
				.await
				.map_err(index_err)?;

			Ok(())
		})
	}

	fn fetch<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<Option<Document>>> {
		Box::pin(async move {
			let response = self
				.client
				.get_points(
					GetPointsBuilder::new(
						self.collection.clone(),
						vec![PointId::from(id.to_string())],
					)
					.with_payload(true)
					.with_vectors(true),
				)
				.await
				.map_err(index_err)?;
			let Some(point) = response.result.into_iter().next() else {
				return Ok(None);
			};

			Ok(Some(document_from_retrieved(point)?))
		})
	}

	fn remove<'a>(&'a self, id: Uuid) -> BoxFuture<'a, IndexResult<()>> {
		Box::pin(async move {
			self.client
				.delete_points(
					DeletePointsBuilder::new(self.collection.clone())
						.points(vec![PointId::from(id.to_string())])
						.wait(true),
				)
				.await
				.map_err(index_err)?;

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
			let mut builder = QueryPointsBuilder::new(self.collection.clone())
				.query(Query::new_nearest(vector))
				.limit(limit)
				.score_threshold(score_threshold)
				.with_payload(true);

			if !predicate.is_match_all() {
				builder = builder.filter(filter_from_predicate(predicate));
			}

			let response = self.client.query(builder).await.map_err(index_err)?;

			response.result.into_iter().map(document_from_scored).collect()
		})
	}

	fn list_recent<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, IndexResult<Vec<Document>>> {
		Box::pin(async move {
			let mut builder = ScrollPointsBuilder::new(self.collection.clone())
				.limit(limit as u32)
				.with_payload(true)
				.order_by(OrderBy {
					key: "created_at".to_string(),
					direction: Some(Direction::Desc as i32),
					start_from: None,
				});

			if !predicate.is_match_all() {
				builder = builder.filter(filter_from_predicate(predicate));
			}

			let response = self.client.scroll(builder).await.map_err(index_err)?;

			response.result.into_iter().map(document_from_retrieved).collect()
		})
	}

	fn scan<'a>(
		&'a self,
		predicate: &'a Predicate,
		limit: u64,
		offset: Option<Uuid>,
	) -> BoxFuture<'a, IndexResult<Page>> {
		Box::pin(async move {
			let mut builder = ScrollPointsBuilder::new(self.collection.clone())
				.limit(limit as u32)
				.with_payload(true);

			if let Some(offset) = offset {
				builder = builder.offset(PointId::from(offset.to_string()));
			}
			if !predicate.is_match_all() {
				builder = builder.filter(filter_from_predicate(predicate));
			}

			let response = self.client.scroll(builder).await.map_err(index_err)?;
			let next = response.next_page_offset.as_ref().and_then(point_id_to_uuid);
			let documents = response
				.result
				.into_iter()
				.map(document_from_retrieved)
				.collect::<IndexResult<Vec<_>>>()?;

			Ok(Page { documents, next })
		})
	}
}

fn filter_from_predicate(predicate: &Predicate) -> Filter {
	Filter::must(predicate.conditions.iter().map(|condition| match condition {
		FieldCondition::Keyword { field, value } => Condition::matches(*field, value.clone()),
		FieldCondition::IntPoint { field, value } => Condition::range(*field, Range {
			lt: None,
			gt: None,
			gte: Some(*value as f64),
			lte: Some(*value as f64),
		}),
		FieldCondition::AnyKeyword { field, values } => Condition::matches(*field, values.clone()),
	}))
}

fn field_type(kind: PayloadFieldKind) -> FieldType {
	match kind {
		PayloadFieldKind::Keyword => FieldType::Keyword,
		PayloadFieldKind::Integer => FieldType::Integer,
		PayloadFieldKind::Datetime => FieldType::Datetime,
	}
}

fn index_err(err: qdrant_client::QdrantError) -> IndexError {
	IndexError(err.to_string())
}

fn document_from_retrieved(point: RetrievedPoint) -> IndexResult<Document> {
	let id = point
		.id
		.as_ref()
		.and_then(point_id_to_uuid)
		.ok_or_else(|| IndexError("Stored point is missing a UUID id.".to_string()))?;
	let vector = point.vectors.and_then(dense_vector);

	Ok(Document { id, payload: json_from_payload(point.payload), vector })
}

fn document_from_scored(point: ScoredPoint) -> IndexResult<ScoredDocument> {
	let id = point
		.id
		.as_ref()
		.and_then(point_id_to_uuid)
		.ok_or_else(|| IndexError("Scored point is missing a UUID id.".to_string()))?;
	let document = Document { id, payload: json_from_payload(point.payload), vector: None };

	Ok(ScoredDocument { document, score: point.score })
}

fn point_id_to_uuid(point_id: &PointId) -> Option<Uuid> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Uuid::parse_str(id).ok(),
		_ => None,
	}
}

fn dense_vector(vectors: VectorsOutput) -> Option<Vec<f32>> {
	match vectors.vectors_options {
		Some(VectorsOptions::Vector(vector)) => Some(vector.data),
		_ => None,
	}
}

fn payload_from_json(payload: Value) -> IndexResult<Payload> {
	let Value::Object(fields) = payload else {
		return Err(IndexError("Document payload must be a JSON object.".to_string()));
	};
	let map: HashMap<String, QdrantValue> =
		fields.into_iter().map(|(key, value)| (key, QdrantValue::from(value))).collect();

	Ok(Payload::from(map))
}

fn json_from_payload(payload: HashMap<String, QdrantValue>) -> Value {
	Value::Object(payload.into_iter().map(|(key, value)| (key, json_from_qdrant(value))).collect())
}

fn json_from_qdrant(value: QdrantValue) -> Value {
	match value.kind {
		None | Some(Kind::NullValue(_)) => Value::Null,
		Some(Kind::BoolValue(value)) => Value::Bool(value),
		Some(Kind::IntegerValue(value)) => Value::from(value),
		Some(Kind::DoubleValue(value)) =>
			serde_json::Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null),
		Some(Kind::StringValue(value)) => Value::String(value),
		Some(Kind::ListValue(list)) =>
			Value::Array(list.values.into_iter().map(json_from_qdrant).collect()),
		Some(Kind::StructValue(fields)) => Value::Object(
			fields.fields.into_iter().map(|(key, value)| (key, json_from_qdrant(value))).collect(),
		),
	}
}
