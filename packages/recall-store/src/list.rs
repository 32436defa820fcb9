use crate::{Error, RecordStore, Result, codec, predicate::Predicate};
use recall_domain::{Record, RecordFilter, RecordKind};

pub const DEFAULT_LIST_LIMIT: u64 = 50;

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Newest first, by `created_at`.
	pub async fn list(
		&self,
		filter: RecordFilter<K>,
		limit: Option<u64>,
	) -> Result<Vec<Record<K>>> {
		let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);

		if limit == 0 {
			return Err(Error::Validation { message: "limit must be greater than zero.".to_string() });
		}

		let predicate = Predicate::from_filter(&filter)?;
		let documents = self.index.list_recent(&predicate, limit).await?;

		documents.into_iter().map(|document| codec::from_payload(document.payload)).collect()
	}
}
