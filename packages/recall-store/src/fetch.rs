use uuid::Uuid;

use crate::{RecordStore, Result, codec};
use recall_domain::{Record, RecordKind};

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	pub async fn get(&self, id: Uuid) -> Result<Option<Record<K>>> {
		let Some(document) = self.index.fetch(id).await? else {
			return Ok(None);
		};

		Ok(Some(codec::from_payload(document.payload)?))
	}
}
