use uuid::Uuid;

use crate::{RecordStore, Result};
use recall_domain::RecordKind;

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// True iff a record existed and was removed. Reminders live inside the
	/// record document, so they go with it.
	pub async fn delete(&self, id: Uuid) -> Result<bool> {
		if self.index.fetch(id).await?.is_none() {
			return Ok(false);
		}

		self.index.remove(id).await?;

		tracing::info!(kind = K::KIND, id = %id, "Deleted record.");

		Ok(true)
	}
}
