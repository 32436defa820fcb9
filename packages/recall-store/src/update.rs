use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, RecordStore, Result, codec};
use recall_domain::{Record, RecordKind, RecordPatch, Reminder};

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Applies only the provided fields. The stored vector is recomputed iff
	/// the patch touches a primary-text field and reused byte-for-byte
	/// otherwise. `Ok(None)` means the id does not exist.
	pub async fn update(&self, id: Uuid, patch: RecordPatch<K>) -> Result<Option<Record<K>>> {
		if let Some(body) = patch.body.as_deref()
			&& body.trim().is_empty()
		{
			return Err(Error::Validation { message: "body must be non-empty.".to_string() });
		}

		let Some(document) = self.index.fetch(id).await? else {
			return Ok(None);
		};
		let mut record: Record<K> = codec::from_payload(document.payload)?;
		let reembed = patch.touches_primary_text();
		let now = OffsetDateTime::now_utc();

		if let Some(title) = patch.title {
			record.title = Some(title).filter(|title| !title.trim().is_empty());
		}
		if let Some(body) = patch.body {
			record.body = body;
		}
		if let Some(category) = patch.category {
			record.category = category;
		}
		if let Some(priority) = patch.priority {
			record.priority = priority;
		}
		if let Some(status) = patch.status {
			record.status = status;
		}
		if let Some(tags) = patch.tags {
			record.tags = tags;
		}
		if let Some(conversation_id) = patch.conversation_id {
			record.conversation_id = Some(conversation_id);
		}
		if let Some(drafts) = patch.reminders {
			record.reminders = drafts
				.into_iter()
				.map(|reminder| Reminder::from_draft(reminder, id, now))
				.collect();
		}

		record.updated_at = now;

		let vector = if reembed {
			self.embed_text(&record.primary_text()).await?.vector
		} else {
			document.vector.ok_or_else(|| Error::StoreUnavailable {
				message: "Stored record is missing its vector.".to_string(),
			})?
		};

		self.index.upsert(id, vector, codec::to_payload(&record)?).await?;

		Ok(Some(record))
	}
}
