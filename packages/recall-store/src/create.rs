use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, RecordStore, Result, codec};
use recall_domain::{Record, RecordDraft, RecordKind, Reminder, record};

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Embeds the primary text and persists a new record. An embedding
	/// failure aborts the write; nothing is persisted partially.
	pub async fn create(&self, draft: RecordDraft<K>) -> Result<Record<K>> {
		let owner_id = draft.owner_id.trim();

		if owner_id.is_empty() {
			return Err(Error::Validation { message: "owner_id is required.".to_string() });
		}
		if draft.body.trim().is_empty() {
			return Err(Error::Validation { message: "body is required.".to_string() });
		}

		let text = record::primary_text(draft.title.as_deref(), &draft.body);
		let embedding = self.embed_text(&text).await?;
		let now = OffsetDateTime::now_utc();
		let id = Uuid::new_v4();
		let reminders = draft
			.reminders
			.into_iter()
			.map(|reminder| Reminder::from_draft(reminder, id, now))
			.collect();
		let record = Record {
			id,
			title: draft.title.filter(|title| !title.trim().is_empty()),
			body: draft.body,
			category: draft.category.unwrap_or_default(),
			priority: draft.priority.unwrap_or_default(),
			status: draft.status.unwrap_or_default(),
			tags: draft.tags,
			owner_id: owner_id.to_string(),
			conversation_id: draft.conversation_id,
			reminders,
			created_at: now,
			updated_at: now,
		};

		self.index.upsert(record.id, embedding.vector, codec::to_payload(&record)?).await?;

		tracing::info!(kind = K::KIND, id = %record.id, tokens = embedding.tokens, "Created record.");

		Ok(record)
	}
}
