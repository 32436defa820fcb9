use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, RecordStore, Result, codec, predicate::Predicate};
use recall_domain::{Record, RecordKind, Reminder};

const SCAN_PAGE_SIZE: u64 = 256;

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Paged full scan for reminders that are active, unsent, and past due.
	/// There is no secondary index by schedule time; the collection is read
	/// page by page.
	pub async fn due_reminders(&self, now: OffsetDateTime) -> Result<Vec<Reminder>> {
		let predicate = Predicate::match_all();
		let mut due = Vec::new();
		let mut offset = None;

		loop {
			let page = self.index.scan(&predicate, SCAN_PAGE_SIZE, offset).await?;

			for document in page.documents {
				let record: Record<K> = codec::from_payload(document.payload)?;

				due.extend(record.reminders.into_iter().filter(|reminder| reminder.is_due(now)));
			}

			match page.next {
				Some(next) => offset = Some(next),
				None => break,
			}
		}

		Ok(due)
	}

	/// Marks a reminder sent, a terminal transition. Repeating the call on
	/// an already-sent reminder succeeds without writing; an unknown id
	/// returns `false`.
	pub async fn mark_sent(&self, reminder_id: Uuid) -> Result<bool> {
		let predicate = Predicate::match_all();
		let mut offset = None;

		loop {
			let page = self.index.scan(&predicate, SCAN_PAGE_SIZE, offset).await?;

			for document in page.documents {
				let record: Record<K> = codec::from_payload(document.payload)?;

				if !record.reminders.iter().any(|reminder| reminder.id == reminder_id) {
					continue;
				}

				return self.mark_record_reminder_sent(record.id, reminder_id).await;
			}

			match page.next {
				Some(next) => offset = Some(next),
				None => return Ok(false),
			}
		}
	}

	// The scan pages carry no vectors; refetch the owning record so the
	// write keeps the stored vector untouched.
	async fn mark_record_reminder_sent(&self, record_id: Uuid, reminder_id: Uuid) -> Result<bool> {
		let Some(stored) = self.index.fetch(record_id).await? else {
			return Ok(false);
		};
		let vector = stored.vector.ok_or_else(|| Error::StoreUnavailable {
			message: "Stored record is missing its vector.".to_string(),
		})?;
		let mut record: Record<K> = codec::from_payload(stored.payload)?;
		let Some(reminder) =
			record.reminders.iter_mut().find(|reminder| reminder.id == reminder_id)
		else {
			return Ok(false);
		};

		if reminder.is_sent {
			return Ok(true);
		}

		let now = OffsetDateTime::now_utc();

		reminder.is_sent = true;
		reminder.updated_at = now;
		record.updated_at = now;

		self.index.upsert(record.id, vector, codec::to_payload(&record)?).await?;

		tracing::info!(kind = K::KIND, reminder = %reminder_id, "Marked reminder sent.");

		Ok(true)
	}
}
