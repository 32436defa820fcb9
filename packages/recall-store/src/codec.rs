use serde_json::Value;

use crate::{Error, Result};
use recall_domain::{Record, RecordKind};

/// Serializes a record into the JSON document stored next to its vector.
/// Timestamps are RFC3339 strings so the index's datetime fields work on
/// them; the vector is never part of the payload.
pub fn to_payload<K>(record: &Record<K>) -> Result<Value>
where
	K: RecordKind,
{
	serde_json::to_value(record).map_err(|err| Error::StoreUnavailable {
		message: format!("Failed to encode record payload: {err}."),
	})
}

pub fn from_payload<K>(payload: Value) -> Result<Record<K>>
where
	K: RecordKind,
{
	serde_json::from_value(payload).map_err(|err| Error::StoreUnavailable {
		message: format!("Stored record payload is malformed: {err}."),
	})
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;
	use uuid::Uuid;

	use super::*;
	use recall_domain::{
		Idea, IdeaCategory, Priority, Record, Reminder, ReminderKind, Status,
	};

	fn record() -> Record<Idea> {
		let id = Uuid::new_v4();
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");

		Record {
			id,
			title: Some("Quarterly plan".to_string()),
			body: "Expand into enterprise".to_string(),
			category: IdeaCategory::Business,
			priority: Priority::High,
			status: Status::Active,
			tags: vec!["enterprise".to_string(), "strategy".to_string()],
			owner_id: "user-1".to_string(),
			conversation_id: Some(42),
			reminders: vec![Reminder {
				id: Uuid::new_v4(),
				record_id: id,
				kind: ReminderKind::Weekly,
				scheduled_for: now,
				message: Some("follow up".to_string()),
				is_active: true,
				is_sent: false,
				created_at: now,
				updated_at: now,
			}],
			created_at: now,
			updated_at: now,
		}
	}

	#[test]
	fn payload_round_trips_and_never_carries_a_vector() {
		let record = record();
		let payload = to_payload(&record).expect("encode failed");

		assert!(payload.get("vector").is_none());
		assert_eq!(
			payload.get("created_at").and_then(Value::as_str),
			Some("2023-11-14T22:13:20Z"),
		);
		assert_eq!(payload.get("category").and_then(Value::as_str), Some("business"));

		let decoded: Record<Idea> = from_payload(payload).expect("decode failed");

		assert_eq!(decoded.id, record.id);
		assert_eq!(decoded.tags, record.tags);
		assert_eq!(decoded.reminders.len(), 1);
		assert_eq!(decoded.reminders[0].kind, ReminderKind::Weekly);
	}

	#[test]
	fn malformed_payloads_surface_as_store_errors() {
		let payload = serde_json::json!({ "id": "not-a-uuid" });

		assert!(matches!(
			from_payload::<Idea>(payload),
			Err(Error::StoreUnavailable { .. })
		));
	}
}
