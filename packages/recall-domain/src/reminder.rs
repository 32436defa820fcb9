use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
	#[default]
	Once,
	Daily,
	Weekly,
	Monthly,
	Custom,
}

/// A scheduled notification trigger owned by a record. The store only marks a
/// reminder sent; scheduling the next occurrence of a recurring reminder is
/// the delivery side's job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reminder {
	pub id: Uuid,
	pub record_id: Uuid,
	pub kind: ReminderKind,
	#[serde(with = "crate::time_serde")]
	pub scheduled_for: OffsetDateTime,
	pub message: Option<String>,
	pub is_active: bool,
	pub is_sent: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl Reminder {
	pub fn from_draft(draft: ReminderDraft, record_id: Uuid, now: OffsetDateTime) -> Self {
		Self {
			id: Uuid::new_v4(),
			record_id,
			kind: draft.kind,
			scheduled_for: draft.scheduled_for,
			message: draft.message,
			is_active: true,
			is_sent: false,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_due(&self, now: OffsetDateTime) -> bool {
		self.is_active && !self.is_sent && self.scheduled_for <= now
	}
}

#[derive(Clone, Debug)]
pub struct ReminderDraft {
	pub kind: ReminderKind,
	pub scheduled_for: OffsetDateTime,
	pub message: Option<String>,
}

#[cfg(test)]
mod tests {
	use time::Duration;

	use super::*;

	fn draft(offset: Duration) -> ReminderDraft {
		ReminderDraft {
			kind: ReminderKind::Once,
			scheduled_for: OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp")
				+ offset,
			message: None,
		}
	}

	#[test]
	fn new_reminders_start_active_and_unsent() {
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
		let reminder = Reminder::from_draft(draft(Duration::hours(1)), Uuid::new_v4(), now);

		assert!(reminder.is_active);
		assert!(!reminder.is_sent);
		assert_eq!(reminder.created_at, now);
	}

	#[test]
	fn due_requires_active_unsent_and_elapsed() {
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
		let mut reminder = Reminder::from_draft(draft(Duration::hours(-1)), Uuid::new_v4(), now);

		assert!(reminder.is_due(now));

		reminder.is_sent = true;

		assert!(!reminder.is_due(now));

		reminder.is_sent = false;
		reminder.is_active = false;

		assert!(!reminder.is_due(now));

		let future = Reminder::from_draft(draft(Duration::hours(1)), Uuid::new_v4(), now);

		assert!(!future.is_due(now));
	}
}
