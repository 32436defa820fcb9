pub mod filter;
pub mod record;
pub mod reminder;
pub mod time_serde;

pub use filter::RecordFilter;
pub use record::{
	FieldEnum, Idea, IdeaCategory, Memory, MemoryCategory, Priority, Record, RecordDraft,
	RecordKind, RecordPatch, Status,
};
pub use reminder::{Reminder, ReminderDraft, ReminderKind};
