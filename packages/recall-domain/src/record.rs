use std::fmt::Debug;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::reminder::{Reminder, ReminderDraft};

/// A closed metadata enumeration that is stored as a keyword payload field.
pub trait FieldEnum:
	Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + Serialize + DeserializeOwned + 'static
{
	fn as_str(&self) -> &'static str;
}

/// One instantiation of the record store. The store is generic over this so
/// the two variants cannot drift apart.
pub trait RecordKind: Copy + Clone + Debug + Send + Sync + 'static {
	const KIND: &'static str;
	type Category: FieldEnum;
}

#[derive(Clone, Copy, Debug)]
pub struct Idea;
impl RecordKind for Idea {
	type Category = IdeaCategory;

	const KIND: &'static str = "idea";
}

#[derive(Clone, Copy, Debug)]
pub struct Memory;
impl RecordKind for Memory {
	type Category = MemoryCategory;

	const KIND: &'static str = "memory";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaCategory {
	Business,
	Personal,
	Technical,
	Creative,
	#[default]
	Other,
}
impl FieldEnum for IdeaCategory {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Business => "business",
			Self::Personal => "personal",
			Self::Technical => "technical",
			Self::Creative => "creative",
			Self::Other => "other",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryCategory {
	Fact,
	Preference,
	Event,
	Contact,
	#[default]
	Other,
}
impl FieldEnum for MemoryCategory {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Fact => "fact",
			Self::Preference => "preference",
			Self::Event => "event",
			Self::Contact => "contact",
			Self::Other => "other",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
	Low,
	#[default]
	Medium,
	High,
}
impl FieldEnum for Priority {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
	#[default]
	Active,
	Archived,
	Completed,
}
impl FieldEnum for Status {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Archived => "archived",
			Self::Completed => "completed",
		}
	}
}

/// A persisted text entity. The embedding of its primary text lives only in
/// the backing index and is never part of this type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
	serialize = "K::Category: Serialize",
	deserialize = "K::Category: Deserialize<'de>"
))]
pub struct Record<K>
where
	K: RecordKind,
{
	pub id: Uuid,
	pub title: Option<String>,
	pub body: String,
	pub category: K::Category,
	pub priority: Priority,
	pub status: Status,
	pub tags: Vec<String>,
	pub owner_id: String,
	pub conversation_id: Option<i64>,
	pub reminders: Vec<Reminder>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl<K> Record<K>
where
	K: RecordKind,
{
	/// The text the embedding is computed from.
	pub fn primary_text(&self) -> String {
		primary_text(self.title.as_deref(), &self.body)
	}
}

#[derive(Clone, Debug)]
pub struct RecordDraft<K>
where
	K: RecordKind,
{
	pub title: Option<String>,
	pub body: String,
	pub category: Option<K::Category>,
	pub priority: Option<Priority>,
	pub status: Option<Status>,
	pub tags: Vec<String>,
	pub owner_id: String,
	pub conversation_id: Option<i64>,
	pub reminders: Vec<ReminderDraft>,
}

/// A partial update. `None` leaves the stored field untouched; a provided
/// `reminders` value replaces the whole reminder set.
#[derive(Clone, Debug)]
pub struct RecordPatch<K>
where
	K: RecordKind,
{
	pub title: Option<String>,
	pub body: Option<String>,
	pub category: Option<K::Category>,
	pub priority: Option<Priority>,
	pub status: Option<Status>,
	pub tags: Option<Vec<String>>,
	pub conversation_id: Option<i64>,
	pub reminders: Option<Vec<ReminderDraft>>,
}
impl<K> RecordPatch<K>
where
	K: RecordKind,
{
	/// True when the patch touches a field the embedding is computed from.
	pub fn touches_primary_text(&self) -> bool {
		self.title.is_some() || self.body.is_some()
	}
}

impl<K> Default for RecordPatch<K>
where
	K: RecordKind,
{
	fn default() -> Self {
		Self {
			title: None,
			body: None,
			category: None,
			priority: None,
			status: None,
			tags: None,
			conversation_id: None,
			reminders: None,
		}
	}
}

pub fn primary_text(title: Option<&str>, body: &str) -> String {
	match title {
		Some(title) if !title.trim().is_empty() => format!("{}\n{}", title.trim(), body.trim()),
		_ => body.trim().to_string(),
	}
}
