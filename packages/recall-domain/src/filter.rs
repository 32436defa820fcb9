use crate::record::{Priority, RecordKind, Status};

/// Optional equality predicates over the indexed metadata fields. Every
/// present field must match; `tags` matches when any listed tag is present.
/// The default value matches everything.
#[derive(Clone, Debug)]
pub struct RecordFilter<K>
where
	K: RecordKind,
{
	pub owner_id: Option<String>,
	pub conversation_id: Option<i64>,
	pub category: Option<K::Category>,
	pub priority: Option<Priority>,
	pub status: Option<Status>,
	pub tags: Option<Vec<String>>,
}
impl<K> RecordFilter<K>
where
	K: RecordKind,
{
	pub fn is_empty(&self) -> bool {
		self.owner_id.is_none()
			&& self.conversation_id.is_none()
			&& self.category.is_none()
			&& self.priority.is_none()
			&& self.status.is_none()
			&& self.tags.is_none()
	}
}

impl<K> Default for RecordFilter<K>
where
	K: RecordKind,
{
	fn default() -> Self {
		Self {
			owner_id: None,
			conversation_id: None,
			category: None,
			priority: None,
			status: None,
			tags: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::Idea;

	#[test]
	fn default_filter_is_match_all() {
		assert!(RecordFilter::<Idea>::default().is_empty());
	}

	#[test]
	fn any_present_field_makes_the_filter_non_empty() {
		let filter =
			RecordFilter::<Idea> { owner_id: Some("user-1".to_string()), ..Default::default() };

		assert!(!filter.is_empty());
	}
}
