use serde_json::Value;

use crate::{Error, Result};
use recall_domain::{RecordFilter, RecordKind, record::FieldEnum};

/// A conjunction of field conditions compiled from a [`RecordFilter`]. An
/// empty predicate matches every document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Predicate {
	pub conditions: Vec<FieldCondition>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldCondition {
	/// Exact match on a keyword field.
	Keyword { field: &'static str, value: String },
	/// Numeric equality, expressed as the single-point range `[value, value]`.
	IntPoint { field: &'static str, value: i64 },
	/// Matches when the multi-value field carries any of the listed values.
	AnyKeyword { field: &'static str, values: Vec<String> },
}

impl Predicate {
	pub fn match_all() -> Self {
		Self::default()
	}

	pub fn is_match_all(&self) -> bool {
		self.conditions.is_empty()
	}

	pub fn from_filter<K>(filter: &RecordFilter<K>) -> Result<Self>
	where
		K: RecordKind,
	{
		let mut conditions = Vec::new();

		if let Some(owner_id) = &filter.owner_id {
			if owner_id.trim().is_empty() {
				return Err(Error::Validation {
					message: "owner_id filter must be non-empty.".to_string(),
				});
			}

			conditions.push(FieldCondition::Keyword { field: "owner_id", value: owner_id.clone() });
		}
		if let Some(conversation_id) = filter.conversation_id {
			conditions
				.push(FieldCondition::IntPoint { field: "conversation_id", value: conversation_id });
		}
		if let Some(category) = &filter.category {
			conditions.push(FieldCondition::Keyword {
				field: "category",
				value: category.as_str().to_string(),
			});
		}
		if let Some(priority) = filter.priority {
			conditions.push(FieldCondition::Keyword {
				field: "priority",
				value: priority.as_str().to_string(),
			});
		}
		if let Some(status) = filter.status {
			conditions.push(FieldCondition::Keyword {
				field: "status",
				value: status.as_str().to_string(),
			});
		}
		if let Some(tags) = &filter.tags {
			if tags.is_empty() || tags.iter().any(|tag| tag.trim().is_empty()) {
				return Err(Error::Validation {
					message: "tags filter must list at least one non-empty tag.".to_string(),
				});
			}

			conditions.push(FieldCondition::AnyKeyword { field: "tags", values: tags.clone() });
		}

		Ok(Self { conditions })
	}

	/// Payload-side evaluation for index implementations that filter in
	/// process.
	pub fn matches(&self, payload: &Value) -> bool {
		self.conditions.iter().all(|condition| condition.matches(payload))
	}
}

impl FieldCondition {
	fn matches(&self, payload: &Value) -> bool {
		match self {
			Self::Keyword { field, value } =>
				payload.get(field).and_then(Value::as_str) == Some(value.as_str()),
			Self::IntPoint { field, value } => payload
				.get(field)
				.and_then(Value::as_i64)
				.map(|found| found >= *value && found <= *value)
				.unwrap_or(false),
			Self::AnyKeyword { field, values } => payload
				.get(field)
				.and_then(Value::as_array)
				.map(|items| {
					items
						.iter()
						.filter_map(Value::as_str)
						.any(|item| values.iter().any(|value| value == item))
				})
				.unwrap_or(false),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use recall_domain::{Idea, IdeaCategory, Priority, RecordFilter};

	#[test]
	fn empty_filter_compiles_to_match_all() {
		let predicate =
			Predicate::from_filter(&RecordFilter::<Idea>::default()).expect("valid filter");

		assert!(predicate.is_match_all());
		assert!(predicate.matches(&serde_json::json!({ "owner_id": "anyone" })));
	}

	#[test]
	fn present_fields_become_conjoined_conditions() {
		let filter = RecordFilter::<Idea> {
			owner_id: Some("user-1".to_string()),
			conversation_id: Some(42),
			category: Some(IdeaCategory::Business),
			priority: Some(Priority::High),
			tags: Some(vec!["strategy".to_string()]),
			..Default::default()
		};
		let predicate = Predicate::from_filter(&filter).expect("valid filter");

		assert_eq!(predicate.conditions.len(), 5);
		assert!(predicate.conditions.contains(&FieldCondition::IntPoint {
			field: "conversation_id",
			value: 42,
		}));
		assert!(predicate.conditions.contains(&FieldCondition::Keyword {
			field: "category",
			value: "business".to_string(),
		}));
	}

	#[test]
	fn evaluation_requires_every_condition() {
		let filter = RecordFilter::<Idea> {
			owner_id: Some("user-1".to_string()),
			tags: Some(vec!["strategy".to_string(), "growth".to_string()]),
			..Default::default()
		};
		let predicate = Predicate::from_filter(&filter).expect("valid filter");
		let matching = serde_json::json!({
			"owner_id": "user-1",
			"tags": ["growth", "ops"],
		});
		let wrong_owner = serde_json::json!({
			"owner_id": "user-2",
			"tags": ["growth"],
		});
		let no_tag_overlap = serde_json::json!({
			"owner_id": "user-1",
			"tags": ["ops"],
		});

		assert!(predicate.matches(&matching));
		assert!(!predicate.matches(&wrong_owner));
		assert!(!predicate.matches(&no_tag_overlap));
	}

	#[test]
	fn int_point_is_a_single_point_range() {
		let filter =
			RecordFilter::<Idea> { conversation_id: Some(7), ..Default::default() };
		let predicate = Predicate::from_filter(&filter).expect("valid filter");

		assert!(predicate.matches(&serde_json::json!({ "conversation_id": 7 })));
		assert!(!predicate.matches(&serde_json::json!({ "conversation_id": 8 })));
		assert!(!predicate.matches(&serde_json::json!({ "conversation_id": null })));
	}

	#[test]
	fn blank_filter_values_are_rejected() {
		let filter =
			RecordFilter::<Idea> { owner_id: Some("  ".to_string()), ..Default::default() };

		assert!(matches!(
			Predicate::from_filter(&filter),
			Err(Error::Validation { .. })
		));

		let filter = RecordFilter::<Idea> { tags: Some(Vec::new()), ..Default::default() };

		assert!(matches!(
			Predicate::from_filter(&filter),
			Err(Error::Validation { .. })
		));
	}
}
