/// Declares what the backing collection must index: one dense cosine vector
/// of the configured dimension plus the payload fields filters and ordering
/// rely on.
#[derive(Clone, Debug)]
pub struct IndexSchema {
	pub vector_dim: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadFieldKind {
	Keyword,
	Integer,
	Datetime,
}

impl IndexSchema {
	pub fn new(vector_dim: u32) -> Self {
		Self { vector_dim }
	}

	/// `created_at` carries a datetime index so listings can be ordered by
	/// the store instead of in process.
	pub fn payload_fields() -> &'static [(&'static str, PayloadFieldKind)] {
		&[
			("owner_id", PayloadFieldKind::Keyword),
			("category", PayloadFieldKind::Keyword),
			("priority", PayloadFieldKind::Keyword),
			("status", PayloadFieldKind::Keyword),
			("tags", PayloadFieldKind::Keyword),
			("conversation_id", PayloadFieldKind::Integer),
			("created_at", PayloadFieldKind::Datetime),
			("updated_at", PayloadFieldKind::Datetime),
		]
	}
}
