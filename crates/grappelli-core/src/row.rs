//! Row identity resolution
//!
//! Remote rows do not always carry a stable identifier. The grid resolves
//! an explicit, typed key for each row instead of silently guessing at
//! render time: the `id` field when present, the `uuid` field as a
//! fallback, and finally the row's position in the delivered page. Keys
//! exist purely so hosts can key rendered rows; they are never sent back
//! to the server as authoritative identity.

use serde_json::Value;

/// Render key for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
	/// Taken from the row's `id` field
	Id(String),
	/// Taken from the row's `uuid` field
	Uuid(String),
	/// Synthesized from the row's position on the current page
	Index(usize),
}

impl RowKey {
	/// Resolves the key for a serialized row
	pub fn resolve(row: &Value, index: usize) -> Self {
		if let Some(id) = scalar_string(row.get("id")) {
			return RowKey::Id(id);
		}
		if let Some(uuid) = scalar_string(row.get("uuid")) {
			return RowKey::Uuid(uuid);
		}
		RowKey::Index(index)
	}

	/// Returns true when the key was synthesized rather than read from the row
	pub fn is_synthetic(&self) -> bool {
		matches!(self, RowKey::Index(_))
	}
}

impl std::fmt::Display for RowKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RowKey::Id(id) => write!(f, "{}", id),
			RowKey::Uuid(uuid) => write!(f, "{}", uuid),
			RowKey::Index(index) => write!(f, "#{}", index),
		}
	}
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}
