//! Tolerant decoding of remote list envelopes
//!
//! The grid only requires *some* reconcilable equivalent of
//! `{total, current_page, last_page}` plus a row collection; exact field
//! names are the remote collaborator's choice. The decoder accepts a bare
//! JSON array, rows under any of the common collection keys, and metadata
//! either flat on the envelope or nested under `meta`/`pagination`, with
//! the usual aliases per field. Anything missing degrades to `None` and is
//! reconciled downstream; decoding itself never fails on shape.

use grappelli_core::pagination::PageMeta;
use serde_json::Value;

const ROW_KEYS: [&str; 4] = ["data", "results", "rows", "items"];
const META_KEYS: [&str; 2] = ["meta", "pagination"];
const TOTAL_KEYS: [&str; 2] = ["total", "count"];
const CURRENT_PAGE_KEYS: [&str; 2] = ["current_page", "page"];
const LAST_PAGE_KEYS: [&str; 2] = ["last_page", "total_pages"];

/// A decoded list response: opaque rows plus optional pagination metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEnvelope {
	/// Rows as delivered, still serialized
	pub rows: Vec<Value>,
	/// Pagination metadata, when the response carried any
	pub meta: Option<PageMeta>,
}

impl ListEnvelope {
	/// Decodes a response body
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_client::envelope::ListEnvelope;
	/// use serde_json::json;
	///
	/// let envelope = ListEnvelope::from_value(json!({
	///     "data": [{"id": 1}],
	///     "total": 25,
	///     "current_page": 1,
	///     "last_page": 3,
	/// }));
	/// assert_eq!(envelope.rows.len(), 1);
	/// assert_eq!(envelope.meta.unwrap().total, Some(25));
	/// ```
	pub fn from_value(body: Value) -> Self {
		match body {
			Value::Array(rows) => Self { rows, meta: None },
			Value::Object(object) => {
				let rows = ROW_KEYS
					.iter()
					.find_map(|key| match object.get(*key) {
						Some(Value::Array(rows)) => Some(rows.clone()),
						_ => None,
					})
					.unwrap_or_default();
				let meta = decode_meta(&object);
				Self { rows, meta }
			}
			_ => Self::default(),
		}
	}
}

fn decode_meta(envelope: &serde_json::Map<String, Value>) -> Option<PageMeta> {
	// Flat metadata wins; a nested meta/pagination object is the fallback.
	let flat = meta_from(envelope);
	if flat.is_some() {
		return flat;
	}
	META_KEYS.iter().find_map(|key| match envelope.get(*key) {
		Some(Value::Object(nested)) => meta_from(nested),
		_ => None,
	})
}

fn meta_from(object: &serde_json::Map<String, Value>) -> Option<PageMeta> {
	let meta = PageMeta {
		total: first_u64(object, &TOTAL_KEYS),
		current_page: first_u64(object, &CURRENT_PAGE_KEYS),
		last_page: first_u64(object, &LAST_PAGE_KEYS),
	};
	if meta == PageMeta::default() { None } else { Some(meta) }
}

fn first_u64(object: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<u64> {
	keys.iter().find_map(|key| as_u64(object.get(*key)?))
}

// Servers disagree on numeric typing; accept numbers and numeric strings.
fn as_u64(value: &Value) -> Option<u64> {
	match value {
		Value::Number(n) => n.as_u64(),
		Value::String(s) => s.parse().ok(),
		_ => None,
	}
}
