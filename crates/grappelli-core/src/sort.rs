//! Sort order and column visibility state

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Ascending,
	Descending,
}

impl SortOrder {
	/// Returns the opposite direction
	pub fn toggled(self) -> Self {
		match self {
			SortOrder::Ascending => SortOrder::Descending,
			SortOrder::Descending => SortOrder::Ascending,
		}
	}
}

/// Single-column sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
	/// Column id to sort by
	pub column: String,
	/// Sort direction
	pub order: SortOrder,
}

impl SortSpec {
	/// Creates a sort specification
	pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
		Self {
			column: column.into(),
			order,
		}
	}

	/// Wire value: the column id, prefixed with `-` for descending
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_core::sort::{SortOrder, SortSpec};
	///
	/// assert_eq!(SortSpec::new("created_at", SortOrder::Ascending).to_query_value(), "created_at");
	/// assert_eq!(SortSpec::new("created_at", SortOrder::Descending).to_query_value(), "-created_at");
	/// ```
	pub fn to_query_value(&self) -> String {
		match self.order {
			SortOrder::Ascending => self.column.clone(),
			SortOrder::Descending => format!("-{}", self.column),
		}
	}
}

/// Column visibility map, defaulting to all-visible
///
/// Only hidden ids are stored; any id not present is visible. Visibility
/// affects rendering and export eligibility, never fetched data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
	hidden: BTreeSet<String>,
}

impl VisibilitySet {
	/// Creates an all-visible set
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns whether a column is visible
	pub fn is_visible(&self, column_id: &str) -> bool {
		!self.hidden.contains(column_id)
	}

	/// Hides a column
	pub fn hide(&mut self, column_id: impl Into<String>) {
		self.hidden.insert(column_id.into());
	}

	/// Shows a column
	pub fn show(&mut self, column_id: &str) {
		self.hidden.remove(column_id);
	}

	/// Toggles a column; returns its new visibility
	pub fn toggle(&mut self, column_id: &str) -> bool {
		if self.hidden.remove(column_id) {
			true
		} else {
			self.hidden.insert(column_id.to_string());
			false
		}
	}
}
