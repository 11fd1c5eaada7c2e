//! Filter declarations and filter value state
//!
//! Filters are declared as a tagged sum type so that adding a new filter
//! kind is a compile-time-checked change. The two implicit date-range
//! filters are prepended by an explicit composition step
//! ([`effective_filters`]) instead of being special-cased at render time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel select value meaning "filter inactive"
pub const FILTER_ALL: &str = "all";

/// Query parameter carrying the committed search text
pub const SEARCH_PARAM: &str = "search";

/// Query parameter of the implicit range-start date filter
pub const START_DATE_PARAM: &str = "start_date";

/// Query parameter of the implicit range-end date filter
pub const END_DATE_PARAM: &str = "end_date";

/// One option of a select filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChoice {
	/// Display text
	pub label: String,
	/// Query parameter value
	pub value: String,
}

impl FilterChoice {
	/// Creates a choice
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// A declared filter control
///
/// Every variant that binds a query parameter carries `label` and `param`.
/// [`FilterDescriptor::Custom`] names a host-side render slot instead and
/// contributes no parameter of its own; [`FilterDescriptor::DisableDefaultDateRange`]
/// carries nothing and suppresses the two implicit date filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterDescriptor {
	/// A date picker bound to `param`
	Date { label: String, param: String },
	/// A select bound to `param`, offering `choices`
	Select {
		label: String,
		param: String,
		choices: Vec<FilterChoice>,
	},
	/// A free-text input bound to `param`
	Text { label: String, param: String },
	/// A host-rendered control occupying the named slot
	Custom { slot: String },
	/// Sentinel: suppress the implicit start/end date filters
	DisableDefaultDateRange,
}

impl FilterDescriptor {
	/// Returns the bound query parameter, if this variant binds one
	pub fn param(&self) -> Option<&str> {
		match self {
			FilterDescriptor::Date { param, .. }
			| FilterDescriptor::Select { param, .. }
			| FilterDescriptor::Text { param, .. } => Some(param),
			FilterDescriptor::Custom { .. } | FilterDescriptor::DisableDefaultDateRange => None,
		}
	}

	/// Returns the display label, if this variant carries one
	pub fn label(&self) -> Option<&str> {
		match self {
			FilterDescriptor::Date { label, .. }
			| FilterDescriptor::Select { label, .. }
			| FilterDescriptor::Text { label, .. } => Some(label),
			FilterDescriptor::Custom { .. } | FilterDescriptor::DisableDefaultDateRange => None,
		}
	}

	fn is_suppressor(&self) -> bool {
		matches!(self, FilterDescriptor::DisableDefaultDateRange)
	}
}

/// Composes the effective filter list for a grid
///
/// The implicit start/end date filters are prepended to the declared list,
/// unless the suppression sentinel is present. The sentinel itself never
/// appears in the output.
///
/// # Examples
///
/// ```
/// use grappelli_core::filter::{FilterDescriptor, effective_filters};
///
/// let declared = vec![FilterDescriptor::Text {
///     label: "Name".into(),
///     param: "name".into(),
/// }];
/// let effective = effective_filters(&declared);
/// // start_date, end_date, name
/// assert_eq!(effective.len(), 3);
///
/// let suppressed = effective_filters(&[FilterDescriptor::DisableDefaultDateRange]);
/// assert!(suppressed.is_empty());
/// ```
pub fn effective_filters(declared: &[FilterDescriptor]) -> Vec<FilterDescriptor> {
	let suppressed = declared.iter().any(FilterDescriptor::is_suppressor);
	let mut effective = Vec::new();
	if !suppressed {
		effective.push(FilterDescriptor::Date {
			label: "Start date".to_string(),
			param: START_DATE_PARAM.to_string(),
		});
		effective.push(FilterDescriptor::Date {
			label: "End date".to_string(),
			param: END_DATE_PARAM.to_string(),
		});
	}
	effective.extend(declared.iter().filter(|d| !d.is_suppressor()).cloned());
	effective
}

/// Current value of each active filter parameter
///
/// Values equal to the empty string or the `"all"` sentinel are stored but
/// excluded from query composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
	values: BTreeMap<String, String>,
}

impl FilterState {
	/// Creates an empty filter state
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the raw value of a parameter
	pub fn get(&self, param: &str) -> Option<&str> {
		self.values.get(param).map(String::as_str)
	}

	/// Sets the value of a parameter
	pub fn set(&mut self, param: impl Into<String>, value: impl Into<String>) {
		self.values.insert(param.into(), value.into());
	}

	/// Removes a parameter entirely
	pub fn remove(&mut self, param: &str) {
		self.values.remove(param);
	}

	/// Clears all filter values
	pub fn reset(&mut self) {
		self.values.clear();
	}

	/// Returns true when no values are stored
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates the entries that participate in query composition
	pub fn active_entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values
			.iter()
			.filter(|(_, value)| is_active_value(value))
			.map(|(param, value)| (param.as_str(), value.as_str()))
	}
}

/// Returns whether a filter value participates in query composition
pub fn is_active_value(value: &str) -> bool {
	!value.is_empty() && value != FILTER_ALL
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_prepended() {
		let declared = vec![FilterDescriptor::Select {
			label: "Status".to_string(),
			param: "status".to_string(),
			choices: vec![FilterChoice::new("All", FILTER_ALL)],
		}];
		let effective = effective_filters(&declared);
		assert_eq!(effective.len(), 3);
		assert_eq!(effective[0].param(), Some(START_DATE_PARAM));
		assert_eq!(effective[1].param(), Some(END_DATE_PARAM));
		assert_eq!(effective[2].param(), Some("status"));
	}

	#[test]
	fn test_sentinel_suppresses_defaults() {
		let declared = vec![
			FilterDescriptor::DisableDefaultDateRange,
			FilterDescriptor::Text {
				label: "Name".to_string(),
				param: "name".to_string(),
			},
		];
		let effective = effective_filters(&declared);
		assert_eq!(effective.len(), 1);
		assert_eq!(effective[0].param(), Some("name"));
	}

	#[test]
	fn test_custom_binds_no_param() {
		let custom = FilterDescriptor::Custom {
			slot: "warehouse-picker".to_string(),
		};
		assert_eq!(custom.param(), None);
		assert_eq!(custom.label(), None);
	}

	#[test]
	fn test_active_entries_skip_empty_and_all() {
		let mut state = FilterState::new();
		state.set("status", "active");
		state.set("market", FILTER_ALL);
		state.set("brand", "");
		let active: Vec<_> = state.active_entries().collect();
		assert_eq!(active, vec![("status", "active")]);
	}

	#[test]
	fn test_reset_clears_everything() {
		let mut state = FilterState::new();
		state.set("status", "active");
		state.reset();
		assert!(state.is_empty());
	}
}
