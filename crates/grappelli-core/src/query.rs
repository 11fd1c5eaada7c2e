//! Endpoint references and query composition
//!
//! An endpoint reference like `/api/orders?status=active` is split once
//! into a path and a baseline query. Every fetch then merges baseline,
//! active filters, sort and pagination into a single request descriptor.
//! Key ordering of the serialized query string is not part of the
//! contract; composing the same inputs twice always yields the same
//! key→value set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::filter::FilterState;
use crate::pagination::PaginationState;
use crate::sort::SortSpec;

/// Wire parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";

/// Wire parameter carrying the rows-per-page request
pub const PER_PAGE_PARAM: &str = "per_page";

/// Wire parameter carrying the sort specification
pub const SORT_PARAM: &str = "sort";

/// A parsed endpoint reference: base path plus baseline query parameters
///
/// # Examples
///
/// ```
/// use grappelli_core::query::Endpoint;
///
/// let endpoint = Endpoint::parse("/api/orders?status=active");
/// assert_eq!(endpoint.path(), "/api/orders");
/// assert_eq!(endpoint.base_query(), &[("status".to_string(), "active".to_string())]);
///
/// let bare = Endpoint::parse("/api/brands");
/// assert!(bare.base_query().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
	path: String,
	base_query: Vec<(String, String)>,
}

impl Endpoint {
	/// Splits a reference into path and baseline query
	pub fn parse(reference: impl AsRef<str>) -> Self {
		let reference = reference.as_ref();
		match reference.split_once('?') {
			Some((path, query)) => Self {
				path: path.to_string(),
				base_query: form_urlencoded::parse(query.as_bytes())
					.map(|(k, v)| (k.into_owned(), v.into_owned()))
					.collect(),
			},
			None => Self {
				path: reference.to_string(),
				base_query: Vec::new(),
			},
		}
	}

	/// Returns the base path
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the baseline query pairs
	pub fn base_query(&self) -> &[(String, String)] {
		&self.base_query
	}
}

/// A fully composed list request: path plus merged query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
	/// Request path
	pub path: String,
	/// Merged query parameters
	pub params: BTreeMap<String, String>,
}

impl ListRequest {
	/// Returns the value of a query parameter
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}

	/// Serializes the parameters as a percent-encoded query string
	pub fn query_string(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.params.iter())
			.finish()
	}

	/// Returns `path?query`, or just the path when no parameters exist
	pub fn url(&self) -> String {
		if self.params.is_empty() {
			self.path.clone()
		} else {
			format!("{}?{}", self.path, self.query_string())
		}
	}
}

/// Composes a list request from the grid's current state
///
/// Merge order, later entries winning on key conflicts:
/// 1. the endpoint's baseline query;
/// 2. active filter entries (committed search included);
/// 3. the sort parameter, when a sort is set;
/// 4. `page` (1-based) and `per_page`, which always take precedence over
///    caller-supplied values of the same name.
pub fn compose(
	endpoint: &Endpoint,
	filters: &FilterState,
	pagination: &PaginationState,
	sort: Option<&SortSpec>,
) -> ListRequest {
	let mut params: BTreeMap<String, String> = endpoint
		.base_query
		.iter()
		.map(|(k, v)| (k.clone(), v.clone()))
		.collect();
	for (param, value) in filters.active_entries() {
		params.insert(param.to_string(), value.to_string());
	}
	if let Some(sort) = sort {
		params.insert(SORT_PARAM.to_string(), sort.to_query_value());
	}
	params.insert(PAGE_PARAM.to_string(), pagination.page_number().to_string());
	params.insert(PER_PAGE_PARAM.to_string(), pagination.page_size.to_string());
	ListRequest {
		path: endpoint.path.clone(),
		params,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter::FILTER_ALL;
	use crate::sort::SortOrder;

	#[test]
	fn test_parse_keeps_first_equals_split() {
		let endpoint = Endpoint::parse("/api/orders?note=a=b");
		assert_eq!(endpoint.base_query(), &[("note".to_string(), "a=b".to_string())]);
	}

	#[test]
	fn test_parse_bare_key() {
		let endpoint = Endpoint::parse("/api/orders?archived");
		assert_eq!(
			endpoint.base_query(),
			&[("archived".to_string(), String::new())]
		);
	}

	#[test]
	fn test_compose_merges_in_order() {
		let endpoint = Endpoint::parse("/api/orders?status=any");
		let mut filters = FilterState::new();
		filters.set("status", "active");
		filters.set("market", FILTER_ALL);
		let pagination = PaginationState::new(25);
		let request = compose(&endpoint, &filters, &pagination, None);

		// Filter beats baseline; sentinel value is excluded entirely.
		assert_eq!(request.param("status"), Some("active"));
		assert_eq!(request.param("market"), None);
		assert_eq!(request.param("page"), Some("1"));
		assert_eq!(request.param("per_page"), Some("25"));
	}

	#[test]
	fn test_pagination_beats_caller_params() {
		let endpoint = Endpoint::parse("/api/orders?page=9&per_page=500");
		let pagination = PaginationState::new(10);
		let request = compose(&endpoint, &FilterState::new(), &pagination, None);
		assert_eq!(request.param("page"), Some("1"));
		assert_eq!(request.param("per_page"), Some("10"));
	}

	#[test]
	fn test_sort_parameter() {
		let endpoint = Endpoint::parse("/api/orders");
		let sort = SortSpec::new("created_at", SortOrder::Descending);
		let request = compose(
			&endpoint,
			&FilterState::new(),
			&PaginationState::new(10),
			Some(&sort),
		);
		assert_eq!(request.param("sort"), Some("-created_at"));
	}

	#[test]
	fn test_query_string_percent_encodes() {
		let endpoint = Endpoint::parse("/api/orders");
		let mut filters = FilterState::new();
		filters.set("search", "a b&c");
		let request = compose(&endpoint, &filters, &PaginationState::new(10), None);
		assert!(request.query_string().contains("search=a+b%26c"));
	}

	#[test]
	fn test_url_without_params() {
		let request = ListRequest {
			path: "/api/orders".to_string(),
			params: BTreeMap::new(),
		};
		assert_eq!(request.url(), "/api/orders");
	}
}
