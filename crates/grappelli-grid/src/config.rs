//! Grid configuration
//!
//! The only inputs a host page supplies: the column list, optional filter
//! declarations, either a static row array or a remote endpoint reference,
//! optional search key/placeholder, an optional initial page size, and the
//! export base filename. Everything else is internal grid state.

use std::time::Duration;

use grappelli_core::column::Column;
use grappelli_core::filter::FilterDescriptor;
use grappelli_core::pagination::DEFAULT_PAGE_SIZE;
use grappelli_core::query::Endpoint;

/// Quiet period between the last search keystroke and the committed fetch
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Declarative description of one grid
pub struct GridConfig<T> {
	pub(crate) columns: Vec<Column<T>>,
	pub(crate) filters: Vec<FilterDescriptor>,
	pub(crate) endpoint: Option<Endpoint>,
	pub(crate) rows: Vec<T>,
	pub(crate) search_key: Option<String>,
	pub(crate) search_placeholder: Option<String>,
	pub(crate) page_size: usize,
	pub(crate) export_base: String,
	pub(crate) debounce: Duration,
}

impl<T> GridConfig<T> {
	/// Creates a configuration with the given export base filename
	pub fn new(export_base: impl Into<String>) -> Self {
		Self {
			columns: Vec::new(),
			filters: Vec::new(),
			endpoint: None,
			rows: Vec::new(),
			search_key: None,
			search_placeholder: None,
			page_size: DEFAULT_PAGE_SIZE,
			export_base: export_base.into(),
			debounce: DEFAULT_SEARCH_DEBOUNCE,
		}
	}

	/// Sets the column list
	pub fn columns(mut self, columns: Vec<Column<T>>) -> Self {
		self.columns = columns;
		self
	}

	/// Appends one column
	pub fn column(mut self, column: Column<T>) -> Self {
		self.columns.push(column);
		self
	}

	/// Sets the declared filter list
	pub fn filters(mut self, filters: Vec<FilterDescriptor>) -> Self {
		self.filters = filters;
		self
	}

	/// Appends one filter declaration
	pub fn filter(mut self, filter: FilterDescriptor) -> Self {
		self.filters.push(filter);
		self
	}

	/// Binds the grid to a remote endpoint reference
	///
	/// A literal `?key=value` suffix on the reference becomes the baseline
	/// query of every composed fetch.
	pub fn endpoint(mut self, reference: impl AsRef<str>) -> Self {
		self.endpoint = Some(Endpoint::parse(reference));
		self
	}

	/// Supplies a static in-memory row array instead of an endpoint
	pub fn rows(mut self, rows: Vec<T>) -> Self {
		self.rows = rows;
		self
	}

	/// Designates the column searched by free-text input
	pub fn search_key(mut self, column_id: impl Into<String>) -> Self {
		self.search_key = Some(column_id.into());
		self
	}

	/// Sets the search input placeholder forwarded to the host
	pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.search_placeholder = Some(placeholder.into());
		self
	}

	/// Overrides the initial page size
	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	/// Overrides the search debounce interval
	pub fn debounce(mut self, debounce: Duration) -> Self {
		self.debounce = debounce;
		self
	}
}
