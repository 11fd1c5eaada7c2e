//! The server-synchronized grid state machine
//!
//! One [`DataGrid`] owns all state for one mounted grid: filter values,
//! pagination, sort, visibility, the delivered rows, and the loading flag.
//! Overlapping fetches are tamed by a monotone request generation: a
//! response is applied only while its generation is still the latest
//! issued, so settlement order can never push stale rows over fresh ones.
//!
//! State-changing methods run as short synchronous critical sections plus
//! spawned background fetches: callers hold an `Arc<DataGrid>` and the grid
//! notifies observers through a watch channel whenever visible state
//! changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use grappelli_client::source::DataSource;
use grappelli_core::column::Column;
use grappelli_core::error::{GridError, GridResult};
use grappelli_core::filter::{FilterDescriptor, FilterState, SEARCH_PARAM, effective_filters};
use grappelli_core::pagination::{PAGE_SIZE_OPTIONS, PaginationState};
use grappelli_core::query::{Endpoint, compose};
use grappelli_core::row::RowKey;
use grappelli_core::sort::{SortOrder, SortSpec, VisibilitySet};
use grappelli_export::{ExportError, ExportFormat, ExportOutput, ExportScope};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::config::GridConfig;
use crate::events::{GridEvents, NullEvents};

/// Everything behind the grid's single mutex
struct Shared<T> {
	endpoint: Option<Endpoint>,
	filter_state: FilterState,
	pagination: PaginationState,
	sort: Option<SortSpec>,
	visibility: VisibilitySet,
	/// Remote mode: the delivered page. Local mode: the full filtered set.
	rows: Vec<T>,
	row_keys: Vec<RowKey>,
	search_input: String,
	loading: bool,
}

/// A point-in-time view of the grid for rendering
#[derive(Debug, Clone)]
pub struct GridSnapshot<T> {
	/// Rows of the current page, in display order
	pub rows: Vec<T>,
	/// Render keys matching `rows` one to one
	pub row_keys: Vec<RowKey>,
	/// Pagination state as of the last reconciliation
	pub pagination: PaginationState,
	/// Whether a fetch is outstanding
	pub loading: bool,
	/// Raw (possibly uncommitted) search input
	pub search_input: String,
	/// Active sort, if any
	pub sort: Option<SortSpec>,
	/// Current filter values
	pub filters: FilterState,
	/// Ids of currently visible columns, in declaration order
	pub visible_columns: Vec<String>,
}

/// A live, server-synchronized data grid
///
/// Hosts construct one grid per list page, call [`DataGrid::reload`] on
/// mount, and re-render from [`DataGrid::snapshot`] whenever the watch
/// channel reports a new version.
pub struct DataGrid<T> {
	columns: Vec<Column<T>>,
	filters: Vec<FilterDescriptor>,
	search_key: Option<String>,
	search_placeholder: Option<String>,
	export_base: String,
	debounce: std::time::Duration,
	default_page_size: usize,
	source: Option<Arc<dyn DataSource>>,
	events: Arc<dyn GridEvents>,
	static_rows: Vec<T>,
	shared: Mutex<Shared<T>>,
	fetch_generation: AtomicU64,
	search_epoch: AtomicU64,
	refresh_count: AtomicU64,
	version_tx: watch::Sender<u64>,
}

impl<T> DataGrid<T>
where
	T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
{
	/// Builds a grid that drops all events
	pub fn new(config: GridConfig<T>, source: Option<Arc<dyn DataSource>>) -> GridResult<Arc<Self>> {
		Self::with_events(config, source, Arc::new(NullEvents))
	}

	/// Builds a grid forwarding failures to the given sink
	pub fn with_events(
		config: GridConfig<T>,
		source: Option<Arc<dyn DataSource>>,
		events: Arc<dyn GridEvents>,
	) -> GridResult<Arc<Self>> {
		if let Some(endpoint) = &config.endpoint {
			if source.is_none() {
				return Err(GridError::MissingSource(endpoint.path().to_string()));
			}
		}
		if let Some(key) = &config.search_key {
			if !config.columns.iter().any(|column| column.id() == key) {
				return Err(GridError::UnknownColumn(key.clone()));
			}
		}
		if config.page_size == 0 {
			return Err(GridError::InvalidPageSize(config.page_size));
		}

		let (version_tx, _) = watch::channel(0);
		let grid = Arc::new(Self {
			filters: effective_filters(&config.filters),
			search_key: config.search_key,
			search_placeholder: config.search_placeholder,
			export_base: config.export_base,
			debounce: config.debounce,
			default_page_size: config.page_size,
			source,
			events,
			shared: Mutex::new(Shared {
				endpoint: config.endpoint,
				filter_state: FilterState::new(),
				pagination: PaginationState::new(config.page_size),
				sort: None,
				visibility: VisibilitySet::new(),
				rows: Vec::new(),
				row_keys: Vec::new(),
				search_input: String::new(),
				loading: false,
			}),
			static_rows: config.rows,
			columns: config.columns,
			fetch_generation: AtomicU64::new(0),
			search_epoch: AtomicU64::new(0),
			refresh_count: AtomicU64::new(0),
			version_tx,
		});

		if grid.is_local() {
			let mut shared = grid.shared.lock();
			grid.refresh_local(&mut shared);
		}
		Ok(grid)
	}

	/// Returns whether this grid runs purely on its static row array
	pub fn is_local(&self) -> bool {
		self.shared.lock().endpoint.is_none()
	}

	/// Returns the declared columns
	pub fn columns(&self) -> &[Column<T>] {
		&self.columns
	}

	/// Returns the effective filter declarations (defaults included)
	pub fn filter_descriptors(&self) -> &[FilterDescriptor] {
		&self.filters
	}

	/// Returns the search placeholder forwarded to the host, if any
	pub fn search_placeholder(&self) -> Option<&str> {
		self.search_placeholder.as_deref()
	}

	/// Returns the fixed page size option set
	pub fn page_size_options(&self) -> &'static [usize] {
		&PAGE_SIZE_OPTIONS
	}

	/// Returns how many manual refreshes were requested
	pub fn refresh_count(&self) -> u64 {
		self.refresh_count.load(Ordering::SeqCst)
	}

	/// Subscribes to state-version notifications
	pub fn subscribe(&self) -> watch::Receiver<u64> {
		self.version_tx.subscribe()
	}

	fn bump_version(&self) {
		self.version_tx.send_modify(|version| *version += 1);
	}

	/// Captures a point-in-time view for rendering
	pub fn snapshot(&self) -> GridSnapshot<T> {
		let shared = self.shared.lock();
		let (rows, row_keys) = if shared.endpoint.is_none() {
			// Local mode keeps the full filtered set; slice out the page.
			let start = shared.pagination.page_index * shared.pagination.page_size;
			let end = (start + shared.pagination.page_size).min(shared.rows.len());
			let start = start.min(end);
			(
				shared.rows[start..end].to_vec(),
				shared.row_keys[start..end].to_vec(),
			)
		} else {
			(shared.rows.clone(), shared.row_keys.clone())
		};
		GridSnapshot {
			rows,
			row_keys,
			pagination: shared.pagination.clone(),
			loading: shared.loading,
			search_input: shared.search_input.clone(),
			sort: shared.sort.clone(),
			filters: shared.filter_state.clone(),
			visible_columns: self
				.columns
				.iter()
				.filter(|column| shared.visibility.is_visible(column.id()))
				.map(|column| column.id().to_string())
				.collect(),
		}
	}

	/// Spawns a background fetch of the current composed state
	pub fn reload(self: &Arc<Self>) {
		let grid = Arc::clone(self);
		tokio::spawn(async move {
			grid.load().await;
		});
	}

	/// Manual refresh: the only recovery path after a failed fetch
	pub fn refresh(self: &Arc<Self>) {
		self.refresh_count.fetch_add(1, Ordering::SeqCst);
		self.reload();
	}

	/// Fetches rows for the current composed state and reconciles
	///
	/// The captured generation decides whether the settled response may
	/// touch state: responses are applied in generation order, not
	/// arrival order. In local mode this is a no-op.
	pub async fn load(self: &Arc<Self>) {
		let Some(source) = self.source.clone() else {
			return;
		};
		// Generation capture and composition share one critical section so
		// generation order always matches composition order.
		let (generation, request) = {
			let mut shared = self.shared.lock();
			let Some(endpoint) = shared.endpoint.clone() else {
				return;
			};
			let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
			let request = compose(
				&endpoint,
				&shared.filter_state,
				&shared.pagination,
				shared.sort.as_ref(),
			);
			shared.loading = true;
			(generation, request)
		};
		self.bump_version();
		tracing::debug!(generation, url = %request.url(), "issuing grid fetch");

		let result = source.fetch(&request).await;

		let error_message = {
			let mut shared = self.shared.lock();
			if self.fetch_generation.load(Ordering::SeqCst) != generation {
				// A newer request owns the loading flag and the rows now.
				tracing::debug!(generation, "discarding superseded response");
				return;
			}
			let mut error_message = None;
			match result {
				Ok(envelope) => {
					let mut rows = Vec::with_capacity(envelope.rows.len());
					let mut row_keys = Vec::with_capacity(envelope.rows.len());
					for (index, value) in envelope.rows.iter().enumerate() {
						match serde_json::from_value::<T>(value.clone()) {
							Ok(row) => {
								row_keys.push(RowKey::resolve(value, index));
								rows.push(row);
							}
							Err(err) => {
								tracing::warn!(%err, index, "dropping undecodable row")
							}
						}
					}
					let delivered = rows.len();
					shared.rows = rows;
					shared.row_keys = row_keys;
					shared
						.pagination
						.reconcile(&envelope.meta.unwrap_or_default(), delivered);
				}
				Err(err) => {
					tracing::warn!(%err, generation, "grid fetch failed");
					shared.rows.clear();
					shared.row_keys.clear();
					shared.pagination.reset_after_failure();
					error_message = Some(format!("Failed to load data: {}", err));
				}
			}
			shared.loading = false;
			error_message
		};
		if let Some(message) = error_message {
			self.events.on_error(&message);
		}
		self.bump_version();
	}

	/// Sets a filter value and refetches
	///
	/// Changing a filter invalidates the current page's meaning, so the
	/// page index always resets to 0 first.
	pub fn set_filter(self: &Arc<Self>, param: impl Into<String>, value: impl Into<String>) {
		let remote = {
			let mut shared = self.shared.lock();
			shared.filter_state.set(param, value);
			shared.pagination.page_index = 0;
			shared.endpoint.is_some()
		};
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
	}

	/// Removes a filter value and refetches
	pub fn clear_filter(self: &Arc<Self>, param: &str) {
		let remote = {
			let mut shared = self.shared.lock();
			shared.filter_state.remove(param);
			shared.pagination.page_index = 0;
			shared.endpoint.is_some()
		};
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
	}

	/// Rebinds the grid to a different endpoint reference
	///
	/// Filters, search and pagination reset so nothing leaks from the
	/// previous list into an unrelated one.
	pub fn rebind(self: &Arc<Self>, reference: impl AsRef<str>) -> GridResult<()> {
		let endpoint = Endpoint::parse(reference);
		if self.source.is_none() {
			return Err(GridError::MissingSource(endpoint.path().to_string()));
		}
		{
			let mut shared = self.shared.lock();
			shared.endpoint = Some(endpoint);
			shared.filter_state.reset();
			shared.pagination = PaginationState::new(self.default_page_size);
			shared.search_input.clear();
			shared.rows.clear();
			shared.row_keys.clear();
		}
		self.reload();
		Ok(())
	}

	/// Accepts a search keystroke
	///
	/// The raw value is visible immediately; the commit into the `search`
	/// filter happens only after the quiet interval with no further
	/// keystrokes. Each keystroke restarts the pending commit. Local mode
	/// filters synchronously instead and never debounces.
	pub fn set_search_input(self: &Arc<Self>, value: impl Into<String>) {
		let value = value.into();
		let local = {
			let mut shared = self.shared.lock();
			shared.search_input = value.clone();
			if shared.endpoint.is_none() {
				shared.pagination.page_index = 0;
				self.refresh_local(&mut shared);
				true
			} else {
				false
			}
		};
		self.bump_version();
		if local {
			return;
		}

		let epoch = self.search_epoch.fetch_add(1, Ordering::SeqCst) + 1;
		let grid = Arc::clone(self);
		tokio::spawn(async move {
			tokio::time::sleep(grid.debounce).await;
			if grid.search_epoch.load(Ordering::SeqCst) != epoch {
				// Superseded by a later keystroke.
				return;
			}
			grid.commit_search(value).await;
		});
	}

	async fn commit_search(self: &Arc<Self>, value: String) {
		let changed = {
			let mut shared = self.shared.lock();
			let trimmed = value.trim();
			let current = shared.filter_state.get(SEARCH_PARAM).unwrap_or("");
			if current == trimmed {
				false
			} else {
				if trimmed.is_empty() {
					shared.filter_state.remove(SEARCH_PARAM);
				} else {
					shared.filter_state.set(SEARCH_PARAM, trimmed);
				}
				shared.pagination.page_index = 0;
				true
			}
		};
		if changed {
			self.load().await;
		}
	}

	/// Requests a page change; out-of-range and already-current are no-ops
	pub fn request_page(self: &Arc<Self>, page: i64) {
		let (changed, remote) = {
			let mut shared = self.shared.lock();
			(
				shared.pagination.request_page(page),
				shared.endpoint.is_some(),
			)
		};
		if !changed {
			return;
		}
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
	}

	/// Sets the page size and returns to the first page
	pub fn request_page_size(self: &Arc<Self>, page_size: usize) -> GridResult<()> {
		let remote = {
			let mut shared = self.shared.lock();
			shared.pagination.request_page_size(page_size)?;
			if shared.endpoint.is_none() {
				self.refresh_local(&mut shared);
			}
			shared.endpoint.is_some()
		};
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
		Ok(())
	}

	/// Sorts by a column
	pub fn set_sort(self: &Arc<Self>, column_id: &str, order: SortOrder) -> GridResult<()> {
		let column = self
			.columns
			.iter()
			.find(|column| column.id() == column_id)
			.ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
		if !column.is_sortable() {
			return Err(GridError::NotSortable(column_id.to_string()));
		}
		let remote = {
			let mut shared = self.shared.lock();
			shared.sort = Some(SortSpec::new(column_id, order));
			if shared.endpoint.is_none() {
				self.refresh_local(&mut shared);
			}
			shared.endpoint.is_some()
		};
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
		Ok(())
	}

	/// Clears the active sort
	pub fn clear_sort(self: &Arc<Self>) {
		let remote = {
			let mut shared = self.shared.lock();
			shared.sort = None;
			if shared.endpoint.is_none() {
				self.refresh_local(&mut shared);
			}
			shared.endpoint.is_some()
		};
		if remote {
			self.reload();
		} else {
			self.bump_version();
		}
	}

	/// Toggles a column's visibility; returns its new visibility
	///
	/// Never triggers a fetch: visibility affects rendering and export
	/// eligibility only.
	pub fn toggle_column(&self, column_id: &str) -> GridResult<bool> {
		let column = self
			.columns
			.iter()
			.find(|column| column.id() == column_id)
			.ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
		if !column.is_hideable() {
			return Err(GridError::NotHideable(column_id.to_string()));
		}
		let visible = self.shared.lock().visibility.toggle(column_id);
		self.bump_version();
		Ok(visible)
	}

	/// Exports the rows currently loaded on this page; no network involved
	pub fn export_current_page(&self, format: ExportFormat) -> Result<ExportOutput, ExportError> {
		let (rows, visibility) = {
			let shared = self.shared.lock();
			let rows = if shared.endpoint.is_none() {
				let start = shared.pagination.page_index * shared.pagination.page_size;
				let end = (start + shared.pagination.page_size).min(shared.rows.len());
				shared.rows[start.min(end)..end].to_vec()
			} else {
				shared.rows.clone()
			};
			(rows, shared.visibility.clone())
		};
		let result = grappelli_export::export_rows(
			&self.columns,
			&visibility,
			&rows,
			&self.export_base,
			format,
			ExportScope::CurrentPage,
		);
		if let Err(err) = &result {
			self.events.on_export_error(&err.to_string());
		}
		result
	}

	/// Exports the entire filtered result set
	///
	/// Remote mode performs one bulk fetch outside the grid's request
	/// generations; its failure is surfaced on the export error channel
	/// and leaves rows, pagination and the loading flag untouched. Local
	/// mode exports the full filtered set without any fetch.
	pub async fn export_all(&self, format: ExportFormat) -> Result<ExportOutput, ExportError> {
		let (endpoint, filter_state, sort, visibility, local_rows) = {
			let shared = self.shared.lock();
			(
				shared.endpoint.clone(),
				shared.filter_state.clone(),
				shared.sort.clone(),
				shared.visibility.clone(),
				shared.rows.clone(),
			)
		};
		let result = match (&self.source, endpoint) {
			(Some(source), Some(endpoint)) => {
				grappelli_export::export_all(
					&self.columns,
					&visibility,
					source.as_ref(),
					&endpoint,
					&filter_state,
					sort.as_ref(),
					&self.export_base,
					format,
				)
				.await
			}
			_ => grappelli_export::export_rows(
				&self.columns,
				&visibility,
				&local_rows,
				&self.export_base,
				format,
				ExportScope::All,
			),
		};
		if let Err(err) = &result {
			self.events.on_export_error(&err.to_string());
		}
		result
	}

	/// Recomputes the local filtered/sorted row set
	///
	/// Local mode only: applies the raw search input as a case-insensitive
	/// substring match against the designated search column, applies the
	/// active sort, and recomputes pagination totals over the result.
	fn refresh_local(&self, shared: &mut Shared<T>) {
		let needle = shared.search_input.trim().to_lowercase();
		let search_column = self
			.search_key
			.as_deref()
			.and_then(|key| self.columns.iter().find(|column| column.id() == key));

		let mut selected: Vec<(T, serde_json::Value)> = Vec::new();
		for row in &self.static_rows {
			let serialized = serde_json::to_value(row).unwrap_or(serde_json::Value::Null);
			let matches = if needle.is_empty() {
				true
			} else {
				match search_column {
					Some(column) => column
						.render_cell(row, &serialized)
						.to_lowercase()
						.contains(&needle),
					None => true,
				}
			};
			if matches {
				selected.push((row.clone(), serialized));
			}
		}

		if let Some(sort) = &shared.sort {
			if let Some(column) = self.columns.iter().find(|c| c.id() == sort.column) {
				selected.sort_by_cached_key(|(row, serialized)| {
					column.render_cell(row, serialized).to_lowercase()
				});
				if sort.order == SortOrder::Descending {
					selected.reverse();
				}
			}
		}

		shared.pagination.total = selected.len();
		shared.pagination.page_count = if selected.is_empty() {
			1
		} else {
			selected.len().div_ceil(shared.pagination.page_size)
		};
		let max_index = shared.pagination.page_count - 1;
		if shared.pagination.page_index > max_index {
			shared.pagination.page_index = max_index;
		}

		shared.row_keys = selected
			.iter()
			.enumerate()
			.map(|(index, (_, serialized))| RowKey::resolve(serialized, index))
			.collect();
		shared.rows = selected.into_iter().map(|(row, _)| row).collect();
	}
}

impl<T> std::fmt::Debug for DataGrid<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DataGrid")
			.field("columns", &self.columns.len())
			.field("remote", &self.source.is_some())
			.field("export_base", &self.export_base)
			.finish_non_exhaustive()
	}
}
