//! Shared fixtures for grid integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use grappelli_client::envelope::ListEnvelope;
use grappelli_client::source::{DataSource, SourceError, SourceResult};
use grappelli_core::column::Column;
use grappelli_core::pagination::PageMeta;
use grappelli_core::query::ListRequest;
use grappelli_grid::events::GridEvents;
use grappelli_grid::grid::{DataGrid, GridSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
	pub id: i64,
	pub name: String,
	pub status: String,
}

pub fn columns() -> Vec<Column<Order>> {
	vec![
		Column::new("id")
			.header("ID")
			.accessor("id")
			.sortable(true)
			.hideable(false),
		Column::new("name")
			.header("Name")
			.accessor("name")
			.sortable(true),
		Column::new("status").header("Status").accessor("status"),
	]
}

/// Serves a deterministic row set, honoring page/per_page/search and
/// clamping out-of-range page requests the way a real backend does.
pub struct PagedSource {
	total: AtomicUsize,
	calls: AtomicUsize,
	requests: Mutex<Vec<ListRequest>>,
}

impl PagedSource {
	pub fn new(total: usize) -> Arc<Self> {
		Arc::new(Self {
			total: AtomicUsize::new(total),
			calls: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		})
	}

	pub fn set_total(&self, total: usize) {
		self.total.store(total, Ordering::SeqCst);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> ListRequest {
		self.requests.lock().unwrap().last().cloned().unwrap()
	}
}

#[async_trait]
impl DataSource for PagedSource {
	async fn fetch(&self, request: &ListRequest) -> SourceResult<ListEnvelope> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().unwrap().push(request.clone());

		let per_page: usize = request.param("per_page").unwrap().parse().unwrap();
		let requested: usize = request.param("page").unwrap().parse().unwrap();
		let search = request.param("search").map(str::to_lowercase);

		let total = self.total.load(Ordering::SeqCst);
		let rows: Vec<Value> = (1..=total)
			.map(|i| {
				json!({
					"id": i,
					"name": format!("row-{}", i),
					"status": if i % 2 == 0 { "closed" } else { "open" },
				})
			})
			.filter(|row| match &search {
				Some(needle) => row["name"].as_str().unwrap().contains(needle.as_str()),
				None => true,
			})
			.collect();

		let count = rows.len();
		let last = count.div_ceil(per_page).max(1);
		let served = requested.clamp(1, last);
		let start = (served - 1) * per_page;
		let end = (start + per_page).min(count);
		let page_rows = rows[start.min(end)..end].to_vec();

		Ok(ListEnvelope {
			rows: page_rows,
			meta: Some(PageMeta {
				total: Some(count as u64),
				current_page: Some(served as u64),
				last_page: Some(last as u64),
			}),
		})
	}
}

/// Holds every fetch until the test resolves it, in any order.
pub struct ScriptedSource {
	pending: Mutex<Vec<Option<oneshot::Sender<SourceResult<ListEnvelope>>>>>,
	calls: AtomicUsize,
}

impl ScriptedSource {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			pending: Mutex::new(Vec::new()),
			calls: AtomicUsize::new(0),
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Resolves the `index`-th fetch (0-based, issue order)
	pub fn resolve(&self, index: usize, result: SourceResult<ListEnvelope>) {
		let sender = self.pending.lock().unwrap()[index].take().unwrap();
		sender.send(result).ok();
	}

	pub async fn wait_calls(&self, count: usize) {
		for _ in 0..1000 {
			if self.calls() >= count {
				return;
			}
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
		panic!("source never reached {} calls", count);
	}
}

#[async_trait]
impl DataSource for ScriptedSource {
	async fn fetch(&self, _request: &ListRequest) -> SourceResult<ListEnvelope> {
		let (tx, rx) = oneshot::channel();
		self.pending.lock().unwrap().push(Some(tx));
		self.calls.fetch_add(1, Ordering::SeqCst);
		rx.await.unwrap_or_else(|_| {
			Err(SourceError::Status {
				status: 599,
				url: "dropped".to_string(),
			})
		})
	}
}

/// Always fails with a server error.
pub struct FailingSource {
	calls: AtomicUsize,
}

impl FailingSource {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			calls: AtomicUsize::new(0),
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl DataSource for FailingSource {
	async fn fetch(&self, _request: &ListRequest) -> SourceResult<ListEnvelope> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(SourceError::Status {
			status: 500,
			url: "/api/orders".to_string(),
		})
	}
}

/// Records forwarded failure messages per channel.
#[derive(Default)]
pub struct RecordingEvents {
	pub errors: Mutex<Vec<String>>,
	pub export_errors: Mutex<Vec<String>>,
}

impl GridEvents for RecordingEvents {
	fn on_error(&self, message: &str) {
		self.errors.lock().unwrap().push(message.to_string());
	}

	fn on_export_error(&self, message: &str) {
		self.export_errors.lock().unwrap().push(message.to_string());
	}
}

/// Sample envelope for scripted sources.
pub fn envelope(names: &[&str], total: u64) -> ListEnvelope {
	ListEnvelope {
		rows: names
			.iter()
			.enumerate()
			.map(|(i, name)| json!({"id": i as i64 + 1, "name": name, "status": "open"}))
			.collect(),
		meta: Some(PageMeta {
			total: Some(total),
			current_page: Some(1),
			last_page: Some(1),
		}),
	}
}

/// Polls the grid until the snapshot satisfies the predicate.
pub async fn wait_until<F>(grid: &Arc<DataGrid<Order>>, predicate: F) -> GridSnapshot<Order>
where
	F: Fn(&GridSnapshot<Order>) -> bool,
{
	for _ in 0..1000 {
		let snapshot = grid.snapshot();
		if predicate(&snapshot) {
			return snapshot;
		}
		tokio::time::sleep(Duration::from_millis(1)).await;
	}
	panic!("grid never reached the expected state");
}
