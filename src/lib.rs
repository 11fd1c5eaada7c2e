//! # Grappelli
//!
//! A server-synchronized data grid library for admin consoles.
//!
//! Every list page of a CRUD-heavy admin console is the same machine: a
//! declarative column/filter description turned into a live, paginated,
//! searchable, exportable table backed by either a static in-memory array
//! or a paginated remote endpoint. Grappelli implements that machine once,
//! headlessly: hosts own rendering, Grappelli owns state.
//!
//! ## Core Guarantees
//!
//! - **Stale responses never win**: overlapping fetches are resolved in
//!   request-generation order, not arrival order
//! - **The server's pagination is authoritative**: client page state is
//!   reconciled against response metadata after every fetch, including the
//!   served-page correction when a requested page went out of range
//! - **Search is debounced**: keystrokes display immediately but commit
//!   one fetch per quiet interval; local grids filter synchronously instead
//! - **Exports are projections**: only visible columns with a literal
//!   header and an accessor path reach the spreadsheet, for both the
//!   current-page and the bulk-fetched all-rows scope
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grappelli::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Order {
//!     id: i64,
//!     reference: String,
//!     status: String,
//! }
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(HttpSource::new("http://localhost:8080")?);
//! let grid: Arc<DataGrid<Order>> = DataGrid::new(
//!     GridConfig::new("orders")
//!         .column(Column::new("reference").header("Reference").accessor("reference").sortable(true))
//!         .column(Column::new("status").header("Status").accessor("status"))
//!         .filter(FilterDescriptor::Select {
//!             label: "Status".into(),
//!             param: "status".into(),
//!             choices: vec![FilterChoice::new("All", "all"), FilterChoice::new("Open", "open")],
//!         })
//!         .endpoint("/api/orders")
//!         .search_key("reference"),
//!     Some(source),
//! )?;
//!
//! grid.load().await;
//! let snapshot = grid.snapshot();
//! println!("{} of {} orders", snapshot.rows.len(), snapshot.pagination.total);
//!
//! let download = grid.export_all(ExportFormat::Csv).await?;
//! println!("wrote {} rows to {}", download.row_count, download.filename);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub use grappelli_client as client;
pub use grappelli_core as core;
pub use grappelli_export as export;
pub use grappelli_grid as grid;

pub use grappelli_client::{DataSource, HttpSource, HttpSourceBuilder, ListEnvelope, SourceError};
pub use grappelli_core::{
	AccessorPath, Column, ColumnHeader, ColumnWidth, Endpoint, FilterChoice, FilterDescriptor,
	FilterState, GridError, GridResult, ListRequest, PageMeta, PaginationState, RowKey, SortOrder,
	SortSpec, VisibilitySet,
};
pub use grappelli_export::{ExportError, ExportFormat, ExportOutput, ExportScope};
pub use grappelli_grid::{DataGrid, GridConfig, GridEvents, GridSnapshot, NullEvents};

/// Commonly used types, importable in one line
pub mod prelude {
	pub use grappelli_client::{DataSource, HttpSource, HttpSourceBuilder};
	pub use grappelli_core::{
		Column, FilterChoice, FilterDescriptor, GridError, GridResult, SortOrder,
	};
	pub use grappelli_export::{ExportFormat, ExportScope};
	pub use grappelli_grid::{DataGrid, GridConfig, GridEvents, GridSnapshot};
}
