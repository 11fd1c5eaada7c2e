//! Core primitives for Grappelli data grids
//!
//! This crate holds the render-agnostic building blocks every grid shares:
//!
//! - **Columns**: declarative column definitions with accessor paths and
//!   cell renderers
//! - **Filters**: a tagged filter-descriptor sum type plus the value store
//!   backing the composed query
//! - **Pagination**: 0-based client paging state reconciled against
//!   server-reported metadata
//! - **Sorting & visibility**: single-column sort specs and a
//!   default-visible column map
//! - **Query composition**: endpoint splitting and baseline/filter/sort/
//!   pagination merging into one request descriptor
//! - **Row identity**: explicit render-key resolution for rows without a
//!   stable id
//!
//! Nothing in this crate performs I/O; fetching lives in
//! `grappelli-client` and orchestration in `grappelli-grid`.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod row;
pub mod sort;

// Re-exports for convenience
pub use column::{AccessorPath, CellRenderer, Column, ColumnHeader, ColumnWidth};
pub use error::{GridError, GridResult};
pub use filter::{FilterChoice, FilterDescriptor, FilterState, effective_filters};
pub use pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageMeta, PaginationState};
pub use query::{Endpoint, ListRequest, compose};
pub use row::RowKey;
pub use sort::{SortOrder, SortSpec, VisibilitySet};
