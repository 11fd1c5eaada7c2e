//! Spreadsheet export for Grappelli data grids
//!
//! Two scopes, one projection: exports cover either the rows already
//! loaded on the current page or the entire filtered result set (fetched
//! in a single bulk request), and both project rows through the visible,
//! export-eligible columns only. Output formats are CSV (RFC 4180 via the
//! `csv` crate), TSV and JSON, each delivered as bytes plus a timestamped
//! download filename.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod format;

// Re-exports for convenience
pub use engine::{
	EXPORT_ALL_PAGE_SIZE, EXPORT_FILE_PREFIX, ExportError, ExportOutput, eligible_columns,
	export_all, export_filename, export_rows,
};
pub use format::{ExportFormat, ExportScope};
