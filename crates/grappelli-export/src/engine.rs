//! Export engine
//!
//! Exports project the grid's rows through its export-eligible columns:
//! only visible columns with a literal header and an accessor path
//! participate, so the header row is always meaningful and cell values are
//! resolved without invoking render logic. The current-page scope
//! serializes rows already held locally; the all scope performs one
//! bulk fetch of the composed filter/search state and is independent of
//! the grid's tracked request generations.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use grappelli_core::column::Column;
use grappelli_core::filter::FilterState;
use grappelli_core::pagination::PaginationState;
use grappelli_core::query::{Endpoint, compose};
use grappelli_core::sort::{SortSpec, VisibilitySet};
use grappelli_client::source::{DataSource, SourceError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::format::{ExportFormat, ExportScope};

/// Fixed filename prefix shared by every export
pub const EXPORT_FILE_PREFIX: &str = "export";

/// Page size of the bulk fetch backing an all-rows export
pub const EXPORT_ALL_PAGE_SIZE: usize = 10_000;

/// Errors raised by the export engine
#[derive(Debug, Error)]
pub enum ExportError {
	/// No visible column is export-eligible
	#[error("No exportable columns are visible")]
	NoEligibleColumns,

	/// The bulk fetch backing an all-rows export failed
	#[error("Failed to fetch all data for export: {0}")]
	FetchAll(#[source] SourceError),

	/// A row could not be serialized for projection
	#[error("Failed to serialize row: {0}")]
	Serialize(#[from] serde_json::Error),

	/// The output writer failed
	#[error("Failed to write export output: {0}")]
	Write(String),
}

impl From<csv::Error> for ExportError {
	fn from(err: csv::Error) -> Self {
		ExportError::Write(err.to_string())
	}
}

/// A finished export: bytes plus download metadata
#[derive(Debug, Clone)]
pub struct ExportOutput {
	/// Serialized spreadsheet bytes
	pub data: Vec<u8>,
	/// Suggested download filename
	pub filename: String,
	/// MIME type matching the format
	pub mime_type: String,
	/// Number of exported rows
	pub row_count: usize,
}

impl ExportOutput {
	/// Output size in bytes
	pub fn size_bytes(&self) -> usize {
		self.data.len()
	}

	/// Materializes the download into a directory; returns the full path
	pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
		let path = dir.as_ref().join(&self.filename);
		std::fs::write(&path, &self.data)?;
		Ok(path)
	}
}

/// Builds the timestamped output filename
///
/// Shape: `export_<base>_<%Y%m%d_%H%M%S>_<scope>.<ext>`. The timestamp is
/// accurate to the second, so successive exports never collide, and the
/// scope suffix makes current-page vs all self-evident.
pub fn export_filename(base: &str, scope: ExportScope, format: ExportFormat) -> String {
	format!(
		"{}_{}_{}_{}.{}",
		EXPORT_FILE_PREFIX,
		base,
		Utc::now().format("%Y%m%d_%H%M%S"),
		scope.suffix(),
		format.extension()
	)
}

/// Returns the visible, export-eligible columns in declaration order
pub fn eligible_columns<'a, T>(
	columns: &'a [Column<T>],
	visibility: &VisibilitySet,
) -> Vec<&'a Column<T>> {
	columns
		.iter()
		.filter(|column| column.export_eligible() && visibility.is_visible(column.id()))
		.collect()
}

/// Exports rows already held locally
///
/// No network is involved; the caller passes exactly the rows to cover
/// (the loaded page for the current-page scope, a prefetched full set for
/// the all scope in local mode).
pub fn export_rows<T: Serialize>(
	columns: &[Column<T>],
	visibility: &VisibilitySet,
	rows: &[T],
	base_name: &str,
	format: ExportFormat,
	scope: ExportScope,
) -> Result<ExportOutput, ExportError> {
	let eligible = eligible_columns(columns, visibility);
	if eligible.is_empty() {
		return Err(ExportError::NoEligibleColumns);
	}

	let headers: Vec<&str> = eligible
		.iter()
		.filter_map(|column| column.header_def().literal())
		.collect();
	let mut records = Vec::with_capacity(rows.len());
	for row in rows {
		let serialized = serde_json::to_value(row)?;
		let record: Vec<String> = eligible
			.iter()
			.map(|column| {
				column
					.accessor_path()
					.map(|path| path.resolve_display(&serialized))
					.unwrap_or_default()
			})
			.collect();
		records.push(record);
	}

	let data = match format {
		ExportFormat::Csv => write_delimited(&headers, &records, b',')?,
		ExportFormat::Tsv => write_delimited(&headers, &records, b'\t')?,
		ExportFormat::Json => write_json(&headers, &records)?,
	};

	tracing::debug!(
		rows = records.len(),
		columns = headers.len(),
		scope = scope.suffix(),
		"export serialized"
	);

	Ok(ExportOutput {
		data,
		filename: export_filename(base_name, scope, format),
		mime_type: format.mime_type().to_string(),
		row_count: records.len(),
	})
}

/// Exports the entire filtered result set from a remote source
///
/// Performs one bulk fetch of the same composed filter/search/sort state
/// with pagination replaced by a single oversized page. The fetch is
/// independent of the grid's request generations; its failure is reported
/// on a channel of its own and must never disturb grid state.
pub async fn export_all<T>(
	columns: &[Column<T>],
	visibility: &VisibilitySet,
	source: &dyn DataSource,
	endpoint: &Endpoint,
	filters: &FilterState,
	sort: Option<&SortSpec>,
	base_name: &str,
	format: ExportFormat,
) -> Result<ExportOutput, ExportError>
where
	T: Serialize + DeserializeOwned,
{
	// Fail fast before fetching ten thousand rows nobody can project.
	if eligible_columns(columns, visibility).is_empty() {
		return Err(ExportError::NoEligibleColumns);
	}

	let bulk_pagination = PaginationState::new(EXPORT_ALL_PAGE_SIZE);
	let request = compose(endpoint, filters, &bulk_pagination, sort);
	let envelope = source
		.fetch(&request)
		.await
		.map_err(ExportError::FetchAll)?;

	let mut rows: Vec<T> = Vec::with_capacity(envelope.rows.len());
	for value in envelope.rows {
		match serde_json::from_value(value) {
			Ok(row) => rows.push(row),
			Err(err) => tracing::warn!(%err, "dropping undecodable row from export"),
		}
	}
	export_rows(columns, visibility, &rows, base_name, format, ExportScope::All)
}

fn write_delimited(
	headers: &[&str],
	records: &[Vec<String>],
	delimiter: u8,
) -> Result<Vec<u8>, ExportError> {
	let mut writer = csv::WriterBuilder::new()
		.delimiter(delimiter)
		.from_writer(Vec::new());
	writer.write_record(headers)?;
	for record in records {
		writer.write_record(record)?;
	}
	writer
		.into_inner()
		.map_err(|e| ExportError::Write(e.to_string()))
}

fn write_json(headers: &[&str], records: &[Vec<String>]) -> Result<Vec<u8>, ExportError> {
	let objects: Vec<serde_json::Value> = records
		.iter()
		.map(|record| {
			let mut object = serde_json::Map::new();
			for (header, value) in headers.iter().zip(record) {
				object.insert(header.to_string(), serde_json::Value::String(value.clone()));
			}
			serde_json::Value::Object(object)
		})
		.collect();
	Ok(serde_json::to_vec_pretty(&objects)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Order {
		id: i64,
		status: String,
		distributor: Distributor,
	}

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Distributor {
		name: Option<String>,
	}

	fn orders() -> Vec<Order> {
		vec![
			Order {
				id: 1,
				status: "open".to_string(),
				distributor: Distributor {
					name: Some("Acme, Inc.".to_string()),
				},
			},
			Order {
				id: 2,
				status: "closed".to_string(),
				distributor: Distributor { name: None },
			},
		]
	}

	fn columns() -> Vec<Column<Order>> {
		vec![
			Column::new("id").header("ID").accessor("id"),
			Column::new("status").header("Status").accessor("status"),
			Column::new("distributor")
				.header("Distributor")
				.accessor("distributor.name"),
			// Computed cell without accessor: never exported.
			Column::new("actions")
				.header("Actions")
				.cell(|_: &Order| "edit".to_string()),
			// Computed header: never exported.
			Column::new("badge")
				.dynamic_header(|| "Badge".to_string())
				.accessor("status"),
		]
	}

	#[test]
	fn test_eligibility_excludes_computed_columns() {
		let columns = columns();
		let eligible = eligible_columns(&columns, &VisibilitySet::new());
		let ids: Vec<&str> = eligible.iter().map(|c| c.id()).collect();
		assert_eq!(ids, vec!["id", "status", "distributor"]);
	}

	#[test]
	fn test_hidden_column_excluded() {
		let columns = columns();
		let mut visibility = VisibilitySet::new();
		visibility.hide("status");
		let eligible = eligible_columns(&columns, &visibility);
		let ids: Vec<&str> = eligible.iter().map(|c| c.id()).collect();
		assert_eq!(ids, vec!["id", "distributor"]);
	}

	#[test]
	fn test_csv_quotes_and_missing_values() {
		let output = export_rows(
			&columns(),
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Csv,
			ExportScope::CurrentPage,
		)
		.unwrap();
		let text = String::from_utf8(output.data).unwrap();
		assert!(text.starts_with("ID,Status,Distributor"));
		assert!(text.contains("\"Acme, Inc.\""));
		// Null distributor name resolves to an empty cell, not a panic.
		assert!(text.contains("2,closed,"));
		assert_eq!(output.row_count, 2);
	}

	#[test]
	fn test_tsv_delimiter() {
		let output = export_rows(
			&columns(),
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Tsv,
			ExportScope::CurrentPage,
		)
		.unwrap();
		let text = String::from_utf8(output.data).unwrap();
		assert!(text.starts_with("ID\tStatus\tDistributor"));
	}

	#[test]
	fn test_json_objects_keyed_by_header() {
		let output = export_rows(
			&columns(),
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Json,
			ExportScope::All,
		)
		.unwrap();
		let parsed: Vec<serde_json::Value> = serde_json::from_slice(&output.data).unwrap();
		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed[0]["ID"], serde_json::json!("1"));
		assert_eq!(parsed[0]["Distributor"], serde_json::json!("Acme, Inc."));
	}

	#[test]
	fn test_filename_shape() {
		let output = export_rows(
			&columns(),
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Csv,
			ExportScope::CurrentPage,
		)
		.unwrap();
		assert!(output.filename.starts_with("export_orders_"));
		assert!(output.filename.ends_with("_current_page.csv"));
		assert_eq!(output.mime_type, "text/csv");
		assert_eq!(output.size_bytes(), output.data.len());
	}

	#[test]
	fn test_all_columns_ineligible_is_an_error() {
		let columns: Vec<Column<Order>> = vec![
			Column::new("actions")
				.header("Actions")
				.cell(|_: &Order| "edit".to_string()),
		];
		let result = export_rows(
			&columns,
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Csv,
			ExportScope::CurrentPage,
		);
		assert!(matches!(result, Err(ExportError::NoEligibleColumns)));
	}

	#[test]
	fn test_write_to_dir() {
		let output = export_rows(
			&columns(),
			&VisibilitySet::new(),
			&orders(),
			"orders",
			ExportFormat::Csv,
			ExportScope::CurrentPage,
		)
		.unwrap();
		let dir = tempfile::tempdir().unwrap();
		let path = output.write_to_dir(dir.path()).unwrap();
		assert!(path.exists());
		assert_eq!(std::fs::read(&path).unwrap(), output.data);
	}
}
