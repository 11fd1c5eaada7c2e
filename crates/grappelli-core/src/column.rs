//! Column definitions for the data grid
//!
//! A column declares how one cell of a row is identified, labelled and
//! rendered. Columns never own row data; they hold an optional dot-delimited
//! accessor path into the row's serialized form and an optional cell
//! renderer closure for computed output.

use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

/// Shared cell renderer closure
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Column header: a literal label or a computed one
///
/// Only columns with a literal [`ColumnHeader::Text`] header are eligible
/// for export; a computed header cannot be resolved into a meaningful
/// spreadsheet header row.
#[derive(Clone)]
pub enum ColumnHeader {
	/// Literal header text
	Text(String),
	/// Header produced by a closure at render time
	Dynamic(Arc<dyn Fn() -> String + Send + Sync>),
}

impl ColumnHeader {
	/// Returns the literal header text, if this header is literal
	pub fn literal(&self) -> Option<&str> {
		match self {
			ColumnHeader::Text(text) => Some(text),
			ColumnHeader::Dynamic(_) => None,
		}
	}

	/// Renders the header for display (literal or computed)
	pub fn render(&self) -> String {
		match self {
			ColumnHeader::Text(text) => text.clone(),
			ColumnHeader::Dynamic(render) => render(),
		}
	}
}

impl Debug for ColumnHeader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ColumnHeader::Text(text) => f.debug_tuple("Text").field(text).finish(),
			ColumnHeader::Dynamic(_) => f.debug_tuple("Dynamic").finish(),
		}
	}
}

/// Column width hint forwarded to the host renderer
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWidth {
	/// Fixed width in pixels
	Px(u32),
	/// Free-form width expression (e.g. `"12rem"`, `"20%"`)
	Css(String),
}

/// A dot-delimited path into a row's serialized form
///
/// Resolution walks object fields segment by segment; a missing
/// intermediate yields `None` and never panics.
///
/// # Examples
///
/// ```
/// use grappelli_core::column::AccessorPath;
/// use serde_json::json;
///
/// let path = AccessorPath::new("distributor.name");
/// let row = json!({"distributor": {"name": "Acme"}});
/// assert_eq!(path.resolve(&row), Some(&json!("Acme")));
/// assert_eq!(path.resolve(&json!({})), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPath {
	segments: Vec<String>,
}

impl AccessorPath {
	/// Creates an accessor path from a dot-delimited string
	pub fn new(path: impl AsRef<str>) -> Self {
		Self {
			segments: path.as_ref().split('.').map(str::to_string).collect(),
		}
	}

	/// Walks the path against a serialized row
	pub fn resolve<'a>(&self, row: &'a Value) -> Option<&'a Value> {
		let mut current = row;
		for segment in &self.segments {
			current = current.get(segment)?;
		}
		Some(current)
	}

	/// Resolves the path and formats the result for display
	///
	/// Missing values and JSON `null` become the empty string.
	pub fn resolve_display(&self, row: &Value) -> String {
		self.resolve(row).map(format_cell_value).unwrap_or_default()
	}
}

impl std::fmt::Display for AccessorPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.segments.join("."))
	}
}

/// Formats a serialized cell value for display and export
///
/// Strings are emitted verbatim (no surrounding quotes), `null` becomes the
/// empty string, other scalars use their canonical text form, and nested
/// arrays/objects fall back to compact JSON.
pub fn format_cell_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		other => other.to_string(),
	}
}

/// A grid column definition
///
/// # Examples
///
/// ```
/// use grappelli_core::column::Column;
///
/// #[derive(serde::Serialize)]
/// struct Order {
///     id: i64,
///     status: String,
/// }
///
/// let column = Column::<Order>::new("status")
///     .header("Status")
///     .accessor("status")
///     .sortable(true);
///
/// assert!(column.export_eligible());
/// ```
pub struct Column<T> {
	id: String,
	header: ColumnHeader,
	accessor: Option<AccessorPath>,
	cell: Option<CellRenderer<T>>,
	width: Option<ColumnWidth>,
	sortable: bool,
	hideable: bool,
}

impl<T> Column<T> {
	/// Creates a column with the given id
	///
	/// The header defaults to the id itself; use [`Column::header`] or
	/// [`Column::dynamic_header`] to override it.
	pub fn new(id: impl Into<String>) -> Self {
		let id = id.into();
		let header = ColumnHeader::Text(id.clone());
		Self {
			id,
			header,
			accessor: None,
			cell: None,
			width: None,
			sortable: false,
			hideable: true,
		}
	}

	/// Sets a literal header label
	pub fn header(mut self, header: impl Into<String>) -> Self {
		self.header = ColumnHeader::Text(header.into());
		self
	}

	/// Sets a computed header
	pub fn dynamic_header(mut self, render: impl Fn() -> String + Send + Sync + 'static) -> Self {
		self.header = ColumnHeader::Dynamic(Arc::new(render));
		self
	}

	/// Sets the dot-delimited accessor path into the row
	pub fn accessor(mut self, path: impl AsRef<str>) -> Self {
		self.accessor = Some(AccessorPath::new(path));
		self
	}

	/// Sets a custom cell renderer
	pub fn cell(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
		self.cell = Some(Arc::new(render));
		self
	}

	/// Sets a width hint
	pub fn width(mut self, width: ColumnWidth) -> Self {
		self.width = Some(width);
		self
	}

	/// Sets whether this column can be sorted
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column can be hidden
	pub fn hideable(mut self, hideable: bool) -> Self {
		self.hideable = hideable;
		self
	}

	/// Returns the column id
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Returns the header
	pub fn header_def(&self) -> &ColumnHeader {
		&self.header
	}

	/// Returns the accessor path, if any
	pub fn accessor_path(&self) -> Option<&AccessorPath> {
		self.accessor.as_ref()
	}

	/// Returns the width hint, if any
	pub fn width_hint(&self) -> Option<&ColumnWidth> {
		self.width.as_ref()
	}

	/// Returns whether this column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether this column can be hidden
	pub fn is_hideable(&self) -> bool {
		self.hideable
	}

	/// Returns whether this column may appear in exported output
	///
	/// Eligibility requires a literal header and an accessor path: the
	/// exported header row must be meaningful and the cell value must be
	/// resolvable without invoking render logic.
	pub fn export_eligible(&self) -> bool {
		self.header.literal().is_some() && self.accessor.is_some()
	}

	/// Renders one cell for the given row
	///
	/// The custom cell renderer wins when present; otherwise the accessor
	/// path is resolved against the serialized row.
	pub fn render_cell(&self, row: &T, serialized: &Value) -> String {
		if let Some(cell) = &self.cell {
			return cell(row);
		}
		match &self.accessor {
			Some(path) => path.resolve_display(serialized),
			None => String::new(),
		}
	}
}

impl<T> Debug for Column<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Column")
			.field("id", &self.id)
			.field("header", &self.header)
			.field("accessor", &self.accessor)
			.field("width", &self.width)
			.field("sortable", &self.sortable)
			.field("hideable", &self.hideable)
			.finish_non_exhaustive()
	}
}

impl<T> Clone for Column<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id.clone(),
			header: self.header.clone(),
			accessor: self.accessor.clone(),
			cell: self.cell.clone(),
			width: self.width.clone(),
			sortable: self.sortable,
			hideable: self.hideable,
		}
	}
}
