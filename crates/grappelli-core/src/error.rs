//! Error types for grid state operations

use thiserror::Error;

/// Errors raised by grid configuration and state transitions
#[derive(Debug, Error)]
pub enum GridError {
	/// Referenced column id is not declared on the grid
	#[error("Unknown column '{0}'")]
	UnknownColumn(String),

	/// Column exists but was declared non-sortable
	#[error("Column '{0}' is not sortable")]
	NotSortable(String),

	/// Column exists but was declared non-hideable
	#[error("Column '{0}' is not hideable")]
	NotHideable(String),

	/// Page size must be a positive number of rows
	#[error("Invalid page size: {0}")]
	InvalidPageSize(usize),

	/// A remote endpoint was configured without a data source
	#[error("Remote endpoint '{0}' configured without a data source")]
	MissingSource(String),
}

/// Result type for grid state operations
pub type GridResult<T> = Result<T, GridError>;
