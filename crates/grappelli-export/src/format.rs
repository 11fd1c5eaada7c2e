//! Export formats and scopes

use serde::{Deserialize, Serialize};

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
	/// Comma-separated values (RFC 4180)
	#[default]
	Csv,
	/// Tab-separated values
	Tsv,
	/// JSON array of header→value objects
	Json,
}

impl ExportFormat {
	/// File extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Tsv => "tsv",
			ExportFormat::Json => "json",
		}
	}

	/// MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv",
			ExportFormat::Tsv => "text/tab-separated-values",
			ExportFormat::Json => "application/json",
		}
	}
}

/// Which rows an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
	/// Only the rows already loaded on the current page
	CurrentPage,
	/// The entire filtered result set, fetched in one bulk request
	All,
}

impl ExportScope {
	/// Filename suffix making the scope self-evident
	pub fn suffix(&self) -> &'static str {
		match self {
			ExportScope::CurrentPage => "current_page",
			ExportScope::All => "all",
		}
	}
}
