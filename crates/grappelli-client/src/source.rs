//! The data source seam between the grid and its remote collaborator

use async_trait::async_trait;
use grappelli_core::query::ListRequest;
use thiserror::Error;

use crate::envelope::ListEnvelope;

/// Errors raised while fetching a list page
#[derive(Debug, Error)]
pub enum SourceError {
	/// Transport-level failure (connect, timeout, TLS, ...)
	#[error("HTTP transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The server answered with a non-success status
	#[error("Server returned status {status} for {url}")]
	Status {
		/// HTTP status code
		status: u16,
		/// Requested URL
		url: String,
	},

	/// The response body was not valid JSON
	#[error("Failed to decode response body: {0}")]
	Decode(#[from] serde_json::Error),

	/// The configured base URL or request path is unusable
	#[error("Invalid URL: {0}")]
	Url(String),
}

impl SourceError {
	/// Returns true if the error is a timeout
	pub fn is_timeout(&self) -> bool {
		match self {
			SourceError::Transport(e) => e.is_timeout(),
			_ => false,
		}
	}

	/// Returns true if the error is a connection failure
	pub fn is_connect(&self) -> bool {
		match self {
			SourceError::Transport(e) => e.is_connect(),
			_ => false,
		}
	}

	/// Returns the HTTP status code, when the server answered at all
	pub fn status(&self) -> Option<u16> {
		match self {
			SourceError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A provider of list pages
///
/// The grid composes a [`ListRequest`] and hands it to its source; what is
/// behind the seam (an HTTP API, a test double) is the host's choice.
#[async_trait]
pub trait DataSource: Send + Sync {
	/// Fetches one page of rows for the composed request
	async fn fetch(&self, request: &ListRequest) -> SourceResult<ListEnvelope>;
}
