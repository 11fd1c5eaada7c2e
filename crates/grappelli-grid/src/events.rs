//! Event sink forwarding grid failures to the host's notification surface
//!
//! The grid formats human-readable messages but never presents them; the
//! host decides what a toast looks like. List-fetch failures and
//! export-all failures arrive on distinct methods because they have
//! different consequences: the former clears the grid's rows, the latter
//! leaves grid state untouched.

/// Host callbacks for user-visible failures
pub trait GridEvents: Send + Sync {
	/// A list fetch failed; the grid cleared its rows
	fn on_error(&self, _message: &str) {}

	/// An export-all bulk fetch failed; grid state is unaffected
	fn on_export_error(&self, _message: &str) {}
}

/// Sink that drops every event
#[derive(Debug, Default)]
pub struct NullEvents;

impl GridEvents for NullEvents {}
