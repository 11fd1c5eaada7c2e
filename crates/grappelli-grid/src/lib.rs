//! Grid orchestration for Grappelli
//!
//! This crate turns the core primitives into a live grid: a single
//! [`DataGrid`] per mounted list owns filter, pagination, sort and
//! visibility state, fetches through a [`grappelli_client::DataSource`],
//! reconciles pagination against the server's authoritative metadata,
//! debounces search keystrokes, and exposes export entry points for both
//! scopes. Overlapping fetches are resolved by request generation, never
//! by arrival order.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod events;
pub mod grid;

// Re-exports for convenience
pub use config::{DEFAULT_SEARCH_DEBOUNCE, GridConfig};
pub use events::{GridEvents, NullEvents};
pub use grid::{DataGrid, GridSnapshot};
