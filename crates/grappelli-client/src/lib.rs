//! Remote collaborator boundary for Grappelli data grids
//!
//! This crate owns everything that touches the wire: the [`DataSource`]
//! seam the grid fetches through, the tolerant list-envelope decoder, and
//! an HTTP source backed by `reqwest`. The grid itself never sees response
//! shapes; it receives opaque rows plus optional pagination metadata.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod envelope;
pub mod http;
pub mod source;

// Re-exports for convenience
pub use envelope::ListEnvelope;
pub use http::{HttpSource, HttpSourceBuilder};
pub use source::{DataSource, SourceError, SourceResult};
