//! Pagination state and server reconciliation
//!
//! The grid requests pages with a 0-based `page_index`, while the wire
//! protocol and the server's metadata speak 1-based page numbers. `total`
//! and `page_count` are authoritative only from the most recent reconciled
//! fetch.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// The fixed, ordered set of page sizes offered to hosts
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 100, 1000];

/// Default rows per page when the host does not override it
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination metadata reported by the server
///
/// All fields are optional: an unpaginated response carries none of them,
/// and partial metadata degrades gracefully during reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
	/// Total rows across all pages
	pub total: Option<u64>,
	/// The page the server actually served (1-based)
	pub current_page: Option<u64>,
	/// Last available page (1-based)
	pub last_page: Option<u64>,
}

/// Client-held pagination state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
	/// Current page, 0-based
	pub page_index: usize,
	/// Requested rows per page
	pub page_size: usize,
	/// Number of pages reported by the last reconciled fetch
	pub page_count: usize,
	/// Total rows reported by the last reconciled fetch
	pub total: usize,
}

impl PaginationState {
	/// Creates pagination state positioned on the first page
	pub fn new(page_size: usize) -> Self {
		Self {
			page_index: 0,
			page_size,
			page_count: 1,
			total: 0,
		}
	}

	/// Requests a page change
	///
	/// Out-of-range requests (negative, or past the last page) and
	/// requests for the page already current are no-ops. Returns whether
	/// the index changed.
	pub fn request_page(&mut self, page: i64) -> bool {
		if page < 0 || page as usize >= self.page_count {
			return false;
		}
		let page = page as usize;
		if page == self.page_index {
			return false;
		}
		self.page_index = page;
		true
	}

	/// Requests a page size change
	///
	/// A new page size invalidates the old offset's meaning, so the index
	/// unconditionally resets to the first page.
	pub fn request_page_size(&mut self, page_size: usize) -> GridResult<()> {
		if page_size == 0 {
			return Err(GridError::InvalidPageSize(page_size));
		}
		self.page_size = page_size;
		self.page_index = 0;
		Ok(())
	}

	/// Reconciles client state against a fetched response
	///
	/// Missing metadata degrades to "everything fit on one page": `total`
	/// falls back to the delivered row count and `page_count` to 1. When
	/// the server reports a current page different from the requested one
	/// (e.g. the requested page went out of range under concurrent
	/// deletions), the server wins.
	pub fn reconcile(&mut self, meta: &PageMeta, delivered_rows: usize) {
		self.total = meta.total.map(|t| t as usize).unwrap_or(delivered_rows);
		self.page_count = meta.last_page.map(|p| p as usize).unwrap_or(1).max(1);
		if let Some(current) = meta.current_page {
			let server_index = (current.max(1) - 1) as usize;
			if server_index != self.page_index {
				self.page_index = server_index;
			}
		}
		self.clamp_index();
	}

	/// Resets to the failed-fetch baseline: no rows, a single empty page
	pub fn reset_after_failure(&mut self) {
		self.total = 0;
		self.page_count = 1;
		self.page_index = 0;
	}

	/// 1-based page number for display and the wire
	pub fn page_number(&self) -> usize {
		self.page_index + 1
	}

	/// 1-based index of the first row on the current page, 0 when empty
	pub fn start_index(&self) -> usize {
		if self.total == 0 {
			0
		} else {
			self.page_index * self.page_size + 1
		}
	}

	/// 1-based index of the last row on the current page, 0 when empty
	pub fn end_index(&self) -> usize {
		if self.total == 0 {
			0
		} else {
			(self.start_index() + self.page_size - 1).min(self.total)
		}
	}

	/// Returns true if a later page exists
	pub fn has_next(&self) -> bool {
		self.page_index + 1 < self.page_count
	}

	/// Returns true if an earlier page exists
	pub fn has_previous(&self) -> bool {
		self.page_index > 0
	}

	fn clamp_index(&mut self) {
		let max_index = self.page_count.saturating_sub(1);
		if self.page_index > max_index {
			self.page_index = max_index;
		}
	}
}

impl Default for PaginationState {
	fn default() -> Self {
		Self::new(DEFAULT_PAGE_SIZE)
	}
}
