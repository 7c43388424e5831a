//! Paging types shared between the record store and the gateway.

use serde::{Deserialize, Serialize};

use crate::Seller;

/// A request for one page of records.
///
/// `page` is zero-based here; the HTTP layer exposes one-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Number of records per page, always at least 1.
    pub size: u32,
}

impl PageRequest {
    /// Create a page request. A size of zero is raised to one.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Number of records to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of sellers together with the totals needed for pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Records on this page, in store order.
    pub content: Vec<Seller>,
    /// Total number of records across all pages.
    pub total_elements: u64,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl Page {
    pub fn new(content: Vec<Seller>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            request,
        }
    }

    /// An empty page for the given request.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Total number of pages. Zero when there are no records.
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.request.size))
    }
}
