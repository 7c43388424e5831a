//! Pagination for the seller listing.
//!
//! Clients address pages with a one-based `page` number and a `per_page`
//! size. Both are optional and out-of-range values fall back to defaults:
//! pages below 1 become 1, sizes below 1 or above 100 become 20.

use seller_shared::{Page, PageRequest};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Header carrying the total number of records.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Paging parameters as received from the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    /// One-based page number after defaults are applied.
    pub fn page(&self) -> u32 {
        match self.page {
            Some(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
            _ => DEFAULT_PAGE,
        }
    }

    /// Page size after defaults are applied.
    pub fn per_page(&self) -> u32 {
        match self.per_page {
            Some(per_page) if (1..=i64::from(MAX_PER_PAGE)).contains(&per_page) => {
                per_page as u32
            }
            _ => DEFAULT_PER_PAGE,
        }
    }

    /// The zero-based store request for these parameters.
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page() - 1, self.per_page())
    }
}

/// Navigation links for a page of results, rendered as an RFC 5988 `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLinks {
    base_url: String,
    page: u32,
    per_page: u32,
    total_pages: u64,
    total_count: u64,
}

impl PaginationLinks {
    /// Build the links for `page`, which was read with `params`.
    pub fn new(page: &Page, base_url: impl Into<String>, params: PageParams) -> Self {
        Self {
            base_url: base_url.into(),
            page: params.page(),
            per_page: params.per_page(),
            total_pages: page.total_pages(),
            total_count: page.total_elements,
        }
    }

    /// Total number of records across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    fn link(&self, page: u64, rel: &str) -> String {
        format!(
            "<{}?page={}&per_page={}>; rel=\"{}\"",
            self.base_url, page, self.per_page, rel
        )
    }

    /// The `Link` header value.
    ///
    /// `next` and `prev` appear only when such a page exists; `last` and
    /// `first` are always present. An empty listing reports page 1 as last.
    pub fn link_header(&self) -> String {
        let page = u64::from(self.page);
        let mut links = Vec::with_capacity(4);

        if page < self.total_pages {
            links.push(self.link(page + 1, "next"));
        }
        if page > 1 {
            links.push(self.link(page - 1, "prev"));
        }
        links.push(self.link(self.total_pages.max(1), "last"));
        links.push(self.link(1, "first"));

        links.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_total(total: u64, params: PageParams) -> Page {
        Page::new(vec![], total, params.to_request())
    }

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
        assert_eq!(params.to_request(), PageRequest::new(0, 20));
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let params = PageParams::new(Some(0), Some(101));
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);

        let params = PageParams::new(Some(-4), Some(0));
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);

        let params = PageParams::new(Some(3), Some(100));
        assert_eq!(params.to_request(), PageRequest::new(2, 100));
    }

    #[test]
    fn test_link_header_first_page() {
        let params = PageParams::new(Some(1), Some(10));
        let links = PaginationLinks::new(&page_with_total(25, params), "/api/sellers", params);

        assert_eq!(links.total_count(), 25);
        assert_eq!(
            links.link_header(),
            "</api/sellers?page=2&per_page=10>; rel=\"next\",\
             </api/sellers?page=3&per_page=10>; rel=\"last\",\
             </api/sellers?page=1&per_page=10>; rel=\"first\""
        );
    }

    #[test]
    fn test_link_header_middle_page() {
        let params = PageParams::new(Some(2), Some(10));
        let links = PaginationLinks::new(&page_with_total(25, params), "/api/sellers", params);

        let header = links.link_header();
        assert!(header.contains("page=3&per_page=10>; rel=\"next\""));
        assert!(header.contains("page=1&per_page=10>; rel=\"prev\""));
    }

    #[test]
    fn test_link_header_last_page() {
        let params = PageParams::new(Some(3), Some(10));
        let links = PaginationLinks::new(&page_with_total(25, params), "/api/sellers", params);

        let header = links.link_header();
        assert!(!header.contains("rel=\"next\""));
        assert!(header.contains("page=2&per_page=10>; rel=\"prev\""));
    }

    #[test]
    fn test_link_header_empty() {
        let params = PageParams::default();
        let links = PaginationLinks::new(&page_with_total(0, params), "/api/sellers", params);

        assert_eq!(links.total_count(), 0);
        assert_eq!(
            links.link_header(),
            "</api/sellers?page=1&per_page=20>; rel=\"last\",\
             </api/sellers?page=1&per_page=20>; rel=\"first\""
        );
    }
}
