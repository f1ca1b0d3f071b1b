use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Page number and size requested by the client
///
/// Both values are at least 1. Missing, non-numeric or zero values fall back
/// to page 1 and 10 records per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a page request, replacing zeroes with the defaults
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Parses raw `page` and `limit` query values
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::query::PageRequest;
    ///
    /// let page = PageRequest::parse(Some("abc"), Some("25"));
    /// assert_eq!(page.page(), 1);
    /// assert_eq!(page.limit(), 25);
    /// ```
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_positive(page, DEFAULT_PAGE), parse_positive(limit, DEFAULT_LIMIT))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records before this page
    pub fn skip(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page - 1)
    }

    /// Number of records in a full page
    pub fn take(&self) -> u64 {
        u64::from(self.limit)
    }

    /// Computes the neighbouring page links for a result set of `total` records
    ///
    /// `next` exists iff `page * limit < total`; `prev` exists iff this is not
    /// the first page.
    pub fn paginate(&self, total: u64) -> Pagination {
        let end = u64::from(self.page) * u64::from(self.limit);

        Pagination {
            prev: (self.skip() > 0).then(|| PageLink {
                page: self.page - 1,
                limit: self.limit,
            }),
            next: (end < total).then(|| PageLink {
                page: self.page.saturating_add(1),
                limit: self.limit,
            }),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// Descriptor of a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u32,
    pub limit: u32,
}

/// Links to the previous and next pages, when they exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let page = PageRequest::parse(None, None);

        assert_eq!(page, PageRequest::default());
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.skip(), 0);
        assert_eq!(page.take(), 10);
    }

    #[test]
    fn non_numeric_values_behave_like_absent_ones() {
        assert_eq!(PageRequest::parse(Some("abc"), None), PageRequest::parse(None, None));
        assert_eq!(PageRequest::parse(None, Some("ten")), PageRequest::default());
        assert_eq!(PageRequest::parse(Some("-2"), Some("0")), PageRequest::default());
    }

    #[test]
    fn skip_is_limit_times_previous_pages() {
        let page = PageRequest::parse(Some("3"), Some("25"));

        assert_eq!(page.skip(), 50);
        assert_eq!(page.take(), 25);
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let pagination = PageRequest::new(1, 10).paginate(12);

        assert_eq!(pagination.prev, None);
        assert_eq!(pagination.next, Some(PageLink { page: 2, limit: 10 }));
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let pagination = PageRequest::new(2, 10).paginate(12);

        assert_eq!(pagination.prev, Some(PageLink { page: 1, limit: 10 }));
        assert_eq!(pagination.next, None);
    }

    #[test]
    fn exact_fit_has_no_next() {
        let pagination = PageRequest::new(2, 5).paginate(10);
        assert_eq!(pagination.next, None);
    }

    #[test]
    fn page_past_the_end_still_links_back() {
        let pagination = PageRequest::new(7, 10).paginate(12);

        assert_eq!(pagination.prev, Some(PageLink { page: 6, limit: 10 }));
        assert_eq!(pagination.next, None);
    }

    #[test]
    fn empty_links_serialize_as_empty_object() {
        let json = serde_json::to_value(Pagination::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
