//! Page-number pagination for catalog listings.
//!
//! Requested page numbers are resolved leniently: a value that is not an
//! integer shows the first page and an integer outside the valid range
//! shows the last page. An empty result still has one (empty) page.

/// Number of products per catalog page.
pub const PAGE_SIZE: i64 = 10;

/// Total number of pages for `count` items, never less than one.
pub fn num_pages(count: i64, per_page: i64) -> i64 {
    let per_page = per_page.max(1);
    let count = count.max(0);
    ((count + per_page - 1) / per_page).max(1)
}

/// Resolve a raw `page` parameter against the page count.
pub fn resolve_page(raw: Option<&str>, num_pages: i64) -> i64 {
    let num_pages = num_pages.max(1);
    match raw.map(str::trim).map(str::parse::<i64>) {
        None | Some(Err(_)) => 1,
        Some(Ok(n)) if (1..=num_pages).contains(&n) => n,
        Some(Ok(_)) => num_pages,
    }
}

/// Position of one page within a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: i64,
    pub num_pages: i64,
    /// Total number of matching items across all pages.
    pub count: i64,
    pub per_page: i64,
}

impl PageInfo {
    /// Resolve the requested page for a result of `count` items.
    pub fn resolve(count: i64, per_page: i64, requested: Option<&str>) -> Self {
        let per_page = per_page.max(1);
        let num_pages = num_pages(count, per_page);
        Self {
            number: resolve_page(requested, num_pages),
            num_pages,
            count: count.max(0),
            per_page,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_page_number(&self) -> Option<i64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<i64> {
        self.has_next().then(|| self.number + 1)
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    /// 1-based index of the first item on this page, 0 for an empty result.
    pub fn start_index(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> i64 {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.per_page
        }
    }
}
