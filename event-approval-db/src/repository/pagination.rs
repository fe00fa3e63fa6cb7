/// Offset-based pagination request for history listings
///
/// # Example
/// ```
/// use event_approval_db::repository::pagination::PageRequest;
///
/// let latest_twenty = PageRequest::new(20, 0);
/// let next_twenty = PageRequest::new(20, 20);
/// assert_eq!(next_twenty.page_number(), 2);
/// # let _ = latest_twenty;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of entries to return
    pub limit: usize,
    /// Number of entries to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Create a page request for a 1-based page number
    ///
    /// # Example
    /// ```
    /// use event_approval_db::repository::pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::for_page(10, 1).offset, 0);
    /// assert_eq!(PageRequest::for_page(10, 3).offset, 20);
    /// assert_eq!(PageRequest::for_page(10, 0).offset, 0);
    /// ```
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        let page_number = page_number.max(1);
        Self {
            limit: page_size,
            offset: (page_number - 1) * page_size,
        }
    }

    /// Get the page number (1-based) for this request
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of results plus the totals needed to render paging controls
///
/// # Example
/// ```
/// use event_approval_db::repository::pagination::{Page, PageRequest};
///
/// let entries: Vec<u32> = (1..=7).collect();
/// let page = Page::from_slice(&entries, PageRequest::new(3, 3));
///
/// assert_eq!(page.items, vec![4, 5, 6]);
/// assert!(page.has_more());
/// assert_eq!(page.page_number(), 2);
/// assert_eq!(page.total_pages(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Maximum number of items per page
    pub limit: usize,
    /// Number of items skipped before this page
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Cut one page out of a fully materialized, already ordered sequence
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let items = all
            .iter()
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect();
        Self::new(items, all.len(), request.limit, request.offset)
    }

    /// Convert the items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last_page(&self) -> bool {
        !self.has_more()
    }
}
