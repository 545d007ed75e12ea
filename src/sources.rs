// SPDX-License-Identifier: MPL-2.0
//! State of the sources dropdown: search term, current page and the names
//! shown.
//!
//! Every page load goes through a [`PageRequest`] carrying a sequence
//! number. Only the answer to the latest request is applied, so a slow
//! answer for an old search term cannot overwrite a newer one.

use crate::api::SourcesPage;

/// Parameters of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub page: usize,
    pub size: usize,
    pub search: String,
}

/// What applying an answer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A newer request is pending; the answer was dropped.
    Stale,
    Updated,
    /// The page no longer exists (its last items were deleted); the last
    /// non-empty page must be loaded instead.
    Refetch(PageRequest),
}

#[derive(Debug, Clone)]
pub struct SourceBrowser {
    search: String,
    page: usize,
    page_size: usize,
    total: u64,
    items: Vec<String>,
    open: bool,
    seq: u64,
}

impl SourceBrowser {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 0,
            page_size: page_size.max(1),
            total: 0,
            items: Vec::new(),
            open: false,
            seq: 0,
        }
    }

    fn request(&mut self, page: usize) -> PageRequest {
        self.seq += 1;
        PageRequest {
            seq: self.seq,
            page,
            size: self.page_size,
            search: self.search.clone(),
        }
    }

    /// Opens the dropdown and loads its first page, or closes it.
    pub fn toggle(&mut self) -> Option<PageRequest> {
        if self.open {
            self.close();
            None
        } else {
            self.open = true;
            Some(self.request(0))
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Changes the search term and reloads from the first page.
    pub fn set_search(&mut self, term: impl Into<String>) -> PageRequest {
        self.search = term.into();
        self.request(0)
    }

    pub fn clear_search(&mut self) -> PageRequest {
        self.set_search(String::new())
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        if self.has_previous() {
            Some(self.request(self.page - 1))
        } else {
            None
        }
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.has_next() {
            Some(self.request(self.page + 1))
        } else {
            None
        }
    }

    /// Reloads the current page, e.g. after a source was deleted.
    pub fn refresh(&mut self) -> PageRequest {
        self.request(self.page)
    }

    /// Applies the answer to `request`.
    pub fn apply(&mut self, request: &PageRequest, result: SourcesPage) -> Applied {
        if !self.is_current(request) {
            return Applied::Stale;
        }

        self.page = request.page;
        self.total = result.total;
        self.items = result.sources;

        if self.items.is_empty() && self.page > 0 && self.total > 0 {
            let last_page = self.page_count().saturating_sub(1).min(self.page - 1);
            return Applied::Refetch(self.request(last_page));
        }
        Applied::Updated
    }

    /// Whether `request` is the latest one issued.
    #[must_use]
    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.seq == self.seq
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        let size = self.page_size as u64;
        let pages = self.total.div_ceil(size);
        usize::try_from(pages).unwrap_or(usize::MAX).max(1)
    }

    /// `"{page} / {pages}"`, 1-based.
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("{} / {}", self.page + 1, self.page_count())
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        ((self.page as u64) + 1) * (self.page_size as u64) < self.total
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for SourceBrowser {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SOURCES_PAGE_SIZE)
    }
}
