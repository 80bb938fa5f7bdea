//! Cursor window over the remote collection.
//!
//! One pager per list view. Cursors are opaque server-minted locators; the
//! pager stores them and hands them back to the transport verbatim, in both
//! directions. A failed load keeps the previously displayed page.

use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::model::{Apartment, ListQuery, Page, PageLocator};
use crate::transport::Transport;

pub struct ResourcePager {
    transport: Arc<dyn Transport>,
    current: PageLocator,
    page: Option<Page>,
}

impl ResourcePager {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, current: PageLocator::first(), page: None }
    }

    /// Pager whose first page is narrowed by server-side query options.
    pub fn with_query(transport: Arc<dyn Transport>, query: &ListQuery) -> Self {
        Self { transport, current: PageLocator::first_with(query), page: None }
    }

    /// The loaded window, empty before the first successful load.
    pub fn items(&self) -> &[Apartment] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn has_next(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.next.is_some())
    }

    pub fn has_prev(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.previous.is_some())
    }

    pub fn current_locator(&self) -> &PageLocator {
        &self.current
    }

    /// Fetch whatever the current locator points at (initial load, reload).
    pub async fn load_current(&mut self) -> ApiResult<()> {
        self.load(self.current.clone()).await
    }

    /// Fetch the page at `locator`; on success it becomes the held page and
    /// current position. On failure both are left untouched and the error is
    /// surfaced as a recoverable `PageLoad`.
    pub async fn load(&mut self, locator: PageLocator) -> ApiResult<()> {
        match self.transport.fetch_page(&locator).await {
            Ok(page) => {
                self.page = Some(page);
                self.current = locator;
                Ok(())
            }
            Err(e) => Err(ApiError::page_load(e)),
        }
    }

    /// Load the next page. `Ok(false)` when the server reported no next
    /// cursor; callers disable the affordance on that answer.
    pub async fn advance(&mut self) -> ApiResult<bool> {
        let Some(next) = self.page.as_ref().and_then(|p| p.next.clone()) else {
            return Ok(false);
        };
        self.load(next).await?;
        Ok(true)
    }

    /// Load the previous page; symmetric with [`Self::advance`].
    pub async fn retreat(&mut self) -> ApiResult<bool> {
        let Some(previous) = self.page.as_ref().and_then(|p| p.previous.clone()) else {
            return Ok(false);
        };
        self.load(previous).await?;
        Ok(true)
    }
}
