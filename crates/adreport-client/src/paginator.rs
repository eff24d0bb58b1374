//! Cursor-based pagination over listing and report endpoints.
//!
//! Two cursor disciplines exist in the wild:
//!
//! - **Token cursor**: each page carries an opaque `nextPageToken`; the
//!   client passes it through verbatim until the server omits it.
//! - **Offset cursor**: the client asks for rows `[startIndex,
//!   startIndex + pageSize)` and loops while `startIndex` is below the
//!   server's `totalMatchedRows`, bounded by a hard row limit.
//!
//! [`Paginator`] drives either discipline against a [`PageSource`] or
//! [`RowSource`], handing every fetched page to a consumer exactly once, in
//! cursor order. No retry or backoff lives here; transport errors propagate
//! to the caller.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::ApiResult;
use crate::page::Page;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Default hard cap on total rows fetched by offset pagination.
pub const DEFAULT_ROW_LIMIT: u64 = 5000;

/// A boxed future for async trait methods.
///
/// This is used because async functions in traits are not yet stable in a way
/// that works well with dynamic dispatch. Using boxed futures allows the
/// source traits to be object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A listing endpoint paginated by opaque page token.
pub trait PageSource<T>: Send + Sync {
    /// Fetches one page.
    ///
    /// `page_token` is `None` for the first request; later requests pass the
    /// previous page's token through unchanged.
    fn fetch_page<'a>(
        &'a self,
        page_token: Option<&'a str>,
        page_size: u64,
    ) -> BoxFuture<'a, ApiResult<Page<T>>>;
}

/// A report endpoint paginated by row offset.
pub trait RowSource<T>: Send + Sync {
    /// Fetches up to `page_size` rows starting at `start_index` (0-based).
    fn fetch_rows(&self, start_index: u64, page_size: u64) -> BoxFuture<'_, ApiResult<Page<T>>>;
}

/// Drives a page source to exhaustion.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: u64,
    row_limit: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl Paginator {
    /// Creates a paginator with default page size and row limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the per-request page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder method to set the hard row cap for offset pagination.
    #[must_use]
    pub fn with_row_limit(mut self, row_limit: u64) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Returns the configured page size.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the configured row limit.
    pub fn row_limit(&self) -> u64 {
        self.row_limit
    }

    /// Fetches every page of a token-cursor endpoint.
    ///
    /// Each non-empty page is handed to `consumer` once, in server order.
    /// Terminates when a page carries no next token or comes back empty (the
    /// dataset may legitimately shrink between calls). Returns the number of
    /// items visited.
    ///
    /// # Errors
    ///
    /// Propagates the first fetch error unchanged; pages already consumed
    /// stay consumed.
    pub async fn fetch_all_pages<T, S, F>(&self, source: &S, mut consumer: F) -> ApiResult<u64>
    where
        S: PageSource<T> + ?Sized,
        F: FnMut(Page<T>),
    {
        let mut cursor: Option<String> = None;
        let mut visited = 0u64;

        loop {
            let page = source.fetch_page(cursor.as_deref(), self.page_size).await?;
            if page.is_empty() {
                debug!("received empty page, stopping token pagination");
                break;
            }

            let next = page.next_token().map(str::to_string);
            visited += page.len() as u64;
            consumer(page);

            match next {
                Some(token) => cursor = Some(token),
                None => break,
            }
        }

        debug!("token pagination visited {} items", visited);
        Ok(visited)
    }

    /// Fetches every row of an offset-cursor endpoint, up to the row limit.
    ///
    /// Advances by the number of rows actually returned and shrinks the
    /// requested size near the cap so the final request never overshoots.
    /// A later page coming back empty (the dataset shrank server-side since
    /// the first page) is a normal early stop, not an error. Returns the
    /// number of rows visited.
    pub async fn fetch_all_rows<T, S, F>(&self, source: &S, mut consumer: F) -> ApiResult<u64>
    where
        S: RowSource<T> + ?Sized,
        F: FnMut(Page<T>),
    {
        let mut start = 0u64;

        loop {
            let want = self.page_size.min(self.row_limit.saturating_sub(start));
            if want == 0 {
                debug!("row limit {} reached", self.row_limit);
                break;
            }

            let page = source.fetch_rows(start, want).await?;
            if page.is_empty() {
                debug!("received empty page at row {}, stopping", start);
                break;
            }

            let returned = page.len() as u64;
            // Read the freshest total each page; it can change if the
            // underlying dataset is mutated between calls.
            let total = page.total_matched_rows;
            consumer(page);
            start += returned;

            match total {
                Some(total) if start < total.min(self.row_limit) => {}
                _ => break,
            }
        }

        debug!("offset pagination visited {} rows", start);
        Ok(start)
    }
}
