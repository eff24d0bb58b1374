//! A single page of a paginated listing or report response.

/// One server response to a list/report request.
///
/// Listing endpoints advance with an opaque `next_page_token`; row-indexed
/// report endpoints advance by offset and report `total_matched_rows`
/// instead. Both shapes map onto this type.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page, in server order. May be empty.
    pub items: Vec<T>,
    /// Token to fetch the next page. `None` or empty means no more pages.
    pub next_page_token: Option<String>,
    /// Total rows matched by the query (row-indexed pagination only).
    pub total_matched_rows: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a page with the given items and no cursor metadata.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
            total_matched_rows: None,
        }
    }

    /// Builder method to set the next page token.
    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    /// Builder method to set the total matched row count.
    pub fn with_total_matched_rows(mut self, total: u64) -> Self {
        self.total_matched_rows = Some(total);
        self
    }

    /// Returns the next page token, treating an empty string as absent.
    ///
    /// Some servers signal the last page with `""` rather than omitting the
    /// field; both mean the same thing.
    pub fn next_token(&self) -> Option<&str> {
        match self.next_page_token.as_deref() {
            Some("") | None => None,
            Some(token) => Some(token),
        }
    }

    /// Returns true if the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_means_no_more_pages() {
        let page = Page::new(vec![1, 2]).with_next_page_token("");
        assert_eq!(page.next_token(), None);

        let page = Page::new(vec![1, 2]);
        assert_eq!(page.next_token(), None);

        let page = Page::new(vec![1, 2]).with_next_page_token("abc");
        assert_eq!(page.next_token(), Some("abc"));
    }

    #[test]
    fn page_builder() {
        let page = Page::new(vec!["a", "b"]).with_total_matched_rows(17);
        assert_eq!(page.len(), 2);
        assert!(!page.is_empty());
        assert_eq!(page.total_matched_rows, Some(17));
    }
}
