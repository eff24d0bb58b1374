//! Pagination, credential storage, and the reporting API client.
//!
//! This crate provides the protocol layer for fetching paginated listings
//! and reports from Google-style REST APIs:
//!
//! - [`Paginator`] - Drives token-cursor and offset-cursor endpoints
//! - [`PageSource`] / [`RowSource`] - The seams a concrete endpoint implements
//! - [`CredentialStore`] - Cached OAuth refresh credentials on disk
//! - [`OAuthClient`] - Refresh token to access token exchange
//! - [`AdSenseClient`] - A concrete client for the AdSense Management API
//! - [`ApiError`] - Error types for all of the above
//!
//! # Example
//!
//! ```ignore
//! use adreport_client::{AdSenseClient, Paginator};
//!
//! let paginator = Paginator::new().with_page_size(50);
//! paginator
//!     .fetch_all_pages(&client, |page| {
//!         for account in &page.items {
//!             println!("{}", account.name);
//!         }
//!     })
//!     .await?;
//! ```

pub mod adsense;
pub mod credentials;
pub mod error;
pub mod oauth;
pub mod page;
pub mod paginator;

// Re-export main types at crate root
pub use adsense::{Account, AdSenseClient, ReportRequest, ReportResponse};
pub use credentials::{Credential, CredentialStore};
pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use oauth::OAuthClient;
pub use page::Page;
pub use paginator::{
    BoxFuture, DEFAULT_PAGE_SIZE, DEFAULT_ROW_LIMIT, PageSource, Paginator, RowSource,
};
