//! AdSense Management API client.
//!
//! A low-level HTTP client for the account listing and report generation
//! endpoints, plus the glue that lets the [`Paginator`] drive them: account
//! listing paginates by token, report rows paginate by offset.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tracing::debug;

use adreport_core::{DateRange, ReportTable};

use crate::error::{ApiError, ApiResult};
use crate::page::Page;
use crate::paginator::{BoxFuture, PageSource, Paginator, RowSource};

/// Base URL for the reporting API.
const API_BASE: &str = "https://adsense.googleapis.com/v2";

/// AdSense Management API client.
#[derive(Debug)]
pub struct AdSenseClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl AdSenseClient {
    /// Creates a new client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Updates the access token (after refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Fetches one page of the account list.
    pub async fn list_accounts_page(
        &self,
        page_token: Option<&str>,
        page_size: u64,
    ) -> ApiResult<Page<Account>> {
        let url = format!("{}/accounts", API_BASE);

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("pageSize", page_size.to_string())]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, "accounts"))?;
        let list: AccountListResponse = read_json(response, "accounts").await?;

        debug!("fetched {} accounts", list.accounts.len());

        let mut page = Page::new(list.accounts);
        if let Some(token) = list.next_page_token {
            page = page.with_next_page_token(token);
        }
        Ok(page)
    }

    /// Fetches one offset-indexed page of a report.
    pub async fn report_page(
        &self,
        request: &ReportRequest,
        start_index: u64,
        page_size: u64,
    ) -> ApiResult<ReportResponse> {
        let url = format!("{}/{}/reports:generate", API_BASE, request.account);

        let mut http_request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("startDate", DateRange::format_day(request.date_range.from())),
                ("endDate", DateRange::format_day(request.date_range.to())),
                ("startIndex", start_index.to_string()),
                ("maxResults", page_size.to_string()),
            ]);

        for dimension in &request.dimensions {
            http_request = http_request.query(&[("dimensions", dimension)]);
        }
        for metric in &request.metrics {
            http_request = http_request.query(&[("metrics", metric)]);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| transport_error(e, "reports"))?;
        read_json(response, "reports").await
    }

    /// Generates a full report, paging until the server or the paginator's
    /// row limit is exhausted.
    pub async fn generate_report(
        &self,
        request: ReportRequest,
        paginator: &Paginator,
    ) -> ApiResult<ReportTable> {
        let query = ReportQuery::new(self, request);
        let mut rows: Vec<Vec<String>> = Vec::new();

        paginator
            .fetch_all_rows(&query, |page| rows.extend(page.items))
            .await?;

        let mut table = ReportTable::new(query.into_headers());
        for row in rows {
            table.push_row(row).map_err(|e| {
                ApiError::invalid_response(format!("report row does not match headers: {}", e))
                    .with_endpoint("reports")
            })?;
        }
        Ok(table)
    }
}

impl PageSource<Account> for AdSenseClient {
    fn fetch_page<'a>(
        &'a self,
        page_token: Option<&'a str>,
        page_size: u64,
    ) -> BoxFuture<'a, ApiResult<Page<Account>>> {
        Box::pin(self.list_accounts_page(page_token, page_size))
    }
}

/// Parameters of a report query.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Account resource name, e.g. `accounts/pub-1234567890123456`.
    pub account: String,
    /// Inclusive reporting period.
    pub date_range: DateRange,
    /// Dimension names, e.g. `DATE`, `MONTH`, `COUNTRY_NAME`.
    pub dimensions: Vec<String>,
    /// Metric names, e.g. `CLICKS`, `ESTIMATED_EARNINGS`.
    pub metrics: Vec<String>,
}

/// A report query bound to a client, usable as an offset row source.
///
/// The response headers arrive with every page; the first page's headers are
/// kept so the accumulated rows can be assembled into a [`ReportTable`].
struct ReportQuery<'a> {
    client: &'a AdSenseClient,
    request: ReportRequest,
    headers: Mutex<Vec<String>>,
}

impl<'a> ReportQuery<'a> {
    fn new(client: &'a AdSenseClient, request: ReportRequest) -> Self {
        Self {
            client,
            request,
            headers: Mutex::new(Vec::new()),
        }
    }

    /// Returns the headers seen on the first page, consuming the query.
    fn into_headers(self) -> Vec<String> {
        self.headers.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl RowSource<Vec<String>> for ReportQuery<'_> {
    fn fetch_rows(
        &self,
        start_index: u64,
        page_size: u64,
    ) -> BoxFuture<'_, ApiResult<Page<Vec<String>>>> {
        Box::pin(async move {
            let response = self
                .client
                .report_page(&self.request, start_index, page_size)
                .await?;

            {
                let mut headers = self.headers.lock().unwrap_or_else(|e| e.into_inner());
                if headers.is_empty() {
                    *headers = response.headers.into_iter().map(|h| h.name).collect();
                }
            }

            let mut page = Page::new(response.rows);
            if let Some(total) = response.total_matched_rows {
                page = page.with_total_matched_rows(total);
            }
            Ok(page)
        })
    }
}

/// One account from the accounts listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Resource name, e.g. `accounts/pub-1234567890123456`.
    pub name: String,
    /// Human-readable account name.
    pub display_name: Option<String>,
    /// Account state, e.g. `READY`.
    pub state: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub create_time: Option<String>,
}

/// Response from the accounts listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountListResponse {
    #[serde(default)]
    accounts: Vec<Account>,
    next_page_token: Option<String>,
}

/// Response from the report generation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Column descriptors, one per cell in each row.
    #[serde(default)]
    pub headers: Vec<ReportHeaderField>,
    /// Report rows; each row has one string cell per header.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Total rows matched by the query, across all pages.
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub total_matched_rows: Option<u64>,
}

/// One column descriptor in a report response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeaderField {
    /// Dimension or metric name, e.g. `DATE` or `CLICKS`.
    pub name: String,
    /// Header kind reported by the server, e.g. `DIMENSION`.
    #[serde(rename = "type")]
    pub header_type: Option<String>,
    /// ISO currency code for monetary metrics.
    pub currency_code: Option<String>,
}

/// Accepts both `"123"` and `123`; the API writes int64 fields as strings.
fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Number(u64),
        String(String),
    }

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n)),
        Some(StringOrNumber::String(s)) => s
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Maps a reqwest transport error onto an [`ApiError`].
fn transport_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    let api_error = if error.is_timeout() {
        ApiError::network("request timeout")
    } else if error.is_connect() {
        ApiError::network(format!("connection failed: {}", error))
    } else {
        ApiError::network(format!("request failed: {}", error))
    };
    api_error.with_endpoint(endpoint)
}

/// Checks the response status and deserializes the JSON body.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> ApiResult<T> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());
        return Err(ApiError::rate_limited(format!(
            "rate limit exceeded{}",
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        ))
        .with_endpoint(endpoint));
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(
            ApiError::authentication("access token expired or invalid").with_endpoint(endpoint)
        );
    }

    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(ApiError::authorization("access denied").with_endpoint(endpoint));
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::not_found("resource not found").with_endpoint(endpoint));
    }

    if status == reqwest::StatusCode::BAD_REQUEST {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::bad_request(format!("invalid request: {}", body))
            .with_endpoint(endpoint));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(
            ApiError::server(format!("API error ({}): {}", status, body)).with_endpoint(endpoint)
        );
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::network(format!("failed to read response: {}", e)))?;

    serde_json::from_str(&body).map_err(|e| {
        ApiError::invalid_response(format!("failed to parse response: {}", e))
            .with_endpoint(endpoint)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_account_list_response() {
        let json = r#"{
            "accounts": [
                {
                    "name": "accounts/pub-1234567890123456",
                    "displayName": "My AdSense Account",
                    "state": "READY",
                    "createTime": "2019-06-01T00:00:00Z"
                }
            ],
            "nextPageToken": "token-2"
        }"#;

        let response: AccountListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.accounts.len(), 1);
        assert_eq!(response.accounts[0].name, "accounts/pub-1234567890123456");
        assert_eq!(response.next_page_token, Some("token-2".to_string()));
    }

    #[test]
    fn parse_account_list_without_accounts() {
        let response: AccountListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.accounts.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn parse_report_response() {
        let json = r#"{
            "headers": [
                {"name": "DATE", "type": "DIMENSION"},
                {"name": "ESTIMATED_EARNINGS", "type": "METRIC_CURRENCY", "currencyCode": "EUR"}
            ],
            "rows": [
                ["2024-01-01", "1.23"],
                ["2024-01-03", "4.56"]
            ],
            "totalMatchedRows": "2"
        }"#;

        let response: ReportResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.headers[1].currency_code, Some("EUR".to_string()));
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.total_matched_rows, Some(2));
    }

    #[test]
    fn total_matched_rows_accepts_numbers_and_strings() {
        let as_number: ReportResponse =
            serde_json::from_str(r#"{"totalMatchedRows": 5000}"#).unwrap();
        assert_eq!(as_number.total_matched_rows, Some(5000));

        let as_string: ReportResponse =
            serde_json::from_str(r#"{"totalMatchedRows": "5000"}"#).unwrap();
        assert_eq!(as_string.total_matched_rows, Some(5000));

        let absent: ReportResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.total_matched_rows, None);
    }
}
