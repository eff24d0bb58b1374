//! Tabular report data.
//!
//! This module defines [`ReportTable`], the in-memory representation of a
//! reporting endpoint response: an ordered list of column headers and one
//! string tuple per row. The single structural invariant is that every row
//! has exactly one cell per header.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a report table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A row was appended whose cell count does not match the header count.
    #[error("row has {actual} cells but the table has {expected} headers")]
    ArityMismatch {
        /// Number of headers in the table.
        expected: usize,
        /// Number of cells in the rejected row.
        actual: usize,
    },
}

/// A tabular report: ordered headers plus string rows.
///
/// Invariant: every row's length equals the header count. Rows are only
/// appended through [`ReportTable::push_row`], which enforces this;
/// deserialization goes through the same check and rejects payloads with
/// mismatched rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct ReportTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Mirror of the serialized shape, before the arity invariant is checked.
#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for ReportTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = ReportTable::new(raw.headers);
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl ReportTable {
    /// Creates an empty table with the given headers.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Appends a row to the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArityMismatch`] if the row's cell count does
    /// not match the header count.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::ArityMismatch {
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a row known to have the right arity.
    ///
    /// Only for rows constructed from this table's own header count.
    pub(crate) fn push_row_unchecked(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    /// Returns the column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the index of the column with the given header, if present.
    ///
    /// Header comparison is exact; reporting APIs use fixed upper-case
    /// dimension names such as `DATE` and `MONTH`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn push_row_matching_arity() {
        let mut table = ReportTable::new(headers(&["DATE", "CLICKS"]));
        table
            .push_row(vec!["2024-01-01".to_string(), "42".to_string()])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][1], "42");
    }

    #[test]
    fn push_row_wrong_arity_rejected() {
        let mut table = ReportTable::new(headers(&["DATE", "CLICKS"]));
        let err = table.push_row(vec!["2024-01-01".to_string()]).unwrap_err();

        assert_eq!(
            err,
            TableError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn column_index_is_exact() {
        let table = ReportTable::new(headers(&["DATE", "MONTH", "EARNINGS"]));

        assert_eq!(table.column_index("MONTH"), Some(1));
        assert_eq!(table.column_index("month"), None);
        assert_eq!(table.column_index("CLICKS"), None);
    }

    #[test]
    fn serde_round_trip() {
        let mut table = ReportTable::new(headers(&["DATE"]));
        table.push_row(vec!["2024-01-01".to_string()]).unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let back: ReportTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.headers(), table.headers());
        assert_eq!(back.rows(), table.rows());
    }

    #[test]
    fn deserialize_rejects_short_rows() {
        let json = r#"{"headers":["CLICKS","DATE"],"rows":[["5"]]}"#;
        let err = serde_json::from_str::<ReportTable>(json).unwrap_err();
        assert!(err.to_string().contains("2 headers"));
    }

    #[test]
    fn deserialize_defaults_missing_fields() {
        let table: ReportTable = serde_json::from_str("{}").unwrap();
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
    }
}
