//! Gap filling for sparse time-series report tables.
//!
//! Reporting endpoints omit rows for days or months with no activity. For
//! downstream consumers that expect a dense series (plots, spreadsheets),
//! [`fill_date_gaps`] appends one placeholder row per missing day and per
//! missing month in the requested range.

use std::collections::HashSet;

use tracing::debug;

use crate::table::ReportTable;
use crate::time::DateRange;

/// Header name of the day dimension column.
pub const DATE_HEADER: &str = "DATE";

/// Header name of the month dimension column.
pub const MONTH_HEADER: &str = "MONTH";

/// Placeholder written into the non-dimension cells of synthetic rows.
pub const NOT_AVAILABLE: &str = "N/A";

/// Appends placeholder rows so every day and month in `range` appears.
///
/// Tables without a `DATE` or `MONTH` header are left untouched. Existing
/// rows are never mutated; synthetic rows (all cells [`NOT_AVAILABLE`]
/// except the dimension columns) are appended after the original rows, days
/// first, then any months still missing.
///
/// Calling this twice on the same table with the same range adds nothing
/// the second time, but a table that already contains `N/A` placeholder
/// rows from an earlier, different range is not deduplicated. Fill once,
/// right after fetching.
pub fn fill_date_gaps(table: &mut ReportTable, range: &DateRange) {
    let date_col = table.column_index(DATE_HEADER);
    let month_col = table.column_index(MONTH_HEADER);

    if date_col.is_none() && month_col.is_none() {
        return;
    }

    let width = table.headers().len();
    let mut added = 0usize;

    if let Some(date_col) = date_col {
        let seen: HashSet<String> = table.rows().iter().map(|r| r[date_col].clone()).collect();

        for day in range.days() {
            let key = DateRange::format_day(day);
            if seen.contains(&key) {
                continue;
            }
            let mut row = vec![NOT_AVAILABLE.to_string(); width];
            row[date_col] = key;
            if let Some(month_col) = month_col {
                row[month_col] = DateRange::format_month(day);
            }
            table.push_row_unchecked(row);
            added += 1;
        }
    }

    if let Some(month_col) = month_col {
        // Day filling above already stamps the month column, so months it
        // covered are seen here and not filled twice.
        let seen: HashSet<String> = table.rows().iter().map(|r| r[month_col].clone()).collect();

        for month in range.months() {
            let key = DateRange::format_month(month);
            if seen.contains(&key) {
                continue;
            }
            let mut row = vec![NOT_AVAILABLE.to_string(); width];
            row[month_col] = key;
            table.push_row_unchecked(row);
            added += 1;
        }
    }

    if added > 0 {
        debug!("filled {} missing date/month rows", added);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
        .unwrap()
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> ReportTable {
        let mut t = ReportTable::new(headers.iter().map(|s| s.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|s| s.to_string()).collect())
                .unwrap();
        }
        t
    }

    #[test]
    fn no_dimension_headers_is_untouched() {
        let mut t = table(&["COUNTRY", "CLICKS"], &[&["US", "10"]]);
        fill_date_gaps(&mut t, &range((2024, 1, 1), (2024, 1, 31)));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn fills_single_missing_day() {
        let mut t = table(
            &["DATE", "CLICKS"],
            &[&["2024-01-01", "5"], &["2024-01-03", "7"]],
        );
        fill_date_gaps(&mut t, &range((2024, 1, 1), (2024, 1, 3)));

        assert_eq!(t.len(), 3);
        // Originals precede synthetics and are unchanged.
        assert_eq!(t.rows()[0], vec!["2024-01-01", "5"]);
        assert_eq!(t.rows()[1], vec!["2024-01-03", "7"]);
        assert_eq!(t.rows()[2], vec!["2024-01-02", "N/A"]);
    }

    #[test]
    fn dense_table_gains_nothing() {
        let mut t = table(
            &["DATE", "CLICKS"],
            &[
                &["2024-01-01", "1"],
                &["2024-01-02", "2"],
                &["2024-01-03", "3"],
            ],
        );
        fill_date_gaps(&mut t, &range((2024, 1, 1), (2024, 1, 3)));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn empty_table_with_date_header_fills_every_day() {
        let mut t = table(&["DATE", "EARNINGS"], &[]);
        fill_date_gaps(&mut t, &range((2024, 2, 27), (2024, 3, 1)));

        let dates: Vec<&str> = t.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
        assert!(t.rows().iter().all(|r| r[1] == "N/A"));
    }

    #[test]
    fn synthetic_day_rows_stamp_month_column() {
        let mut t = table(&["DATE", "MONTH", "CLICKS"], &[&["2024-01-01", "2024-01", "5"]]);
        fill_date_gaps(&mut t, &range((2024, 1, 1), (2024, 1, 2)));

        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[1], vec!["2024-01-02", "2024-01", "N/A"]);
    }

    #[test]
    fn fills_missing_months() {
        let mut t = table(
            &["MONTH", "EARNINGS"],
            &[&["2024-01", "100"], &["2024-03", "50"]],
        );
        fill_date_gaps(&mut t, &range((2024, 1, 1), (2024, 3, 31)));

        assert_eq!(t.len(), 3);
        assert_eq!(t.rows()[2], vec!["2024-02", "N/A"]);
    }

    #[test]
    fn refilling_a_dense_result_is_a_no_op() {
        let mut t = table(&["DATE", "CLICKS"], &[&["2024-01-02", "9"]]);
        let r = range((2024, 1, 1), (2024, 1, 3));
        fill_date_gaps(&mut t, &r);
        let after_first = t.len();
        fill_date_gaps(&mut t, &r);
        assert_eq!(t.len(), after_first);
    }
}
