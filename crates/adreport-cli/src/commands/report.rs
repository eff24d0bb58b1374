//! The `report` subcommand.

use chrono::NaiveDate;

use adreport_client::{Paginator, ReportRequest};
use adreport_core::{DateRange, ReportTable, fill_date_gaps};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Arguments for one report run.
#[derive(Debug)]
pub struct ReportArgs {
    pub account: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub fill_gaps: bool,
    pub page_size: Option<u64>,
    pub row_limit: Option<u64>,
}

/// Fetches a report, optionally fills date gaps, and prints it.
pub async fn run(config: &CliConfig, args: ReportArgs) -> CliResult<()> {
    let date_range = DateRange::new(args.from, args.to)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let client = super::authenticated_client(config).await?;
    let paginator = Paginator::new()
        .with_page_size(args.page_size.unwrap_or(config.report.page_size))
        .with_row_limit(args.row_limit.unwrap_or(config.report.row_limit));

    let request = ReportRequest {
        account: args.account,
        date_range,
        dimensions: args.dimensions,
        metrics: args.metrics,
    };

    let mut table = client.generate_report(request, &paginator).await?;
    if args.fill_gaps {
        fill_date_gaps(&mut table, &date_range);
    }

    print_table(&table);
    Ok(())
}

/// Prints the table with space-aligned columns.
fn print_table(table: &ReportTable) {
    if table.headers().is_empty() {
        println!("Report contains no data.");
        return;
    }

    let widths = column_widths(table);

    let header_line: Vec<String> = table
        .headers()
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_line.join("  "));

    for row in table.rows() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", line.join("  "));
    }

    println!();
    println!("{} rows", table.len());
}

/// Returns the display width of each column.
fn column_widths(table: &ReportTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers().iter().map(|h| h.len()).collect();
    for row in table.rows() {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_cover_headers_and_cells() {
        let mut table = ReportTable::new(vec!["DATE".to_string(), "C".to_string()]);
        table
            .push_row(vec!["2024-01-01".to_string(), "12345".to_string()])
            .unwrap();

        assert_eq!(column_widths(&table), vec![10, 5]);
    }
}
