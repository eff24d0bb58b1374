//! The `accounts` subcommand.

use adreport_client::Paginator;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Lists every account the authorized user can access.
pub async fn run(config: &CliConfig, page_size: Option<u64>) -> CliResult<()> {
    let client = super::authenticated_client(config).await?;
    let paginator =
        Paginator::new().with_page_size(page_size.unwrap_or(config.report.page_size));

    let mut total = 0u64;
    paginator
        .fetch_all_pages(&client, |page| {
            for account in &page.items {
                let display = account.display_name.as_deref().unwrap_or("-");
                let state = account.state.as_deref().unwrap_or("-");
                println!("{}  {}  {}", account.name, display, state);
            }
            total += page.len() as u64;
        })
        .await?;

    if total == 0 {
        println!("No accounts found.");
    }
    Ok(())
}
