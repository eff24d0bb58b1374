//! adreport CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use adreport_cli::cli::{AuthAction, Cli, Command, ConfigAction};
use adreport_cli::commands;
use adreport_cli::config::CliConfig;
use adreport_cli::error::{CliError, CliResult};
use adreport_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        CliConfig::load_from(path).map_err(CliError::Config)?
    } else {
        CliConfig::load().unwrap_or_default()
    };

    match cli.command {
        Command::Accounts { page_size } => commands::accounts::run(&config, page_size).await,
        Command::Report {
            account,
            from,
            to,
            dimensions,
            metrics,
            fill_gaps,
            page_size,
            row_limit,
        } => {
            commands::report::run(
                &config,
                commands::report::ReportArgs {
                    account,
                    from,
                    to,
                    dimensions,
                    metrics,
                    fill_gaps,
                    page_size,
                    row_limit,
                },
            )
            .await
        }
        Command::Auth { action } => match action {
            AuthAction::Import {
                refresh_token,
                scopes,
            } => commands::auth::import(&config, refresh_token, scopes),
            AuthAction::Status => commands::auth::status(&config),
            AuthAction::Clear => commands::auth::clear(&config),
        },
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
