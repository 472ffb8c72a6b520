//! futbot - USDT-M futures testnet order tool - entry point.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use futbot_cli::error::exit_code;
use futbot_cli::{AppConfig, AppResult, Application, Cli, Presenter};
use futbot_exchange::Session;
use futbot_telemetry::ConsoleOptions;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let presenter = Presenter::detect(cli.no_color);
    let mut stdout = io::stdout();

    if !cli.no_banner {
        writeln!(stdout, "{}", presenter.banner()).context("writing banner")?;
    }

    let result = match open_session(&cli, &presenter).await {
        Ok((app, session)) => {
            writeln!(stdout, "{}", presenter.connected(&session)).context("writing status")?;
            writeln!(stdout, "{}", presenter.progress(cli.command.label()))
                .context("writing status")?;
            app.execute(&session, &cli.command).await
        }
        Err(err) => Err(err),
    };

    let code = match result {
        Ok(outcome) => {
            writeln!(stdout, "{}", presenter.outcome(&outcome)).context("writing result")?;
            exit_code::SUCCESS
        }
        Err(err) => {
            // The presenter report below is the operator-facing copy.
            error!(error = %err, exit_code = err.exit_code(), "Command failed");
            writeln!(io::stderr(), "{}", presenter.error(&err)).context("writing error report")?;
            err.exit_code()
        }
    };

    Ok(ExitCode::from(code))
}

/// Load configuration, start logging, and open the exchange session.
async fn open_session(cli: &Cli, presenter: &Presenter) -> AppResult<(Application, Session)> {
    let config = AppConfig::load(cli.config.as_deref())?;
    futbot_telemetry::init_logging(
        &config.logging,
        ConsoleOptions {
            verbose: cli.verbose,
            ansi: presenter.uses_color() && io::stderr().is_terminal(),
        },
    )?;

    info!("Starting futbot v{}", env!("CARGO_PKG_VERSION"));
    info!(base_url = %config.exchange.base_url, command = ?cli.command, "Configuration loaded");

    let app = Application::new(config);
    let credentials = app.load_credentials()?;
    let session = app.connect(credentials).await?;
    Ok((app, session))
}
