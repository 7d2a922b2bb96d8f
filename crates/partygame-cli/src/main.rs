use std::process::ExitCode;

use clap::Parser;
use partygame_cli::config::Cli;
use partygame_cli::error::AppError;
use partygame_cli::run::run;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<(), AppError> {
    let view = run(cli.action, &cli.config)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
