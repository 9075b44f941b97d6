mod app;
mod cli;
mod commands;
mod gh;
mod git;
mod pr;
mod shared;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use shared::config::load_config;
use shared::logging::{self, LogLevel};
use shared::process::ProcessRunner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Printing fails only when the stream is closed; nowhere left to report it
            let _ = err.print();
            // Help and version go to stdout and are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match &cli.command {
        Some(Commands::Config(config_cmd)) => {
            return match config_cmd.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "gfp", &mut std::io::stdout());
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log.level
    };
    logging::init(level, cli.log_format.unwrap_or(config.log.format));

    let runner = ProcessRunner::new(config.process.timeout());
    app::run(&runner, &app::NoPackageCommands, &cli.request())
        .await
        .into()
}
