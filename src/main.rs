use classface::{cli::{self, Cli}, Response};

use clap::{error::ErrorKind, Parser};
use anyhow::{Context, Result};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let reason = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            return emit(&Response::failure(format!("Invalid arguments: {}", reason)));
        }
    };

    // Setup logging based on mode
    setup_logging(cli.dev);

    let response = cli::run(&cli);
    emit(&response)
}

/// Stdout carries exactly one JSON object; the exit status is always 0.
fn emit(response: &Response) -> Result<()> {
    let json = response.to_json().context("Failed to encode response")?;
    println!("{}", json);
    Ok(())
}

fn setup_logging(dev_mode: bool) {
    if dev_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
}
