// SPDX-License-Identifier: GPL-3.0-only

use capture_info::BackendKind;
use capture_info::ReportConfig;
use capture_info::constants::{BACKEND_ENV, DEFAULT_LOG_FILTER, EXIT_FAILURE, EXIT_USAGE};
use clap::Parser;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "capture-info")]
#[command(about = "List audio and video capture devices and their formats as JSON")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Filter by device name (exact, case-sensitive)
    #[arg(short, long)]
    name: Option<String>,

    /// Device enumeration backend
    #[arg(short, long, value_enum, default_value_t = BackendKind::Auto, env = BACKEND_ENV)]
    backend: BackendKind,

    /// Print the JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig {
            name_filter: self.name,
            backend: self.backend,
            pretty: !self.compact,
        }
    }
}

/// Exit status for a failed parse; `--help` and `--version` also land here
fn parse_error_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_USAGE } else { 0 }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the JSON document
    // Set RUST_LOG to control the level, e.g. RUST_LOG=capture_info=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_error_exit_code(&e));
        }
    };

    match cli::list_devices(&cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("capture-info: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
