//! # Stormpath CLI
//!
//! Command-line tools for managing a hosted identity service.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

use std::io::Write;

use clap::Parser;
use sp_cli::{cli::Cli, config::CliConfig, output::error, run, HttpIdentityService, IdentityService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(format!("warn,sp_cli={}", level))
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    let code = run(
        &cli,
        CliConfig::load,
        |config| {
            let service = HttpIdentityService::from_config(config)?;
            Ok(Box::new(service) as Box<dyn IdentityService>)
        },
        &mut stdout,
    )
    .await;

    if let Err(e) = stdout.flush() {
        error(&format!("Failed to flush output: {}", e));
    }
    std::process::exit(code);
}
