//! Concord CLI: the `concord` command.

mod cli;
mod commands;
mod config;
mod report;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

// stdout carries the report, so every log line goes to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if env_bool("CONCORD_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            config,
            groups,
            strict,
            json,
        } => commands::check::run(commands::check::Args {
            path,
            config,
            groups,
            strict,
            json,
        }),

        Commands::Groups { config, json } => commands::groups::run(config, json),
    }
}
