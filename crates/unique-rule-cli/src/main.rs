//! # unique-check CLI Entry Point

use clap::Parser;

/// Check JSON/YAML arrays for records sharing a field value.
///
/// Comparison is case-insensitive; records with a missing or falsy value
/// are ignored.
#[derive(Parser, Debug)]
#[command(name = "unique-check", version, about)]
struct Cli {
    #[command(flatten)]
    check: unique_rule_cli::check::CheckArgs,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    unique_rule_cli::check::run(&cli.check)
}
