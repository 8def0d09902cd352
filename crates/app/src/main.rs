mod args;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Init, Open, Pubkey, Seal};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use state::AppState;

command_enum! {
    (Init, Init),
    (Pubkey, Pubkey),
    (Seal, Seal),
    (Open, Open),
}

fn main() {
    let args = Args::parse();

    // --log-level wins, then config.toml, then info
    let log_level = args.log_level.clone().unwrap_or_else(|| {
        AppState::load(args.config_path.clone())
            .map(|state| state.config.log_level)
            .unwrap_or_else(|_| "info".to_string())
    });
    init_tracing(&log_level);

    let ctx = op::OpContext::new(args.config_path);

    match args.command.execute(&ctx) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so that sealed and opened text on stdout stays clean
fn init_tracing(log_level: &str) {
    let log_level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
