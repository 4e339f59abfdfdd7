use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gridcfg_cli::GridcfgCli;

fn main() {
    init_log();
    let cli = GridcfgCli::parse();
    if let Err(e) = gridcfg_cli::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("GRIDCFG_LOG")
                .from_env_lossy(),
        )
        .init();
}
