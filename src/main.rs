use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smth::app::AppContext;
use smth::cli::Cli;
use smth::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns stdout, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(AppContext::default_log_path()?)?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    if let Some((username, password)) = cli.credentials() {
        if let Err(e) = ctx.login(username, password).await {
            eprintln!("{}", e);
        }
    }

    smth::tui::run(&ctx).await?;

    Ok(())
}
