//! Console Entry Point
//!
//! Uses `anyhow` for startup errors; command failures are reported as
//! `kernel::error::AppError`.

mod app;
mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,auth=info,platform=info,roster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = App::new(&cli)?;

    if let Err(e) = app.run(&cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}
