use anyhow::Result;
use tabmon::commands::Cli;
use tabmon::libs::console::Console;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    // Logs go to stderr so they never interleave with the rendered activity log.
    // The console writer keeps them legible while `watch` holds raw mode.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Console)
        .try_init();

    Cli::menu().await
}
