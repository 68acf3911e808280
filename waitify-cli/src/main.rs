//! waitify - minimal HTTP API server
//!
//! Serves `GET /` and optionally attaches a database client chosen with
//! `--backend`. Every flag can also be set through its environment
//! variable, and a `.env` file in the working directory is loaded first.

use anyhow::Result;
use clap::Parser;

mod server;
mod tracing_setup;

use server::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "waitify",
    author,
    version,
    about = "Minimal HTTP API server with an optional database client"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load before parsing so env fallbacks see .env values
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    match dotenv {
        Ok(path) => tracing::debug!("Loaded .env from {}", path.display()),
        Err(e) => tracing::debug!("No .env loaded: {}", e),
    }

    server::run_server(cli.serve).await
}
