mod commands;

use clap::{Parser, Subcommand};
use commands::{encode, serve};
use std::error::Error;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cuzillion")]
#[command(author, version, about = "Config-driven test-page server for browser loading experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    async fn run(self) -> Result<(), Box<dyn Error>> {
        match self.command {
            Commands::Serve(args) => serve::run(args).await,
            Commands::Encode(args) => encode::run(args).await,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Serialize a JSON config into a transport string and resource URL
    Encode(commands::encode::EncodeArgs),
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter (e.g. CUZILLION_LOG=debug)
    let filter = match EnvFilter::try_from_env("CUZILLION_LOG") {
        Ok(f) => f,
        Err(_) => EnvFilter::new("info"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
