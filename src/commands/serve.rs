use std::{error::Error, sync::Arc};

use clap::Args;
use cuzillion::factory::Factory;
use cuzillion::http::server;
use tracing::info;

/// Run the HTTP server.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 9801)]
    pub port: u16,

    /// Origin base URL available for cross-origin links; repeat in
    /// preference order. Falls back to CUZILLION_ORIGINS.
    #[arg(long = "origin", value_name = "URL")]
    pub origins: Vec<String>,
}

pub async fn run(args: ServeArgs) -> Result<(), Box<dyn Error>> {
    let origins = if args.origins.is_empty() {
        Factory::default_origins()
    } else {
        args.origins
    };
    info!(origin_count = origins.len(), "configured origins");

    let factory = Arc::new(Factory::new(Factory::default_url_map(), origins));
    let addr = format!("127.0.0.1:{}", args.port);
    info!(%addr, "starting HTTP server");

    server::run(&addr, factory).await?;

    Ok(())
}
