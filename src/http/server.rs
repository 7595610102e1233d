use std::sync::Arc;

use tokio::io;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::factory::Factory;

use super::handler::handle_client;

pub async fn run(address: &str, factory: Arc<Factory>) -> io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Server listening on {}", listener.local_addr()?);
    run_with_listener(listener, factory).await
}

/// Accept loop over an already-bound listener, so callers (and tests) can
/// bind port 0 and learn the local address first.
pub async fn run_with_listener(listener: TcpListener, factory: Arc<Factory>) -> io::Result<()> {
    loop {
        let (stream, _) = listener.accept().await?;
        let factory = Arc::clone(&factory);
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, &factory).await {
                error!("Error handling client: {}", e);
            }
        });
    }
}
