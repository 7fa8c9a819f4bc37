use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionSettings};
use crate::site::Dispatcher;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(&cfg.site)?);
    info!(root = %dispatcher.policy().root().display(), "Serving document root");

    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, dispatcher, ConnectionSettings::from(&cfg.server)).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    settings: ConnectionSettings,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, dispatcher, settings);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            tracing::debug!("Closed connection from {}", peer);
        });
    }
}
