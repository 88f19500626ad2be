use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::dispatch::Dispatcher;
use crate::http::mime::MimeRegistry;

/// The static file server: an address to bind plus the shared dispatcher.
pub struct Server {
    listen_addr: String,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Builds a server from its three startup inputs.
    ///
    /// Fails if the MIME table cannot be read.
    pub fn new(
        listen_addr: impl Into<String>,
        doc_root: impl Into<PathBuf>,
        mime_types: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        let mime_types: PathBuf = mime_types.into();
        let mime = MimeRegistry::load(&mime_types)?;
        Ok(Self {
            listen_addr: listen_addr.into(),
            dispatcher: Arc::new(Dispatcher::new(doc_root, Arc::new(mime))),
        })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(&cfg.listen_addr, &cfg.doc_root, &cfg.mime_types)
    }

    /// Binds the configured address and serves forever.
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        info!("Listening on {}", self.listen_addr);
        self.serve(listener).await
    }

    /// Accepts connections on `listener`, one task per connection.
    ///
    /// Only returns on an accept error, which ends serving altogether.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        info!(
            doc_root = %self.dispatcher.doc_root().display(),
            "Serving files"
        );

        loop {
            let (socket, peer) = listener.accept().await?;
            info!("Accepted connection from {}", peer);

            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, dispatcher);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
                tracing::debug!(%peer, "Connection closed");
            });
        }
    }
}
