use tokio::net::TcpListener;

use crate::{catalog::CatalogScanner, config::ServiceConfig, RedviewResult};

use super::{routes::create_router, state::ServerState};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The HTTP server exposing the photo catalog and the media files behind it.
pub struct CatalogServer {
    /// The resolved service configuration.
    config: ServiceConfig,

    /// The state shared with every handler.
    state: ServerState,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CatalogServer {
    /// Creates a server for the given configuration.
    pub fn new(config: ServiceConfig) -> RedviewResult<Self> {
        let scanner = CatalogScanner::new(config.get_media_root())?;
        if !scanner.get_media_root().is_dir() {
            tracing::warn!(
                "media root {} is not a directory, every rover will be reported missing",
                scanner.get_media_root().display()
            );
        }

        Ok(Self {
            config,
            state: ServerState::new(scanner),
        })
    }

    /// Binds the configured address and serves until the process is stopped.
    pub async fn start(&self) -> RedviewResult<()> {
        let listener =
            TcpListener::bind((self.config.get_host().as_str(), *self.config.get_port())).await?;
        self.serve(listener).await
    }

    /// Serves requests accepted on `listener`.
    pub async fn serve(&self, listener: TcpListener) -> RedviewResult<()> {
        tracing::info!(
            "rover media service listening on {} ({})",
            listener.local_addr()?,
            self.config.public_url()
        );
        tracing::info!(
            "serving media from {}",
            self.state.scanner().get_media_root().display()
        );

        axum::serve(listener, create_router(self.state.clone())).await?;
        Ok(())
    }
}
