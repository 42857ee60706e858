//! Main server implementation

use crate::{api, config::Config, Result};
use blog_app_storage::StorageManager;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// HTTP server serving the blog API
pub struct Server {
    config: Config,
    storage: Arc<StorageManager>,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing server components");

        // Migrations run inside StorageManager::new when enabled
        let storage = Arc::new(StorageManager::new(&config.storage_config()).await?);

        Ok(Self { config, storage })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server_addr()?;
        let app = api::router(self.storage.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("BlogApp listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown())
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
