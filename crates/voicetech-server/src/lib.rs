mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use voicetech_config::Config;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// A model that cannot be built does not fail startup; synthesis routes
    /// answer 503 instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the TTS subsystem cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let tts_state = tts::build_server(config)?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler).with_state(Arc::clone(&tts_state)),
            );
        }

        // TTS routes
        app = app.merge(tts::endpoint_router().with_state(tts_state));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
