//! Server wiring: shared state, middleware, listener

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::engine::Engine;
use crate::error::Result;

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

pub struct PostcalServer {
    config: ServerConfig,
    bind_address: SocketAddr,
    state: AppState,
}

impl PostcalServer {
    pub fn new(engine: Arc<Engine>, config: ServerConfig) -> Result<Self> {
        let bind_address = config.socket_addr()?;

        Ok(Self {
            config,
            bind_address,
            state: AppState::new(engine),
        })
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    pub async fn start(&self) -> Result<()> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown_signal` resolves
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let router = self.build_router();

        tracing::info!(address = %self.bind_address, "Starting postcal API server");

        let listener = tokio::net::TcpListener::bind(self.bind_address).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
