//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with oneshot)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = api::build_app(&state).with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("🥐 Bakery server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
