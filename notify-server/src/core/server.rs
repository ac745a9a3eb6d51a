//! HTTP server
//!
//! Binds the listener, starts background tasks and serves until Ctrl-C.

use crate::api;
use crate::core::error::BoxError;
use crate::core::{Config, ServerState};

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<(), BoxError> {
        let state = ServerState::initialize(&self.config).await?;

        let tasks = state.start_background_tasks();
        let shutdown = tasks.shutdown_token();

        let app = api::build_app(state.clone());
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!(
            "notify-server listening on {} (env: {}, transport: {:?}, members: {})",
            addr,
            self.config.environment,
            state.engine.transport_mode(),
            state.roster.len()
        );

        let signal = async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down..."),
                _ = shutdown.cancelled() => {}
            }
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await;

        tasks.shutdown().await;
        served?;
        Ok(())
    }
}
