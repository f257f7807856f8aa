//! Read-only HTTP API over the snapshots written by the ingestors.
//!
//! Every route lives under `/v1` and answers with the [`dto::ApiResponse`]
//! envelope. `/health` and the OpenAPI document are served alongside.

pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;

use anyhow::Context;
use deadpool_diesel::postgres::Pool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pragma_common::services::{Service, ServiceRunner};

use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address
                .parse()
                .with_context(|| format!("invalid API address {address}"))?;
            let listener = TcpListener::bind(socket_addr)
                .await
                .with_context(|| format!("failed to bind {socket_addr}"))?;

            let app = api_router(state.clone())
                .with_state(state)
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive());

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
                .context("😱 API server stopped!")
        });

        Ok(())
    }
}
