// src/serve/mod.rs

//! Dev server: serves the build output directory as static content and
//! pushes reload frames to connected browser clients over a WebSocket.
//!
//! The server is a pure subscriber of the reload channel — it knows nothing
//! about tasks or the watcher, only that `ReloadEvent`s arrive and each one
//! becomes a JSON frame on every open socket. Clients connect to
//! `/__assetpipe/reload` and refresh on any frame.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::reload::{ReloadReceiver, ReloadSender};

/// Run the dev server until the process exits.
pub async fn serve(config: Arc<Config>, reload_tx: ReloadSender) -> Result<()> {
    let port = config.server.port;
    let address = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("binding dev server on {address}"))?;

    info!(url = %format!("http://localhost:{port}/"), "dev server listening");

    let router = Router::new()
        .route("/__assetpipe/reload", get(ws_handler))
        .fallback_service(ServeDir::new(&config.paths.build_root))
        .with_state(reload_tx);

    axum::serve(listener, router)
        .await
        .context("dev server failed")?;

    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(reload_tx): State<ReloadSender>,
) -> impl IntoResponse {
    let rx = reload_tx.subscribe();
    ws.on_upgrade(move |socket| client_loop(socket, rx))
}

/// Per-client push loop: forward every reload event as a JSON text frame.
/// Fire-and-forget from the orchestrator's perspective — a slow or closed
/// client only ends its own loop.
async fn client_loop(mut socket: WebSocket, mut reload_rx: ReloadReceiver) {
    debug!("reload client connected");

    loop {
        match reload_rx.recv().await {
            Ok(event) => {
                let frame = match serde_json::to_string(&event) {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!(error = %err, "failed to serialize reload event");
                        continue;
                    }
                };
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            // A lagging client just misses intermediate frames; the next one
            // still triggers a refresh.
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "reload client lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        }
    }

    debug!("reload client disconnected");
}
