//! Temporary local HTTP server for the OAuth authentication flow.
//!
//! Runs only for the duration of an `auth` command: Tidal redirects the
//! browser to `/callback` on this server, which completes the PKCE token
//! exchange and hands the token back through the shared state.

use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config, error, types::PkceToken};

/// Starts the callback server on [`config::server_addr`]. An unparsable
/// address is fatal, since the redirect URI registered with Tidal could
/// never reach us.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
