use axum::response::Json;
use serde_json::{Value, json};

/// Liveness check for the temporary callback server, mainly useful to
/// verify the redirect URI port is reachable before starting a login.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
