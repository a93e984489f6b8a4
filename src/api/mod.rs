//! # API Module
//!
//! HTTP endpoints for the temporary local web server that backs the OAuth
//! authentication flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the OAuth callback from Tidal's authorization
//!   server and completes the PKCE token exchange.
//! - [`health`] - Health check returning application status and version.
//!
//! The module is built on the [Axum](https://docs.rs/axum) web framework;
//! each endpoint is an async handler wired into the router in
//! [`crate::server`]. The PKCE flow keeps temporary state (code verifier,
//! exchanged token) in a shared `Arc<Mutex<Option<PkceToken>>>` passed in
//! as an Axum extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
