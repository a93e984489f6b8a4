//! # Tidal Integration Module
//!
//! This module provides the HTTP interface to the Tidal Web API used by the
//! migration pipeline. It handles authentication, favorites and playlist
//! endpoints, error handling, and rate limiting, and is the only place in
//! the crate that talks to the network.
//!
//! ## Architecture
//!
//! ```text
//! Migration Core (AccountApi trait)
//!          ↓
//! Tidal Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, per account role)
//!     ├── Session (authenticated handle, raw parameterized requests)
//!     ├── Favorites (paged reads, add/remove, bulk reads)
//!     └── Playlists (enumerate, read, create, bulk add)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Tidal Web API
//! ```
//!
//! ## Sessions and roles
//!
//! A [`Session`] is the authenticated handle to exactly one account,
//! created per [`crate::types::AccountRole`]. It resolves the account's
//! user id once at connect time and implements the core's
//! [`crate::migrate::AccountApi`] seam, so everything above this module is
//! backend-agnostic.
//!
//! ## Ordering guarantee
//!
//! The favorites reads go through the raw
//! `users/{id}/favorites/{category}` endpoint with explicit
//! `order=DATE&orderDirection=DESC` parameters. The API's default ordering
//! is undocumented, so forcing it here is what makes chronological
//! reconstruction downstream correct.
//!
//! ## Rate limiting and retries
//!
//! - 429 Too Many Requests: waits for the `Retry-After` delay (up to 120
//!   seconds) and retries; longer delays are surfaced as errors.
//! - 502 Bad Gateway: retried after a 10 second pause.
//! - Other non-success statuses are returned to the caller as
//!   [`crate::migrate::ApiError::Status`]; the core decides what is
//!   tolerable (duplicate adds) and what is not.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 PKCE flow: verifier/challenge
//! generation, a temporary local callback server, browser launch, token
//! exchange, and per-role token persistence through
//! [`crate::management::TokenManager`]. Expired tokens are refreshed
//! transparently before each request.

pub mod auth;
pub mod favorites;
pub mod playlists;
pub mod session;

pub use session::Session;
