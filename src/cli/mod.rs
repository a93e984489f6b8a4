//! # CLI Module
//!
//! This module provides the command-line interface layer for tidalshift, a
//! tool that migrates favorites and playlists between two Tidal accounts.
//! It wires the presentation-agnostic migration core to the console:
//! opening sessions, rendering progress with indicatif, and asking for
//! confirmations on destructive steps.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the OAuth PKCE flow for one account role (source or
//!   destination) and caches the token.
//!
//! ### Migration
//!
//! - [`migrate_full`] - Full run: artists → albums → tracks (with optional
//!   destination wipe) → playlists.
//! - [`migrate_artists`] / [`migrate_albums`] / [`migrate_tracks`] -
//!   Single-category runs through the paged fetch → reverse → replay
//!   pipeline.
//! - [`migrate_playlists`] - Copies the source user's own playlists as
//!   atomic units.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (this module, console reporter)
//!     ↓
//! Migration Core (crate::migrate, trait-based)
//!     ↓
//! Tidal API Layer (crate::tidal)
//!     ↓
//! Network Layer (HTTP requests)
//! ```
//!
//! The CLI owns the only concrete [`crate::migrate::Reporter`]
//! implementation, [`ConsoleReporter`]; swapping the presentation layer
//! means swapping this adapter, not the core.
//!
//! ## Error Handling Philosophy
//!
//! Per-item and per-playlist failures are tolerated by the core and
//! surfaced as one-line diagnostics; each phase prints attempted vs
//! succeeded counts so silent partial failure stays visible. Only broken
//! sessions are fatal, since they invalidate every subsequent call.

mod auth;
mod migrate;
mod progress;

pub use auth::auth;
pub use migrate::migrate_albums;
pub use migrate::migrate_artists;
pub use migrate::migrate_full;
pub use migrate::migrate_playlists;
pub use migrate::migrate_tracks;
pub use progress::ConsoleReporter;
