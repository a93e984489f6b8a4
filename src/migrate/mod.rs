//! # Migration Core Module
//!
//! This module implements the order-preserving migration pipeline that moves
//! a user's favorites and playlists from a source Tidal account to a
//! destination account:
//!
//! ```text
//! CLI Layer (commands, console reporter)
//!          ↓
//! Migration Core
//!     ├── Paged fetch (DATE DESC, offset pagination)
//!     ├── Chronological reversal (oldest → newest)
//!     ├── Rate-limited replay (per-item failure tolerance)
//!     ├── Destructive wipe (confirmation-gated)
//!     └── Playlist copy (ownership filter, atomic create + bulk add)
//!          ↓
//! AccountApi trait  ←  tidal::Session (HTTP) / in-memory fakes (tests)
//! ```
//!
//! The core never talks HTTP directly. It is written against two seams:
//!
//! - [`AccountApi`] - the capability surface of one authenticated account
//! - [`Reporter`] - the progress/status/confirmation sink
//!
//! which keeps every pipeline stage runnable against in-memory fakes.
//!
//! ## Error handling
//!
//! Per-item failures are tagged and counted, never escalated; a page-fetch
//! error truncates the batch to whatever was already accumulated; a
//! playlist-level error skips that playlist only. The total migrated count
//! may therefore legitimately be lower than the source count, and each
//! phase reports attempted vs succeeded so partial failure stays visible.

mod fetch;
mod orchestrator;
mod playlists;
mod replay;
mod wipe;

pub use fetch::fetch_ordered_favorites;
pub use orchestrator::{Phase, full_run, migrate_category, run};
pub use playlists::migrate_playlists;
pub use replay::{ItemOutcome, ReplayReport, replay_favorites};
pub use wipe::wipe_favorites;

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

use crate::types::{Category, FavoriteRecord, PlaylistDescriptor};

/// Fixed page size for favorites pagination.
pub const PAGE_LIMIT: u32 = 50;

/// Pause between successive favorite add/remove calls, chosen to stay
/// under the API request-rate ceiling.
pub const FAVORITE_PAUSE: Duration = Duration::from_millis(20);

/// Pause after each migrated playlist. Longer than [`FAVORITE_PAUSE`]
/// because playlist creation and bulk adds are heavier calls.
pub const PLAYLIST_PAUSE: Duration = Duration::from_millis(500);

/// Error raised by an [`AccountApi`] implementation.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure from the HTTP client.
    Http(reqwest::Error),
    /// The API answered with a non-success status code.
    Status(StatusCode),
    /// The response arrived but could not be interpreted.
    Malformed(String),
}

impl ApiError {
    /// Whether this error is the API's way of saying the item is already
    /// present. Duplicate adds are tolerated, not escalated.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Status(StatusCode::CONFLICT))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "http error: {}", e),
            ApiError::Status(code) => write!(f, "unexpected status: {}", code),
            ApiError::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}

/// Capability surface of one authenticated account.
///
/// Implemented by [`crate::tidal::Session`] against the real API and by
/// in-memory fakes in tests. The favorites page read maps to the raw
/// `users/{id}/favorites/{category}?limit&offset&order=DATE&orderDirection=DESC`
/// endpoint; the explicit ordering parameters are what make chronological
/// reconstruction possible, since the convenience accessors do not
/// guarantee any order.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    /// The account's own user id, used for the playlist ownership filter.
    fn user_id(&self) -> String;

    /// One normalized favorites page, newest first.
    async fn favorites_page(
        &self,
        category: Category,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FavoriteRecord>, ApiError>;

    async fn add_favorite(&self, category: Category, id: &str) -> Result<(), ApiError>;

    async fn remove_favorite(&self, category: Category, id: &str) -> Result<(), ApiError>;

    /// Unpaginated bulk read of all favorite ids in one category. Only
    /// used against the destination account, where ordering is not a
    /// concern.
    async fn favorite_ids(&self, category: Category) -> Result<Vec<String>, ApiError>;

    /// All playlists visible to the account, owned or followed.
    async fn playlists(&self) -> Result<Vec<PlaylistDescriptor>, ApiError>;

    /// Full track id list of one playlist in a single bulk read.
    async fn playlist_track_ids(
        &self,
        playlist: &PlaylistDescriptor,
    ) -> Result<Vec<String>, ApiError>;

    /// Creates an empty playlist and returns its id.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String, ApiError>;

    async fn add_playlist_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError>;
}

/// Progress and confirmation sink.
///
/// Progress updates are notifications, not control dependencies; the only
/// call the pipeline blocks on is [`Reporter::confirm`], which gates
/// destructive and bulk operations.
pub trait Reporter {
    /// A one-line status update for long-running phases.
    fn status(&self, message: &str);

    /// Items processed so far out of the phase total.
    fn progress(&self, done: usize, total: usize);

    /// The current phase finished; any progress display should be cleared.
    fn finish(&self);

    /// Blocking yes/no prompt. Destructive actions proceed only on `true`.
    fn confirm(&self, message: &str) -> bool;
}
