use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Which of the two authenticated accounts a session or token belongs to.
///
/// The migration always reads from `Source` and writes to `Destination`.
/// Tokens are cached per role so both accounts can stay authenticated at
/// the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccountRole {
    Source,
    Destination,
}

impl AccountRole {
    pub fn token_cache_file(&self) -> &'static str {
        match self {
            AccountRole::Source => "token-source.json",
            AccountRole::Destination => "token-destination.json",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Source => write!(f, "source"),
            AccountRole::Destination => write!(f, "destination"),
        }
    }
}

/// The three favorites collections the Tidal API exposes per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tracks,
    Albums,
    Artists,
}

impl Category {
    /// Path segment of `users/{id}/favorites/{segment}`.
    pub fn path(&self) -> &'static str {
        match self {
            Category::Tracks => "tracks",
            Category::Albums => "albums",
            Category::Artists => "artists",
        }
    }

    /// Form field the add-favorite endpoint expects the item id under.
    pub fn id_param(&self) -> &'static str {
        match self {
            Category::Tracks => "trackIds",
            Category::Albums => "albumIds",
            Category::Artists => "artistIds",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// One normalized favorites entry, regardless of category.
///
/// `descriptor` carries the artist name for tracks and albums, and the
/// fixed label "Artist" for artist entries. `added_at` is the server-side
/// "created" timestamp string exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub name: String,
    pub descriptor: String,
    pub added_at: String,
}

/// An ordered favorites collection for one category of one account.
///
/// As fetched, records mirror the remote DATE DESC ordering (newest first).
/// [`FavoritesBatch::reversed`] flips the sequence into ascending
/// chronological order for replay. The reversal must be applied exactly
/// once per batch per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesBatch {
    pub category: Category,
    pub records: Vec<FavoriteRecord>,
}

impl FavoritesBatch {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            records: Vec::new(),
        }
    }

    /// Pure structural reversal, O(n), no I/O. Reversing twice restores
    /// the original sequence.
    pub fn reversed(mut self) -> Self {
        self.records.reverse();
        self
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A source playlist eligible for migration once the ownership filter has
/// been applied. Track ids are read separately in one bulk call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub track_count: u32,
}

// --- Tidal wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesPageResponse {
    pub items: Vec<FavoriteEnvelope>,
}

/// Raw favorites entry: the item payload sits nested under `item`, while
/// the "added" timestamp lives on the envelope itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEnvelope {
    pub created: Option<String>,
    pub item: Option<FavoritePayload>,
}

/// Heterogeneous item shape: artists expose `name`, tracks and albums
/// expose `title` plus a nested artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritePayload {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoResponse {
    pub user_id: u64,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub items: Vec<PlaylistPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPayload {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub creator: Option<CreatorRef>,
    #[serde(default)]
    pub number_of_tracks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorRef {
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackPayload {
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub uuid: String,
}

/// Row of the pre-replay preview table shown before the track phase.
#[derive(Tabled)]
pub struct FavoritePreviewRow {
    pub name: String,
    pub artist: String,
    pub added: String,
}
