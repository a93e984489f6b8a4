use crate::{
    migrate::ApiError,
    tidal::Session,
    types::{
        CreatePlaylistResponse, PlaylistDescriptor, PlaylistPayload, PlaylistTracksResponse,
        PlaylistsResponse,
    },
};

/// Limit used for the unpaginated bulk reads (playlist enumeration and
/// track lists). Large enough to cover any realistic collection in one
/// call.
const LIST_LIMIT: u32 = 9999;

/// Enumerates every playlist visible to the account, owned and followed
/// alike. The ownership filter is applied by the caller.
pub async fn list(session: &Session) -> Result<Vec<PlaylistDescriptor>, ApiError> {
    let path = format!("users/{id}/playlists", id = session.numeric_user_id());
    let query = [("limit", LIST_LIMIT.to_string())];

    let response: PlaylistsResponse = session.get_json(&path, &query).await?;
    Ok(response
        .items
        .iter()
        .filter_map(descriptor_from_payload)
        .collect())
}

/// Maps a raw playlist payload to a descriptor. Playlists without a
/// creator id are dropped here, as they can never pass the ownership
/// filter anyway.
pub fn descriptor_from_payload(payload: &PlaylistPayload) -> Option<PlaylistDescriptor> {
    let owner_id = payload.creator.as_ref()?.id?.to_string();

    Some(PlaylistDescriptor {
        id: payload.uuid.clone(),
        name: payload.title.clone(),
        description: payload.description.clone().unwrap_or_default(),
        owner_id,
        track_count: payload.number_of_tracks,
    })
}

/// Reads a playlist's full track id list in a single bulk call.
///
/// The request is deliberately not sized by the track count the playlist
/// enumeration reported: that count can be stale, and some payloads omit
/// it entirely. The fixed large limit reads whatever is actually there.
pub async fn track_ids(
    session: &Session,
    playlist: &PlaylistDescriptor,
) -> Result<Vec<String>, ApiError> {
    let path = format!("playlists/{id}/tracks", id = playlist.id);
    let query = [
        ("limit", LIST_LIMIT.to_string()),
        ("offset", "0".to_string()),
    ];

    let response: PlaylistTracksResponse = session.get_json(&path, &query).await?;
    Ok(response
        .items
        .iter()
        .filter_map(|track| track.id.map(|id| id.to_string()))
        .collect())
}

/// Creates an empty playlist on the account and returns its uuid.
pub async fn create(
    session: &Session,
    name: &str,
    description: &str,
) -> Result<String, ApiError> {
    let path = format!("users/{id}/playlists", id = session.numeric_user_id());
    let form = [
        ("title", name.to_string()),
        ("description", description.to_string()),
    ];

    let response: CreatePlaylistResponse = session.post_form_json(&path, &form).await?;
    Ok(response.uuid)
}

/// Adds all given track ids to a playlist in one bulk call.
pub async fn add_tracks(
    session: &Session,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<(), ApiError> {
    let path = format!("playlists/{id}/items", id = playlist_id);
    let form = [
        ("trackIds", track_ids.join(",")),
        ("onArtifactNotFound", "SKIP".to_string()),
    ];

    session.post_form(&path, &form).await
}
