use tokio::time::sleep;

use crate::{
    info,
    migrate::{AccountApi, ApiError, PLAYLIST_PAUSE, Reporter},
    success,
    types::PlaylistDescriptor,
    warning,
};

/// Copies the source account's own playlists to the destination account.
///
/// Playlists are migrated as atomic units outside the paged-favorites
/// pipeline: enumerate, filter to those created by the source user, read
/// the full track list in one bulk call, then create a same-named
/// destination playlist and add every track in a single bulk call.
///
/// Empty playlists are skipped without creating anything on the
/// destination, and followed or shared playlists never pass the ownership
/// filter. An error in one playlist is logged and does not stop the rest.
///
/// Returns the number of playlists actually migrated.
pub async fn migrate_playlists<A: AccountApi>(
    source: &A,
    destination: &A,
    reporter: &impl Reporter,
) -> usize {
    let playlists = match source.playlists().await {
        Ok(playlists) => playlists,
        Err(e) => {
            warning!("Error reading playlists: {}", e);
            return 0;
        }
    };

    info!("Analyzing {} playlists...", playlists.len());
    let own_id = source.user_id();

    let mut migrated = 0;
    for playlist in playlists {
        if playlist.owner_id != own_id {
            continue;
        }

        // The reported track count is display-only; the copy reads the
        // actual track list.
        reporter.status(&format!(
            "Processing: {} (~{} tracks)...",
            playlist.name, playlist.track_count
        ));

        match copy_playlist(source, destination, &playlist).await {
            Ok(Some(track_count)) => {
                migrated += 1;
                success!("'{}' copied ({} tracks)", playlist.name, track_count);
                sleep(PLAYLIST_PAUSE).await;
            }
            Ok(None) => {
                info!("'{}' is empty, skipping.", playlist.name);
            }
            Err(e) => {
                warning!("Error in '{}': {}", playlist.name, e);
            }
        }
    }

    reporter.finish();
    migrated
}

/// Copies a single playlist. Returns the track count on success, or
/// `None` when the playlist is empty and nothing was created.
async fn copy_playlist<A: AccountApi>(
    source: &A,
    destination: &A,
    playlist: &PlaylistDescriptor,
) -> Result<Option<usize>, ApiError> {
    let track_ids = source.playlist_track_ids(playlist).await?;
    if track_ids.is_empty() {
        return Ok(None);
    }

    let new_id = destination
        .create_playlist(&playlist.name, &playlist.description)
        .await?;
    destination.add_playlist_tracks(&new_id, &track_ids).await?;

    Ok(Some(track_ids.len()))
}
