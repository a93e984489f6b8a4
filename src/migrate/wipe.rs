use tokio::time::sleep;

use crate::{
    info,
    migrate::{AccountApi, FAVORITE_PAUSE, Reporter},
    types::Category,
    warning,
};

/// Clears a destination favorites collection ahead of replay.
///
/// Reads the destination's current collection in one bulk call, then asks
/// for explicit confirmation carrying the exact count before issuing any
/// delete. An already-empty collection short-circuits with no prompt and
/// no API calls; a declined prompt issues zero deletes. The delete loop
/// itself mirrors the replay loop: rate limited, per-item tolerant.
///
/// Returns the number of items actually deleted.
pub async fn wipe_favorites<A: AccountApi>(
    destination: &A,
    category: Category,
    reporter: &impl Reporter,
) -> usize {
    let ids = match destination.favorite_ids(category).await {
        Ok(ids) => ids,
        Err(e) => {
            warning!("Error reading destination {} for wipe: {}", category, e);
            return 0;
        }
    };

    if ids.is_empty() {
        info!("Destination {} already empty, nothing to wipe.", category);
        return 0;
    }

    let total = ids.len();
    let prompt = format!(
        "WARNING: This will DELETE {} {} from the DESTINATION account. Sure?",
        total, category
    );
    if !reporter.confirm(&prompt) {
        info!("Wipe skipped.");
        return 0;
    }

    info!("Deleting {} {}...", total, category);
    let mut deleted = 0;

    for (done, id) in ids.iter().enumerate() {
        match destination.remove_favorite(category, id).await {
            Ok(()) => deleted += 1,
            Err(e) => warning!("Failed to delete {} {}: {}", category, id, e),
        }
        reporter.progress(done + 1, total);

        sleep(FAVORITE_PAUSE).await;
    }

    reporter.finish();
    deleted
}
