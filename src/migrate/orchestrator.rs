use tabled::Table;

use crate::{
    info,
    migrate::{
        AccountApi, ReplayReport, Reporter, fetch_ordered_favorites, migrate_playlists,
        replay_favorites, wipe_favorites,
    },
    success,
    types::{Category, FavoritePreviewRow, FavoritesBatch},
};

/// One independently selectable migration phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Artists,
    Albums,
    Tracks { wipe: bool },
    Playlists,
}

/// The full-run phase sequence. Artists and albums are foundational and
/// go first, tracks follow (with the optional destination wipe immediately
/// beforehand), playlists last since they reference track ids.
pub fn full_run(wipe: bool) -> Vec<Phase> {
    vec![
        Phase::Artists,
        Phase::Albums,
        Phase::Tracks { wipe },
        Phase::Playlists,
    ]
}

/// Executes the given phases in order. Each phase completes independently
/// regardless of per-item failures within it.
pub async fn run<A: AccountApi>(
    source: &A,
    destination: &A,
    phases: &[Phase],
    reporter: &impl Reporter,
) {
    for phase in phases {
        match phase {
            Phase::Artists => {
                info!("--- MIGRATING ARTISTS ---");
                migrate_category(source, destination, Category::Artists, reporter).await;
            }
            Phase::Albums => {
                info!("--- MIGRATING ALBUMS ---");
                migrate_category(source, destination, Category::Albums, reporter).await;
            }
            Phase::Tracks { wipe } => {
                if *wipe {
                    info!("--- WIPING DESTINATION TRACKS ---");
                    let deleted = wipe_favorites(destination, Category::Tracks, reporter).await;
                    if deleted > 0 {
                        success!("Wipe completed, {} tracks deleted.", deleted);
                    }
                }

                info!("--- MIGRATING LIKED TRACKS ---");
                migrate_tracks(source, destination, reporter).await;
            }
            Phase::Playlists => {
                info!("--- MIGRATING PLAYLISTS ---");
                let migrated = migrate_playlists(source, destination, reporter).await;
                success!("Playlists finished. Migrated: {}.", migrated);
            }
        }
    }
}

/// Fetches, reverses, and replays one favorites category.
///
/// The full batch is fetched and reversed before the first replay call;
/// replay never starts against a partially fetched batch.
pub async fn migrate_category<A: AccountApi>(
    source: &A,
    destination: &A,
    category: Category,
    reporter: &impl Reporter,
) -> ReplayReport {
    let batch = fetch_ordered_favorites(source, category, reporter).await;
    if batch.is_empty() {
        info!("No {} found on the source account.", category);
        return ReplayReport::default();
    }

    replay_batch(destination, batch, reporter).await
}

/// Track phase with the extra operator checkpoint: a preview of the five
/// most recent favorites and a confirmation before anything is copied.
async fn migrate_tracks<A: AccountApi>(
    source: &A,
    destination: &A,
    reporter: &impl Reporter,
) -> ReplayReport {
    let batch = fetch_ordered_favorites(source, Category::Tracks, reporter).await;
    if batch.is_empty() {
        info!("No favorites found.");
        return ReplayReport::default();
    }

    // Preview runs on the still-descending batch, so rows are newest first.
    let preview: Vec<FavoritePreviewRow> = batch
        .records
        .iter()
        .take(5)
        .map(|r| FavoritePreviewRow {
            name: r.name.clone(),
            artist: r.descriptor.clone(),
            added: r.added_at.clone(),
        })
        .collect();
    info!("Preview (most recent):");
    println!("{}", Table::new(preview));

    if !reporter.confirm("Start copying tracks?") {
        info!("Skipping tracks.");
        return ReplayReport::default();
    }

    replay_batch(destination, batch, reporter).await
}

async fn replay_batch<A: AccountApi>(
    destination: &A,
    batch: FavoritesBatch,
    reporter: &impl Reporter,
) -> ReplayReport {
    let category = batch.category;
    let total = batch.len();

    info!("Reversing list for chronological insertion...");
    let batch = batch.reversed();

    info!("Copying {} {}...", total, category);
    let report = replay_favorites(destination, category, &batch.ids(), reporter).await;

    success!(
        "{} migration finished: {}/{} added ({} duplicates, {} failed).",
        category,
        report.succeeded,
        report.attempted,
        report.duplicates,
        report.failed
    );
    report
}
