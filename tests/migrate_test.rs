use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use reqwest::StatusCode;
use tidalshift::migrate::{
    self, AccountApi, ApiError, Phase, Reporter, fetch_ordered_favorites, migrate_category,
    migrate_playlists, replay_favorites, wipe_favorites,
};
use tidalshift::types::{Category, FavoriteRecord, FavoritesBatch, PlaylistDescriptor};

// --- In-memory account fake, usable as source and destination ---

#[derive(Default)]
struct FakeAccount {
    user: String,
    // Source side: full collections, stored newest first, served in pages.
    collections: Mutex<HashMap<Category, Vec<FavoriteRecord>>>,
    page_requests: Mutex<usize>,
    fail_page_at_offset: Option<u32>,
    // Destination side: membership plus an add log preserving call order.
    membership: Mutex<HashMap<Category, HashSet<String>>>,
    added_log: Mutex<Vec<(Category, String)>>,
    delete_calls: Mutex<usize>,
    // Playlists.
    playlists: Mutex<Vec<PlaylistDescriptor>>,
    playlist_tracks: Mutex<HashMap<String, Vec<String>>>,
    created_playlists: Mutex<Vec<(String, String)>>,
    bulk_added_tracks: Mutex<Vec<(String, Vec<String>)>>,
    fail_create_named: Option<String>,
}

impl FakeAccount {
    fn named(user: &str) -> Self {
        Self {
            user: user.to_string(),
            ..Default::default()
        }
    }

    fn with_favorites(user: &str, category: Category, records: Vec<FavoriteRecord>) -> Self {
        let fake = Self::named(user);
        fake.collections.lock().unwrap().insert(category, records);
        fake
    }

    fn page_requests(&self) -> usize {
        *self.page_requests.lock().unwrap()
    }

    fn membership_of(&self, category: Category) -> HashSet<String> {
        self.membership
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    fn seed_membership(&self, category: Category, ids: &[&str]) {
        self.membership
            .lock()
            .unwrap()
            .insert(category, ids.iter().map(|id| id.to_string()).collect());
    }

    fn added_ids(&self, category: Category) -> Vec<String> {
        self.added_log
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, id)| id.clone())
            .collect()
    }
}

impl AccountApi for FakeAccount {
    fn user_id(&self) -> String {
        self.user.clone()
    }

    async fn favorites_page(
        &self,
        category: Category,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FavoriteRecord>, ApiError> {
        *self.page_requests.lock().unwrap() += 1;

        if self.fail_page_at_offset == Some(offset) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }

        let collections = self.collections.lock().unwrap();
        let all = collections.get(&category).cloned().unwrap_or_default();
        let start = offset as usize;
        if start >= all.len() {
            return Ok(Vec::new());
        }
        let end = (start + limit as usize).min(all.len());
        Ok(all[start..end].to_vec())
    }

    async fn add_favorite(&self, category: Category, id: &str) -> Result<(), ApiError> {
        let mut membership = self.membership.lock().unwrap();
        let set = membership.entry(category).or_default();
        if !set.insert(id.to_string()) {
            return Err(ApiError::Status(StatusCode::CONFLICT));
        }
        self.added_log
            .lock()
            .unwrap()
            .push((category, id.to_string()));
        Ok(())
    }

    async fn remove_favorite(&self, category: Category, id: &str) -> Result<(), ApiError> {
        *self.delete_calls.lock().unwrap() += 1;
        let mut membership = self.membership.lock().unwrap();
        membership.entry(category).or_default().remove(id);
        Ok(())
    }

    async fn favorite_ids(&self, category: Category) -> Result<Vec<String>, ApiError> {
        Ok(self.membership_of(category).into_iter().collect())
    }

    async fn playlists(&self) -> Result<Vec<PlaylistDescriptor>, ApiError> {
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn playlist_track_ids(
        &self,
        playlist: &PlaylistDescriptor,
    ) -> Result<Vec<String>, ApiError> {
        Ok(self
            .playlist_tracks
            .lock()
            .unwrap()
            .get(&playlist.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<String, ApiError> {
        if self.fail_create_named.as_deref() == Some(name) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        let mut created = self.created_playlists.lock().unwrap();
        created.push((name.to_string(), description.to_string()));
        Ok(format!("dest-pl-{}", created.len()))
    }

    async fn add_playlist_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError> {
        self.bulk_added_tracks
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), track_ids.to_vec()));
        Ok(())
    }
}

// --- Reporter fake recording confirmations ---

struct TestReporter {
    answer: bool,
    confirms: Mutex<Vec<String>>,
}

impl TestReporter {
    fn yes() -> Self {
        Self {
            answer: true,
            confirms: Mutex::new(Vec::new()),
        }
    }

    fn no() -> Self {
        Self {
            answer: false,
            confirms: Mutex::new(Vec::new()),
        }
    }

    fn confirm_count(&self) -> usize {
        self.confirms.lock().unwrap().len()
    }
}

impl Reporter for TestReporter {
    fn status(&self, _message: &str) {}

    fn progress(&self, _done: usize, _total: usize) {}

    fn finish(&self) {}

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}

// --- Helpers ---

fn record(id: u32, added_at: &str) -> FavoriteRecord {
    FavoriteRecord {
        id: id.to_string(),
        name: format!("Item {}", id),
        descriptor: "Some Band".to_string(),
        added_at: added_at.to_string(),
    }
}

/// `n` records, newest first, with strictly decreasing timestamps.
fn descending_records(n: u32) -> Vec<FavoriteRecord> {
    (0..n)
        .map(|i| {
            let remaining = n - i;
            record(
                remaining,
                &format!("2024-01-01T{:02}:{:02}:00Z", remaining / 60, remaining % 60),
            )
        })
        .collect()
}

fn is_non_increasing(records: &[FavoriteRecord]) -> bool {
    records.windows(2).all(|w| w[0].added_at >= w[1].added_at)
}

fn is_non_decreasing(records: &[FavoriteRecord]) -> bool {
    records.windows(2).all(|w| w[0].added_at <= w[1].added_at)
}

fn playlist(id: &str, name: &str, owner: &str, track_count: u32) -> PlaylistDescriptor {
    PlaylistDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        owner_id: owner.to_string(),
        track_count,
    }
}

// --- Pagination and ordering ---

#[tokio::test]
async fn fetch_collects_all_pages_in_descending_order() {
    let source =
        FakeAccount::with_favorites("src", Category::Albums, descending_records(120));
    let reporter = TestReporter::yes();

    let batch = fetch_ordered_favorites(&source, Category::Albums, &reporter).await;

    assert_eq!(batch.len(), 120);
    // 50 + 50 + 20: the short third page terminates pagination.
    assert_eq!(source.page_requests(), 3);
    assert!(is_non_increasing(&batch.records));
}

#[tokio::test]
async fn fetch_terminates_on_empty_page_at_exact_multiple() {
    let source =
        FakeAccount::with_favorites("src", Category::Tracks, descending_records(100));
    let reporter = TestReporter::yes();

    let batch = fetch_ordered_favorites(&source, Category::Tracks, &reporter).await;

    assert_eq!(batch.len(), 100);
    // Two full pages plus the empty probe that signals end-of-collection.
    assert_eq!(source.page_requests(), 3);
}

#[tokio::test]
async fn fetch_returns_partial_batch_on_page_error() {
    let mut source =
        FakeAccount::with_favorites("src", Category::Tracks, descending_records(120));
    source.fail_page_at_offset = Some(50);
    let reporter = TestReporter::yes();

    let batch = fetch_ordered_favorites(&source, Category::Tracks, &reporter).await;

    // The error truncates the fetch to what was already accumulated.
    assert_eq!(batch.len(), 50);
    assert!(is_non_increasing(&batch.records));
}

#[test]
fn reversal_is_an_involution_and_yields_ascending_order() {
    let batch = FavoritesBatch {
        category: Category::Tracks,
        records: descending_records(7),
    };

    let reversed = batch.clone().reversed();
    assert!(is_non_decreasing(&reversed.records));
    assert_eq!(reversed.reversed(), batch);
}

// --- Replay ---

#[tokio::test]
async fn replay_adds_in_order_and_is_idempotent() {
    let destination = FakeAccount::named("dst");
    let reporter = TestReporter::yes();
    let ids: Vec<String> = vec!["1".into(), "2".into(), "3".into()];

    let first = replay_favorites(&destination, Category::Tracks, &ids, &reporter).await;
    assert_eq!(first.attempted, 3);
    assert_eq!(first.succeeded, 3);
    assert_eq!(first.duplicates, 0);
    assert_eq!(first.failed, 0);
    assert_eq!(destination.added_ids(Category::Tracks), ids);

    // Second pass: every add is a duplicate, nothing raises, membership
    // is unchanged.
    let second = replay_favorites(&destination, Category::Tracks, &ids, &reporter).await;
    assert_eq!(second.attempted, 3);
    assert_eq!(second.succeeded, 0);
    assert_eq!(second.duplicates, 3);
    assert_eq!(second.failed, 0);
    assert_eq!(destination.membership_of(Category::Tracks).len(), 3);
}

#[tokio::test]
async fn end_to_end_replay_restores_chronological_order() {
    // API returns [T3, T2, T1]; the destination must see adds as
    // [T1, T2, T3].
    let source = FakeAccount::with_favorites(
        "src",
        Category::Albums,
        vec![
            record(3, "2024-03-01T00:00:00Z"),
            record(2, "2024-02-01T00:00:00Z"),
            record(1, "2024-01-01T00:00:00Z"),
        ],
    );
    let destination = FakeAccount::named("dst");
    let reporter = TestReporter::yes();

    let report = migrate_category(&source, &destination, Category::Albums, &reporter).await;

    assert_eq!(report.succeeded, 3);
    assert_eq!(destination.added_ids(Category::Albums), vec!["1", "2", "3"]);
}

// --- Wipe safety ---

#[tokio::test]
async fn wipe_on_empty_collection_issues_no_calls_and_no_prompt() {
    let destination = FakeAccount::named("dst");
    let reporter = TestReporter::yes();

    let deleted = wipe_favorites(&destination, Category::Tracks, &reporter).await;

    assert_eq!(deleted, 0);
    assert_eq!(*destination.delete_calls.lock().unwrap(), 0);
    assert_eq!(reporter.confirm_count(), 0);
}

#[tokio::test]
async fn declined_wipe_issues_no_deletes() {
    let destination = FakeAccount::named("dst");
    destination.seed_membership(Category::Tracks, &["1", "2", "3", "4", "5"]);
    let reporter = TestReporter::no();

    let deleted = wipe_favorites(&destination, Category::Tracks, &reporter).await;

    assert_eq!(deleted, 0);
    assert_eq!(*destination.delete_calls.lock().unwrap(), 0);
    // The prompt carried the exact count about to be deleted.
    assert_eq!(reporter.confirm_count(), 1);
    assert!(reporter.confirms.lock().unwrap()[0].contains("5"));
    assert_eq!(destination.membership_of(Category::Tracks).len(), 5);
}

#[tokio::test]
async fn confirmed_wipe_deletes_everything() {
    let destination = FakeAccount::named("dst");
    destination.seed_membership(Category::Tracks, &["1", "2", "3", "4"]);
    let reporter = TestReporter::yes();

    let deleted = wipe_favorites(&destination, Category::Tracks, &reporter).await;

    assert_eq!(deleted, 4);
    assert_eq!(*destination.delete_calls.lock().unwrap(), 4);
    assert!(destination.membership_of(Category::Tracks).is_empty());
}

// --- Playlist migration ---

#[tokio::test]
async fn only_owned_non_empty_playlists_are_migrated() {
    let source = FakeAccount::named("user-a");
    {
        let mut playlists = source.playlists.lock().unwrap();
        playlists.push(playlist("pl-1", "Mine", "user-a", 3));
        playlists.push(playlist("pl-2", "Mine But Empty", "user-a", 0));
        playlists.push(playlist("pl-3", "Someone Else's", "user-b", 10));
    }
    source.playlist_tracks.lock().unwrap().insert(
        "pl-1".to_string(),
        vec!["t1".into(), "t2".into(), "t3".into()],
    );
    source
        .playlist_tracks
        .lock()
        .unwrap()
        .insert("pl-3".to_string(), vec!["x1".into()]);

    let destination = FakeAccount::named("user-c");
    let reporter = TestReporter::yes();

    let migrated = migrate_playlists(&source, &destination, &reporter).await;

    assert_eq!(migrated, 1);
    let created = destination.created_playlists.lock().unwrap().clone();
    assert_eq!(created, vec![("Mine".to_string(), String::new())]);

    let bulk = destination.bulk_added_tracks.lock().unwrap().clone();
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk[0].1, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn stale_reported_track_count_does_not_truncate_the_copy() {
    // A payload omitting the track count deserializes to 0; the copy must
    // still read and carry over the full actual track list.
    let source = FakeAccount::named("user-a");
    source
        .playlists
        .lock()
        .unwrap()
        .push(playlist("pl-1", "Miscounted", "user-a", 0));
    source.playlist_tracks.lock().unwrap().insert(
        "pl-1".to_string(),
        vec!["t1".into(), "t2".into(), "t3".into()],
    );

    let destination = FakeAccount::named("user-c");
    let reporter = TestReporter::yes();

    let migrated = migrate_playlists(&source, &destination, &reporter).await;

    assert_eq!(migrated, 1);
    let bulk = destination.bulk_added_tracks.lock().unwrap().clone();
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk[0].1, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn playlist_failure_does_not_stop_the_rest() {
    let source = FakeAccount::named("user-a");
    {
        let mut playlists = source.playlists.lock().unwrap();
        playlists.push(playlist("pl-1", "First", "user-a", 1));
        playlists.push(playlist("pl-2", "Second", "user-a", 1));
    }
    source
        .playlist_tracks
        .lock()
        .unwrap()
        .insert("pl-1".to_string(), vec!["t1".into()]);
    source
        .playlist_tracks
        .lock()
        .unwrap()
        .insert("pl-2".to_string(), vec!["t2".into()]);

    let mut destination = FakeAccount::named("user-c");
    destination.fail_create_named = Some("First".to_string());
    let reporter = TestReporter::yes();

    let migrated = migrate_playlists(&source, &destination, &reporter).await;

    assert_eq!(migrated, 1);
    let created = destination.created_playlists.lock().unwrap().clone();
    assert_eq!(created, vec![("Second".to_string(), String::new())]);
}

// --- Orchestration ---

#[tokio::test]
async fn full_run_migrates_phases_in_dependency_order() {
    let source = FakeAccount::named("src");
    {
        let mut collections = source.collections.lock().unwrap();
        collections.insert(
            Category::Artists,
            vec![record(10, "2024-01-01T00:00:00Z")],
        );
        collections.insert(Category::Albums, vec![record(20, "2024-01-02T00:00:00Z")]);
        collections.insert(Category::Tracks, vec![record(30, "2024-01-03T00:00:00Z")]);
    }
    source
        .playlists
        .lock()
        .unwrap()
        .push(playlist("pl-1", "Mine", "src", 1));
    source
        .playlist_tracks
        .lock()
        .unwrap()
        .insert("pl-1".to_string(), vec!["30".into()]);

    let destination = FakeAccount::named("dst");
    let reporter = TestReporter::yes();

    migrate::run(&source, &destination, &migrate::full_run(false), &reporter).await;

    let order: Vec<Category> = destination
        .added_log
        .lock()
        .unwrap()
        .iter()
        .map(|(category, _)| *category)
        .collect();
    assert_eq!(
        order,
        vec![Category::Artists, Category::Albums, Category::Tracks]
    );
    assert_eq!(destination.created_playlists.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn declined_track_confirmation_skips_the_phase() {
    let source = FakeAccount::with_favorites(
        "src",
        Category::Tracks,
        vec![record(1, "2024-01-01T00:00:00Z")],
    );
    let destination = FakeAccount::named("dst");
    let reporter = TestReporter::no();

    migrate::run(
        &source,
        &destination,
        &[Phase::Tracks { wipe: false }],
        &reporter,
    )
    .await;

    assert!(destination.added_ids(Category::Tracks).is_empty());
    assert_eq!(reporter.confirm_count(), 1);
}
