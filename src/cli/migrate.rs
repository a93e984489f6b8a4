use crate::{
    cli::ConsoleReporter,
    error, info,
    migrate::{self, Phase},
    success,
    tidal::Session,
    types::AccountRole,
};

/// Full account migration: artists → albums → tracks (with optional
/// destination wipe) → playlists.
pub async fn migrate_full(wipe: bool) {
    let (source, destination) = connect_pair().await;
    let reporter = ConsoleReporter::new();

    migrate::run(&source, &destination, &migrate::full_run(wipe), &reporter).await;
    success!("All selected phases complete.");
}

pub async fn migrate_artists() {
    run_single(Phase::Artists).await;
}

pub async fn migrate_albums() {
    run_single(Phase::Albums).await;
}

pub async fn migrate_tracks(wipe: bool) {
    run_single(Phase::Tracks { wipe }).await;
}

pub async fn migrate_playlists() {
    run_single(Phase::Playlists).await;
}

async fn run_single(phase: Phase) {
    let (source, destination) = connect_pair().await;
    let reporter = ConsoleReporter::new();

    migrate::run(&source, &destination, &[phase], &reporter).await;
}

/// Opens both sessions for a run. A broken session is fatal: every
/// subsequent call would fail, so there is nothing to continue with.
async fn connect_pair() -> (Session, Session) {
    let source = match Session::connect(AccountRole::Source).await {
        Ok(session) => session,
        Err(e) => error!("Cannot open source session: {}", e),
    };
    let destination = match Session::connect(AccountRole::Destination).await {
        Ok(session) => session,
        Err(e) => error!("Cannot open destination session: {}", e),
    };

    info!(
        "Connected: source user {} -> destination user {}",
        source.numeric_user_id(),
        destination.numeric_user_id()
    );

    (source, destination)
}
