use tokio::time::sleep;

use crate::{
    migrate::{AccountApi, FAVORITE_PAUSE, Reporter},
    types::Category,
    warning,
};

/// Outcome of a single replayed add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Added,
    /// The destination already contained the item. Counted, never fatal.
    Duplicate,
    Failed,
}

/// Aggregated result of one replay batch.
///
/// `attempted` always equals the input length; `succeeded` may be lower,
/// which is the legitimate partial-failure case the operator is shown at
/// the end of each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl ReplayReport {
    fn record(&mut self, outcome: ItemOutcome) {
        self.attempted += 1;
        match outcome {
            ItemOutcome::Added => self.succeeded += 1,
            ItemOutcome::Duplicate => self.duplicates += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }
}

/// Applies an ordered sequence of "add to favorites" calls to the
/// destination account.
///
/// Ids are processed strictly in the given (ascending chronological)
/// order, with a fixed [`FAVORITE_PAUSE`] between calls to stay under the
/// request-rate ceiling. Any single add failure - including duplicate
/// responses - is tagged and counted without aborting the batch.
pub async fn replay_favorites<A: AccountApi>(
    destination: &A,
    category: Category,
    ordered_ids: &[String],
    reporter: &impl Reporter,
) -> ReplayReport {
    let total = ordered_ids.len();
    let mut report = ReplayReport::default();

    for (done, id) in ordered_ids.iter().enumerate() {
        let outcome = match destination.add_favorite(category, id).await {
            Ok(()) => ItemOutcome::Added,
            Err(e) if e.is_duplicate() => ItemOutcome::Duplicate,
            Err(e) => {
                warning!("Failed to add {} {}: {}", category, id, e);
                ItemOutcome::Failed
            }
        };
        report.record(outcome);
        reporter.progress(done + 1, total);

        sleep(FAVORITE_PAUSE).await;
    }

    reporter.finish();
    report
}
