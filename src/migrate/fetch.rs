use crate::{
    migrate::{AccountApi, PAGE_LIMIT, Reporter},
    types::{Category, FavoritesBatch},
    warning,
};

/// Retrieves one favorites category in full via offset pagination.
///
/// Pages are requested with explicit `order=DATE, direction=DESC`
/// parameters, so the concatenation of all pages is newest-first.
/// Pagination terminates when a page comes back short or empty; an empty
/// page is end-of-collection, not an error.
///
/// # Failure policy
///
/// A page-fetch error aborts pagination early and returns the partial
/// batch accumulated so far, with a one-line diagnostic. Availability
/// wins over completeness here: callers must treat a short result as
/// potentially partial, not necessarily exhaustive.
pub async fn fetch_ordered_favorites<A: AccountApi>(
    api: &A,
    category: Category,
    reporter: &impl Reporter,
) -> FavoritesBatch {
    let mut batch = FavoritesBatch::new(category);
    let mut offset: u32 = 0;

    reporter.status(&format!("Fetching {} list (order: date)...", category));

    loop {
        match api.favorites_page(category, PAGE_LIMIT, offset).await {
            Ok(page) => {
                if page.is_empty() {
                    break;
                }

                let short_page = (page.len() as u32) < PAGE_LIMIT;
                batch.records.extend(page);
                reporter.status(&format!("Fetched {} {}...", batch.len(), category));

                if short_page {
                    break;
                }
                offset += PAGE_LIMIT;
            }
            Err(e) => {
                warning!(
                    "Error fetching {} at offset {}: {} (continuing with {} fetched so far)",
                    category,
                    offset,
                    e,
                    batch.len()
                );
                break;
            }
        }
    }

    reporter.finish();
    batch
}
