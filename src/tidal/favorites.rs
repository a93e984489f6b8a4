use crate::{
    migrate::ApiError,
    tidal::Session,
    types::{Category, FavoriteEnvelope, FavoriteRecord, FavoritesPageResponse},
};

/// Limit used for the unpaginated bulk read backing the wipe. Collections
/// beyond this size are read (and therefore wiped) only up to the cap;
/// the confirmation prompt shows the capped count.
const BULK_LIMIT: u32 = 9999;

/// Retrieves one favorites page with explicit `order=DATE` and
/// `orderDirection=DESC` parameters.
///
/// The raw endpoint is used on purpose: the higher-level convenience
/// accessors do not guarantee any ordering, and the whole chronological
/// reconstruction depends on pages arriving newest first.
pub async fn page(
    session: &Session,
    category: Category,
    limit: u32,
    offset: u32,
) -> Result<Vec<FavoriteRecord>, ApiError> {
    let path = format!(
        "users/{id}/favorites/{category}",
        id = session.numeric_user_id(),
        category = category.path()
    );
    let query = [
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("order", "DATE".to_string()),
        ("orderDirection", "DESC".to_string()),
    ];

    let response: FavoritesPageResponse = session.get_json(&path, &query).await?;
    Ok(response
        .items
        .iter()
        .filter_map(|envelope| record_from_envelope(category, envelope))
        .collect())
}

/// Normalizes one raw favorites envelope into a [`FavoriteRecord`].
///
/// Artist entries only carry a `name`; the descriptor becomes the fixed
/// label "Artist". Track and album entries carry a `title` plus a nested
/// artist whose name becomes the descriptor. Missing fields degrade to
/// "Unknown" instead of failing the record. Entries without an id are
/// dropped, since they could never be replayed.
pub fn record_from_envelope(
    category: Category,
    envelope: &FavoriteEnvelope,
) -> Option<FavoriteRecord> {
    let payload = envelope.item.clone().unwrap_or_default();
    let id = payload.id?.to_string();
    let added_at = envelope.created.clone().unwrap_or_default();

    let (name, descriptor) = match category {
        Category::Artists => (
            payload.name.unwrap_or_else(|| "Unknown".to_string()),
            "Artist".to_string(),
        ),
        Category::Tracks | Category::Albums => (
            payload.title.unwrap_or_else(|| "Unknown".to_string()),
            payload
                .artist
                .and_then(|artist| artist.name)
                .unwrap_or_else(|| "Unknown".to_string()),
        ),
    };

    Some(FavoriteRecord {
        id,
        name,
        descriptor,
        added_at,
    })
}

/// Adds one item to the account's favorites in `category`.
pub async fn add(session: &Session, category: Category, id: &str) -> Result<(), ApiError> {
    let path = format!(
        "users/{uid}/favorites/{category}",
        uid = session.numeric_user_id(),
        category = category.path()
    );
    session
        .post_form(&path, &[(category.id_param(), id.to_string())])
        .await
}

/// Removes one item from the account's favorites in `category`.
pub async fn remove(session: &Session, category: Category, id: &str) -> Result<(), ApiError> {
    let path = format!(
        "users/{uid}/favorites/{category}/{id}",
        uid = session.numeric_user_id(),
        category = category.path(),
        id = id
    );
    session.delete(&path).await
}

/// Bulk read of every favorite id in `category`, in one call.
///
/// This backs the destination wipe, where the account's own collection is
/// the truth and page ordering is irrelevant.
pub async fn all_ids(session: &Session, category: Category) -> Result<Vec<String>, ApiError> {
    let path = format!(
        "users/{id}/favorites/{category}",
        id = session.numeric_user_id(),
        category = category.path()
    );
    let query = [
        ("limit", BULK_LIMIT.to_string()),
        ("offset", "0".to_string()),
    ];

    let response: FavoritesPageResponse = session.get_json(&path, &query).await?;
    Ok(response
        .items
        .iter()
        .filter_map(|envelope| {
            envelope
                .item
                .as_ref()
                .and_then(|item| item.id)
                .map(|id| id.to_string())
        })
        .collect())
}
