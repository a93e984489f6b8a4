use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config,
    management::TokenManager,
    migrate::{AccountApi, ApiError},
    tidal::{favorites, playlists},
    types::{AccountRole, Category, FavoriteRecord, PlaylistDescriptor, SessionInfoResponse},
    warning,
};

/// Authenticated handle to one Tidal account.
///
/// Owns the HTTP client and the token manager for its role; the token is
/// refreshed transparently before each request. A session is created fresh
/// per run and never persisted beyond the cached token.
pub struct Session {
    role: AccountRole,
    user_id: u64,
    country_code: String,
    client: Client,
    token: Mutex<TokenManager>,
}

impl Session {
    /// Loads the cached token for `role` and resolves the account's user
    /// id and country code from the `sessions` endpoint.
    pub async fn connect(role: AccountRole) -> Result<Self, ApiError> {
        let token_mgr = TokenManager::load(role).await.map_err(ApiError::Malformed)?;

        let mut session = Session {
            role,
            user_id: 0,
            country_code: String::from("US"),
            client: Client::new(),
            token: Mutex::new(token_mgr),
        };

        let info: SessionInfoResponse = session.get_json("sessions", &[]).await?;
        session.user_id = info.user_id;
        if let Some(country_code) = info.country_code {
            session.country_code = country_code;
        }

        Ok(session)
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    pub fn numeric_user_id(&self) -> u64 {
        self.user_id
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, query, None).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<(), ApiError> {
        self.send(Method::POST, path, &[], Some(form)).await?;
        Ok(())
    }

    pub(crate) async fn post_form_json<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, &[], Some(form)).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Issues one request with the session's bearer token and country
    /// code, retrying on 502 and honoring 429 Retry-After delays up to
    /// 120 seconds. Any other non-success status is returned as
    /// [`ApiError::Status`].
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        form: Option<&[(&str, String)]>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{uri}/{path}", uri = &config::tidal_apiurl(), path = path);

        loop {
            let token = self.token.lock().await.get_valid_token().await;

            let mut request = self
                .client
                .request(method.clone(), &url)
                .bearer_auth(token)
                .query(&[("countryCode", self.country_code.as_str())]);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(form) = form {
                request = request.form(form);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::BAD_GATEWAY {
                sleep(Duration::from_secs(10)).await;
                continue; // retry
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                if retry_after <= 120 {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue; // retry
                }
                warning!(
                    "Retry-after has reached an abnormal high of {} seconds. Try again tomorrow.",
                    retry_after
                );
                return Err(ApiError::Status(status));
            }

            if !status.is_success() {
                return Err(ApiError::Status(status));
            }

            return Ok(response);
        }
    }
}

impl AccountApi for Session {
    fn user_id(&self) -> String {
        self.user_id.to_string()
    }

    async fn favorites_page(
        &self,
        category: Category,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FavoriteRecord>, ApiError> {
        favorites::page(self, category, limit, offset).await
    }

    async fn add_favorite(&self, category: Category, id: &str) -> Result<(), ApiError> {
        favorites::add(self, category, id).await
    }

    async fn remove_favorite(&self, category: Category, id: &str) -> Result<(), ApiError> {
        favorites::remove(self, category, id).await
    }

    async fn favorite_ids(&self, category: Category) -> Result<Vec<String>, ApiError> {
        favorites::all_ids(self, category).await
    }

    async fn playlists(&self) -> Result<Vec<PlaylistDescriptor>, ApiError> {
        playlists::list(self).await
    }

    async fn playlist_track_ids(
        &self,
        playlist: &PlaylistDescriptor,
    ) -> Result<Vec<String>, ApiError> {
        playlists::track_ids(self, playlist).await
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<String, ApiError> {
        playlists::create(self, name, description).await
    }

    async fn add_playlist_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError> {
        playlists::add_tracks(self, playlist_id, track_ids).await
    }
}
