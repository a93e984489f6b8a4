use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    types::{AccountRole, Token},
};

/// Persists and refreshes the OAuth token of one account role.
///
/// Source and destination tokens live in separate cache files so both
/// accounts can stay authenticated at the same time.
pub struct TokenManager {
    role: AccountRole,
    token: Token,
}

impl TokenManager {
    pub fn new(role: AccountRole, token: Token) -> Self {
        TokenManager { role, token }
    }

    pub async fn load(role: AccountRole) -> Result<Self, String> {
        let path = Self::token_path(role);
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            format!(
                "no cached token for {} account ({}), run tidalshift auth --account {}",
                role, e, role
            )
        })?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { role, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.role);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns a valid access token, refreshing and re-persisting it
    /// first when the cached one is expired or about to expire.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = self.refresh_token().await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    async fn refresh_token(&self) -> Result<Token, String> {
        let client = Client::new();
        let res = client
            .post(&config::tidal_apitoken_url())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.token.refresh_token),
                ("client_id", &config::tidal_client_id()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

        Ok(Token {
            access_token: json["access_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            scope: json["scope"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    fn token_path(role: AccountRole) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("tidalshift/cache/{}", role.token_cache_file()));
        path
    }
}
