//! Configuration management for the Tidal migration CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Tidal API credentials, server
//! settings, and other runtime parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `tidalshift/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tidalshift/.env`
/// - macOS: `~/Library/Application Support/tidalshift/.env`
/// - Windows: `%LOCALAPPDATA%/tidalshift/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tidalshift/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Tidal API client ID for authentication.
///
/// # Panics
///
/// Panics if the `TIDAL_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn tidal_client_id() -> String {
    env::var("TIDAL_API_AUTH_CLIENT_ID").expect("TIDAL_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Tidal OAuth redirect URI.
///
/// Must match the redirect URI registered with the Tidal developer platform
/// and point at the local callback server.
///
/// # Panics
///
/// Panics if the `TIDAL_API_REDIRECT_URI` environment variable is not set.
pub fn tidal_redirect_uri() -> String {
    env::var("TIDAL_API_REDIRECT_URI").expect("TIDAL_API_REDIRECT_URI must be set")
}

/// Returns the Tidal API scope permissions requested during OAuth.
///
/// # Panics
///
/// Panics if the `TIDAL_API_AUTH_SCOPE` environment variable is not set.
pub fn tidal_scope() -> String {
    env::var("TIDAL_API_AUTH_SCOPE").expect("TIDAL_API_AUTH_SCOPE must be set")
}

/// Returns the Tidal OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `TIDAL_API_AUTH_URL` environment variable is not set.
pub fn tidal_apiauth_url() -> String {
    env::var("TIDAL_API_AUTH_URL").expect("TIDAL_API_AUTH_URL must be set")
}

/// Returns the Tidal Web API base URL, e.g. `https://api.tidal.com/v1`.
///
/// # Panics
///
/// Panics if the `TIDAL_API_URL` environment variable is not set.
pub fn tidal_apiurl() -> String {
    env::var("TIDAL_API_URL").expect("TIDAL_API_URL must be set")
}

/// Returns the Tidal OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `TIDAL_API_TOKEN_URL` environment variable is not set.
pub fn tidal_apitoken_url() -> String {
    env::var("TIDAL_API_TOKEN_URL").expect("TIDAL_API_TOKEN_URL must be set")
}
