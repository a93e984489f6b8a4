use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error, info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AccountRole, PkceToken, Token},
    utils, warning,
};

/// Runs the complete OAuth 2.0 PKCE flow for one account role.
///
/// Generates the PKCE verifier and challenge, starts the local callback
/// server, opens the authorization URL in the browser, waits for the
/// callback to deliver a token, and persists it under the role's token
/// cache. The source and destination accounts authenticate separately;
/// open the second authorization link in a private browser window so the
/// first account's web session does not leak into it.
///
/// Authentication failures are fatal: without a valid session every
/// subsequent operation would fail, so the process terminates.
pub async fn auth(role: AccountRole, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("--- LOGIN: {} account ---", role);

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{tidal_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        tidal_auth_url = &config::tidal_apiauth_url(),
        client_id = &config::tidal_client_id(),
        redirect_uri = &config::tidal_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::tidal_scope()
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(role, t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful for {} account!", role);
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for a completed token, with a 60-second
/// timeout. Runs concurrently with the callback handler that populates
/// the token after the OAuth exchange.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The verifier proves the same client that initiated the flow is
/// completing it. The authorization code is single-use and short-lived,
/// so the exchange happens immediately inside the callback handler.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = &config::tidal_client_id();
    let redirect_uri = &config::tidal_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::tidal_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

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
