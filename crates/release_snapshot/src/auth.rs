use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::SnapshotError;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchange client credentials for a bearer token. One request, no retry.
pub async fn authenticate(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<String, SnapshotError> {
    info!("Authenticating");

    let body = TokenRequest {
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
        grant_type: "client_credentials",
    };

    let response = client
        .post(token_url)
        .json(&body)
        .send()
        .await
        .map_err(|err| SnapshotError::auth(format!("token request failed: {}", err)))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| SnapshotError::auth(format!("failed to read token response: {}", err)))?;

    if !status.is_success() {
        return Err(
            SnapshotError::auth(format!("token endpoint responded with {}", status))
                .with_data(text),
        );
    }

    let payload: TokenResponse = serde_json::from_str(&text).map_err(|err| {
        SnapshotError::auth(format!("token response is not valid JSON: {}", err)).with_data(&text)
    })?;

    match payload.access_token {
        Some(token) if !token.is_empty() => {
            debug!(expires_in = ?payload.expires_in, "Received access token");
            info!("Authenticated");
            Ok(token)
        }
        _ => Err(SnapshotError::auth("token response has no access_token").with_data(text)),
    }
}
