//! Session bootstrap: reuse a persisted token, fall back to a fresh login
//!
//! The persisted token expires server-side with no client-visible signal,
//! so validity is only learned from the config fetch. An expired token gets
//! exactly one re-authentication attempt; any other failure propagates.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::client::DegiroClient;
use crate::api::types::{ApiError, ServiceConfig};
use crate::config::Credentials;
use crate::session::SessionStore;

/// Produce a validated `ServiceConfig`, logging in if needed.
pub async fn establish_config(
    client: &DegiroClient,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<ServiceConfig> {
    if let Some(session) = store.load().context("failed to read persisted session")? {
        match client.fetch_config(&session).await {
            Ok(config) => {
                info!("Reusing persisted session");
                return Ok(config);
            }
            Err(ApiError::SessionExpired) => {
                warn!("Persisted session rejected by server, performing fresh login");
            }
            Err(err) => return Err(err).context("config fetch failed"),
        }
    } else {
        info!("No persisted session found, performing login");
    }

    login_and_persist(client, store, credentials).await
}

/// Authenticate from scratch, ignoring any stored token.
pub async fn force_login(
    client: &DegiroClient,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<ServiceConfig> {
    info!("Forcing a fresh login");
    login_and_persist(client, store, credentials).await
}

async fn login_and_persist(
    client: &DegiroClient,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<ServiceConfig> {
    let session = client.login(credentials).await.context("login failed")?;
    store
        .save(&session)
        .context("failed to persist session token")?;

    // No second fallback: a token the server just issued must be accepted.
    let config = client
        .fetch_config(&session)
        .await
        .context("config fetch failed with a freshly issued session")?;
    Ok(config)
}
