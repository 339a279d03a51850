//! HTTP client for the platform's private API
//!
//! One shared `reqwest` client with an explicit per-call timeout. Session
//! authentication rides on a cookie for the login/config endpoints and on
//! query or path parameters for the account, portfolio and product
//! endpoints, matching what the web frontend sends.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use super::types::{
    Account, ApiError, DataEnvelope, Product, RawAccountData, RawConfigData, ServiceConfig,
};
use crate::config::Credentials;
use crate::session::Session;

/// Production trader host
pub const DEFAULT_BASE_URL: &str = "https://trader.degiro.nl";

/// Per-call timeout; a timed-out call surfaces as a transport error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DegiroClient {
    http: reqwest::Client,
    base_url: String,
}

impl DegiroClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange credentials for a session token.
    ///
    /// The token is carried in the first `set-cookie` header of the login
    /// response; a response without one means the login was rejected or the
    /// endpoint changed shape. Persisting the token is the caller's call.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let url = format!("{}/login/secure/login", self.base_url);
        info!("Logging in as {}", credentials.username);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
                "isRedirectToMobile": false,
                "isPassCodeReset": false,
            }))
            .send()
            .await?;

        let token = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(session_token_from_cookie)
            .ok_or(ApiError::Authentication)?;

        Ok(Session::new(token))
    }

    /// Fetch the per-session service endpoint map.
    ///
    /// Doubles as the session validity check: an authorization rejection
    /// maps to `SessionExpired` so the caller can tell "log in again" apart
    /// from a server or network failure.
    pub async fn fetch_config(&self, session: &Session) -> Result<ServiceConfig, ApiError> {
        let url = format!("{}/login/secure/config", self.base_url);
        debug!("Fetching service config");

        let response = self
            .http
            .get(&url)
            .header(COOKIE, format!("JSESSIONID={}", session.token()))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired);
        }
        let response = response.error_for_status()?;

        let body: DataEnvelope<RawConfigData> = response.json().await?;
        ServiceConfig::from_raw(session.clone(), body.data)
    }

    /// Fetch the numeric account id and display metadata
    pub async fn fetch_account(&self, config: &ServiceConfig) -> Result<Account, ApiError> {
        let url = format!("{}client", config.pa_url);
        debug!("Fetching account info");

        let response = self
            .http
            .get(&url)
            .query(&[("sessionId", config.session.token())])
            .send()
            .await?
            .error_for_status()?;

        let body: DataEnvelope<RawAccountData> = response.json().await?;
        Account::from_raw(body.data)
    }

    /// Fetch the raw portfolio payload for the account.
    ///
    /// The body is the server's loosely-typed update document; decoding the
    /// positional rows inside it is `decoder`'s job.
    pub async fn fetch_portfolio(
        &self,
        config: &ServiceConfig,
        account: &Account,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}v5/update/{};jsessionid={}",
            config.trading_url,
            account.int_account,
            config.session.token()
        );
        debug!("Fetching portfolio for account {}", account.int_account);

        let response = self
            .http
            .get(&url)
            .query(&[("portfolio", "0")])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Resolve a batch of product ids in a single call.
    ///
    /// Every requested id must come back or the whole call fails with
    /// `UnknownProduct`; ids are never silently omitted.
    pub async fn fetch_products(
        &self,
        config: &ServiceConfig,
        account: &Account,
        ids: &[String],
    ) -> Result<HashMap<String, Product>, ApiError> {
        let url = format!("{}v5/products/info", config.product_search_url);
        debug!("Resolving {} product ids in one batch", ids.len());

        let response = self
            .http
            .post(&url)
            .query(&[
                ("intAccount", account.int_account.to_string()),
                ("sessionId", config.session.token().to_string()),
            ])
            .json(ids)
            .send()
            .await?
            .error_for_status()?;

        let body: DataEnvelope<HashMap<String, Product>> = response.json().await?;
        let products = body.data;

        for id in ids {
            if !products.contains_key(id) {
                return Err(ApiError::UnknownProduct(id.clone()));
            }
        }

        Ok(products)
    }
}

/// Token = value of the first cookie in the header, up to the first `;`
fn session_token_from_cookie(cookie: &str) -> Option<String> {
    let first = cookie.split(';').next()?;
    let (_, value) = first.split_once('=')?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
