//! Typed models for the private API responses
//!
//! The endpoints return loosely-typed JSON. Everything crossing into the
//! rest of the crate goes through the shapes below, with absence converted
//! into a typed error at this boundary instead of leaking into the pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::session::Session;

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("login rejected: response carried no usable session cookie")]
    Authentication,

    #[error("session rejected by the config endpoint (expired or revoked)")]
    SessionExpired,

    #[error("config response missing required field `{0}`")]
    MalformedConfig(&'static str),

    #[error("response missing required field `{0}`")]
    MalformedResponse(&'static str),

    #[error("position record {product_id}: missing or malformed `{field}`")]
    MissingField {
        product_id: String,
        field: &'static str,
    },

    #[error("product {0} absent from batch lookup response")]
    UnknownProduct(String),

    #[error("failed to decode response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Generic `{"data": ...}` envelope the API wraps every body in
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Per-session service endpoint map, produced once by the config fetch
///
/// Immutable for the process lifetime; all later calls derive their URLs
/// from it and authenticate with the session it was obtained with.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub session: Session,
    pub client_id: u64,
    pub trading_url: String,
    pub pa_url: String,
    pub product_search_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfigData {
    pub client_id: Option<u64>,
    pub trading_url: Option<String>,
    pub pa_url: Option<String>,
    pub product_search_url: Option<String>,
}

impl ServiceConfig {
    /// Validate the raw config body; a partial config is never returned
    pub(crate) fn from_raw(session: Session, raw: RawConfigData) -> Result<Self, ApiError> {
        Ok(Self {
            client_id: raw.client_id.ok_or(ApiError::MalformedConfig("clientId"))?,
            trading_url: raw
                .trading_url
                .ok_or(ApiError::MalformedConfig("tradingUrl"))?,
            pa_url: raw.pa_url.ok_or(ApiError::MalformedConfig("paUrl"))?,
            product_search_url: raw
                .product_search_url
                .ok_or(ApiError::MalformedConfig("productSearchUrl"))?,
            session,
        })
    }
}

/// Account identity and display metadata
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub int_account: u64,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAccountData {
    pub int_account: Option<u64>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Account {
    pub(crate) fn from_raw(raw: RawAccountData) -> Result<Self, ApiError> {
        Ok(Self {
            int_account: raw
                .int_account
                .ok_or(ApiError::MalformedResponse("intAccount"))?,
            username: raw.username.ok_or(ApiError::MalformedResponse("username"))?,
            display_name: raw.display_name,
            email: raw.email,
        })
    }
}

/// Product metadata from the batch lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub isin: String,
    pub symbol: String,
    pub currency: String,
    pub close_price: Option<Decimal>,
    pub close_price_date: Option<NaiveDate>,
}

/// The API is inconsistent about whether product ids are strings or numbers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn config_missing_url_is_malformed() {
        let raw: RawConfigData = serde_json::from_value(serde_json::json!({
            "clientId": 112233,
            "paUrl": "https://trader.degiro.nl/pa/secure/",
            "productSearchUrl": "https://trader.degiro.nl/product_search/secure/"
        }))
        .unwrap();

        let err = ServiceConfig::from_raw(Session::new("tok"), raw).unwrap_err();
        assert!(matches!(err, ApiError::MalformedConfig("tradingUrl")));
    }

    #[test]
    fn complete_config_parses() {
        let raw: RawConfigData = serde_json::from_value(serde_json::json!({
            "clientId": 112233,
            "tradingUrl": "https://trader.degiro.nl/trading/secure/",
            "paUrl": "https://trader.degiro.nl/pa/secure/",
            "productSearchUrl": "https://trader.degiro.nl/product_search/secure/"
        }))
        .unwrap();

        let config = ServiceConfig::from_raw(Session::new("tok"), raw).unwrap();
        assert_eq!(config.client_id, 112233);
        assert_eq!(config.session.token(), "tok");
        assert!(config.trading_url.ends_with("/trading/secure/"));
    }

    #[test]
    fn account_requires_id_and_username() {
        let raw: RawAccountData = serde_json::from_value(serde_json::json!({
            "username": "jane"
        }))
        .unwrap();
        let err = Account::from_raw(raw).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse("intAccount")));

        let raw: RawAccountData = serde_json::from_value(serde_json::json!({
            "intAccount": 42
        }))
        .unwrap();
        let err = Account::from_raw(raw).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse("username")));
    }

    #[test]
    fn product_accepts_numeric_id() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 331868,
            "name": "Acme Industries",
            "isin": "US0000000001",
            "symbol": "ACME",
            "currency": "USD",
            "closePrice": 105.5,
            "closePriceDate": "2021-06-01"
        }))
        .unwrap();

        assert_eq!(product.id, "331868");
        assert_eq!(product.close_price, Some(dec!(105.5)));
        assert_eq!(
            product.close_price_date,
            Some(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap())
        );
    }

    #[test]
    fn product_tolerates_missing_close_price() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "17461000",
            "name": "Acme Industries",
            "isin": "US0000000001",
            "symbol": "ACME",
            "currency": "USD"
        }))
        .unwrap();

        assert_eq!(product.close_price, None);
        assert_eq!(product.close_price_date, None);
    }
}
