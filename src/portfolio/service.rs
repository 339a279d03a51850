//! End-to-end portfolio retrieval: fetch, decode, resolve, assemble

use anyhow::{Context, Result};
use tracing::info;

use super::assembler;
use super::types::Portfolio;
use crate::api::client::DegiroClient;
use crate::api::decoder::decode_positions;
use crate::api::types::{Account, ServiceConfig};

/// Fetch the account's open positions and join them with product metadata.
///
/// Positions and products are fetched fresh on every call; nothing is
/// cached across requests.
pub async fn fetch_valued_portfolio(
    client: &DegiroClient,
    config: &ServiceConfig,
    account: &Account,
) -> Result<Portfolio> {
    let payload = client
        .fetch_portfolio(config, account)
        .await
        .context("failed to fetch portfolio payload")?;

    let positions = decode_positions(&payload).context("failed to decode portfolio rows")?;
    info!("Decoded {} open positions", positions.len());

    if positions.is_empty() {
        return Ok(Portfolio::default());
    }

    let ids: Vec<String> = positions.iter().map(|p| p.id.clone()).collect();
    let products = client
        .fetch_products(config, account, &ids)
        .await
        .context("failed to resolve product metadata")?;

    let portfolio =
        assembler::assemble(positions, &products).context("failed to assemble portfolio")?;
    Ok(portfolio)
}
