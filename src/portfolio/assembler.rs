//! Join of decoded positions with resolved product metadata

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::types::{Portfolio, Position, PositionProduct};
use crate::api::types::Product;

/// A position whose id has no entry in the resolved product map.
///
/// Unreachable when the map comes from the batch lookup (which fails on any
/// unresolved id), but the join does not rely on that.
#[derive(Debug, Error)]
#[error("position {0} has no product metadata in the resolved batch")]
pub struct MissingProduct(pub String);

/// Pair every position with its product, preserving position order.
///
/// The join is total: one unmatched position fails the whole assembly, a
/// partial portfolio is never returned.
pub fn assemble(
    positions: Vec<Position>,
    products: &HashMap<String, Product>,
) -> Result<Portfolio, MissingProduct> {
    let mut entries = Vec::with_capacity(positions.len());
    for position in positions {
        let product = products
            .get(&position.id)
            .cloned()
            .ok_or_else(|| MissingProduct(position.id.clone()))?;
        entries.push(PositionProduct { product, position });
    }
    debug!("Assembled portfolio with {} positions", entries.len());
    Ok(Portfolio { entries })
}
