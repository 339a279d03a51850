//! Portfolio type definitions with strong typing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::types::Product;

/// Open position decoded from the update endpoint
///
/// `id` doubles as the join key into the product catalog. `size` is signed:
/// negative for short positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub size: Decimal,
    pub price: Decimal,
    pub break_even_price: Decimal,
}

impl Position {
    /// Paper profit/loss against the break-even cost basis
    pub fn unrealized_pnl(&self) -> Decimal {
        (self.price - self.break_even_price) * self.size
    }

    /// Current market value of the position
    pub fn market_value(&self) -> Decimal {
        self.price * self.size
    }
}

/// A position paired with its product metadata; ids always match
#[derive(Debug, Clone, Serialize)]
pub struct PositionProduct {
    pub product: Product,
    pub position: Position,
}

impl PositionProduct {
    pub fn unrealized_pnl(&self) -> Decimal {
        self.position.unrealized_pnl()
    }
}

/// Valued portfolio: positions joined with products, in server order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Portfolio {
    pub entries: Vec<PositionProduct>,
}

impl Portfolio {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of unrealized P&L over all positions
    pub fn total_unrealized_pnl(&self) -> Decimal {
        self.entries.iter().map(|e| e.unrealized_pnl()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(size: Decimal, price: Decimal, break_even: Decimal) -> Position {
        Position {
            id: "331868".to_string(),
            size,
            price,
            break_even_price: break_even,
        }
    }

    #[test]
    fn pnl_is_price_move_times_size() {
        let p = position(dec!(10), dec!(105), dec!(100));
        assert_eq!(p.unrealized_pnl(), dec!(50));
    }

    #[test]
    fn short_position_gains_when_price_drops() {
        let p = position(dec!(-5), dec!(20), dec!(25));
        assert_eq!(p.unrealized_pnl(), dec!(25));
    }

    #[test]
    fn losing_position_has_negative_pnl() {
        let p = position(dec!(8), dec!(90), dec!(100));
        assert_eq!(p.unrealized_pnl(), dec!(-80));
    }

    #[test]
    fn market_value_uses_current_price() {
        let p = position(dec!(10), dec!(105), dec!(100));
        assert_eq!(p.market_value(), dec!(1050));
    }
}
