//! Minimal position / PnL tracker fed by execution-report fills.
//!
//! Tracks a signed position and the cash flow of fills; total PnL is the
//! cash plus the position marked at a given price (normally the book mid).
//! A fill whose quantity or notional does not fit is rejected whole, so
//! position and cash never disagree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("fill quantity {0} does not fit a signed position")]
    QuantityOutOfRange(u64),

    #[error("fill of {qty} @ {price} overflows position or cash")]
    Overflow { qty: u64, price: Decimal },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PnlTracker {
    position: i64,
    cash: Decimal,
}

impl PnlTracker {
    pub fn new() -> Self {
        PnlTracker::default()
    }

    /// Apply a fill. Zero-quantity fills are ignored. On error nothing
    /// is changed.
    pub fn on_fill(&mut self, side: Side, qty: u64, price: Decimal) -> Result<(), FillError> {
        if qty == 0 {
            return Ok(());
        }
        let signed = i64::try_from(qty).map_err(|_| FillError::QuantityOutOfRange(qty))?;
        let overflow = || FillError::Overflow { qty, price };

        let notional = Decimal::from(qty).checked_mul(price).ok_or_else(overflow)?;
        let (position, cash) = match side {
            Side::Buy => (
                self.position.checked_add(signed),
                self.cash.checked_sub(notional),
            ),
            Side::Sell => (
                self.position.checked_sub(signed),
                self.cash.checked_add(notional),
            ),
        };

        match (position, cash) {
            (Some(position), Some(cash)) => {
                self.position = position;
                self.cash = cash;
                Ok(())
            }
            _ => Err(overflow()),
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    /// Cash PnL from fills.
    pub fn realized_pnl(&self) -> Decimal {
        self.cash
    }

    /// Cash plus position marked at `mark`; `None` if that overflows.
    pub fn total_pnl(&self, mark: Decimal) -> Option<Decimal> {
        Decimal::from(self.position)
            .checked_mul(mark)?
            .checked_add(self.cash)
    }
}
