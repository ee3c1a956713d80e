//! Helper type for representing top-of-book state.
//!
//! Used by the gateway to log top-of-book changes after each
//! market-data message, and by tests.

use rust_decimal::Decimal;

/// Best bid and best ask, each as `(price, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBookSnapshot {
    pub bid: Option<(Decimal, u64)>,
    pub ask: Option<(Decimal, u64)>,
}

impl TopOfBookSnapshot {
    pub fn new(bid: Option<(Decimal, u64)>, ask: Option<(Decimal, u64)>) -> Self {
        TopOfBookSnapshot { bid, ask }
    }

    /// Returns `true` if there is *no* bid and *no* ask.
    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none()
    }
}
