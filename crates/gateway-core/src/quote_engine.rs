//! Quote/order decision engine.
//!
//! A pure function of the current book and a [`QuotePolicy`]: when both
//! sides are quoted and the spread is strictly below the threshold, the
//! engine decides to sell `quote_quantity` of `quote_symbol` at the best
//! ask as a limit order.
//!
//! There is no in-flight order suppression. Every qualifying book update
//! produces one decision, even if an earlier order for the same
//! opportunity is still outstanding.

use rust_decimal::Decimal;

use crate::config::QuotePolicy;
use crate::order_book::OrderBook;
use crate::order_type::OrderType;
use crate::side::Side;

/// What the engine wants to send. The gateway turns this into a
/// NewOrderSingle by assigning a ClOrdID and TransactTime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDecision {
    pub symbol: String,
    pub side: Side,
    pub quantity: u64,
    pub price: Decimal,
    pub order_type: OrderType,
}

#[derive(Debug, Clone)]
pub struct QuoteEngine {
    policy: QuotePolicy,
}

impl QuoteEngine {
    pub fn new(policy: QuotePolicy) -> Self {
        QuoteEngine { policy }
    }

    pub fn policy(&self) -> &QuotePolicy {
        &self.policy
    }

    /// Evaluate the book. `None` if either side is empty, the spread
    /// overflows, or it is at or above the threshold.
    pub fn evaluate(&self, book: &OrderBook) -> Option<QuoteDecision> {
        let spread = book.spread()?;
        let best_ask = book.best_ask()?;

        if spread >= self.policy.spread_threshold {
            return None;
        }

        Some(QuoteDecision {
            symbol: self.policy.quote_symbol.clone(),
            side: Side::Sell,
            quantity: self.policy.quote_quantity,
            price: best_ask,
            order_type: OrderType::Limit,
        })
    }
}
