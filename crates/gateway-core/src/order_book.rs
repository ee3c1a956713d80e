//! Two-sided aggregated price book fed by market data.
//!
//! - Bids: best = highest price.
//! - Asks: best = lowest price.
//! - Each price maps to the size quoted at that level. Updates overwrite;
//!   they never accumulate.
//!
//! Invariant: no level is ever stored with size 0. An update to size 0
//! removes the level.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::side::Side;
use crate::top_of_book::TopOfBookSnapshot;

#[derive(Debug, Default, Clone)]
pub struct OrderBook {
    /// Bids: price -> size. `BTreeMap` keys ascend, so the best bid is
    /// the last key.
    bids: BTreeMap<Decimal, u64>,

    /// Asks: price -> size. The best ask is the first key.
    asks: BTreeMap<Decimal, u64>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Apply one level update.
    ///
    /// - `size == 0` removes `price` from `side` (no-op if absent).
    /// - `size > 0` sets `price -> size`, replacing any existing size.
    pub fn update(&mut self, side: Side, price: Decimal, size: u64) {
        let levels = self.side_mut(side);
        if size == 0 {
            levels.remove(&price);
        } else {
            levels.insert(price, size);
        }
    }

    /// Best (highest) bid price, if any.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Best (lowest) ask price, if any.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// `best_ask - best_bid`, only when both sides are quoted and the
    /// difference is representable.
    pub fn spread(&self) -> Option<Decimal> {
        let (bid, ask) = (self.best_bid()?, self.best_ask()?);
        ask.checked_sub(bid)
    }

    /// Midpoint of the best bid and ask.
    pub fn mid_price(&self) -> Option<Decimal> {
        let (bid, ask) = (self.best_bid()?, self.best_ask()?);
        bid.checked_add(ask)?.checked_div(Decimal::TWO)
    }

    /// Size quoted at `price` on `side`.
    pub fn size_at(&self, side: Side, price: Decimal) -> Option<u64> {
        self.side_ref(side).get(&price).copied()
    }

    /// Number of price levels on `side`.
    pub fn depth(&self, side: Side) -> usize {
        self.side_ref(side).len()
    }

    /// Levels of `side`, best first.
    pub fn levels(&self, side: Side) -> Vec<(Decimal, u64)> {
        let levels = self.side_ref(side);
        match side {
            Side::Buy => levels.iter().rev().map(|(p, s)| (*p, *s)).collect(),
            Side::Sell => levels.iter().map(|(p, s)| (*p, *s)).collect(),
        }
    }

    pub fn bids(&self) -> &BTreeMap<Decimal, u64> {
        &self.bids
    }

    pub fn asks(&self) -> &BTreeMap<Decimal, u64> {
        &self.asks
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    /// Return a simple snapshot of the current top-of-book.
    pub fn top_of_book_snapshot(&self) -> TopOfBookSnapshot {
        let bid = self.bids.iter().next_back().map(|(p, s)| (*p, *s));
        let ask = self.asks.iter().next().map(|(p, s)| (*p, *s));
        TopOfBookSnapshot::new(bid, ask)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn side_ref(&self, side: Side) -> &BTreeMap<Decimal, u64> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, u64> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
