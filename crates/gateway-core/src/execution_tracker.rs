//! Last known status per client order id.
//!
//! Pure bookkeeping: recording a report never touches the book or the
//! quote engine. Entries are created on the first report for an id,
//! overwritten by later ones, and kept for the life of the session.

use std::collections::HashMap;

use crate::order::{OrdStatus, Order};

#[derive(Debug, Default, Clone)]
pub struct ExecutionTracker {
    orders: HashMap<String, Order>,
}

impl ExecutionTracker {
    pub fn new() -> Self {
        ExecutionTracker::default()
    }

    /// Upsert the status of `cl_ord_id`.
    pub fn record(&mut self, cl_ord_id: &str, status: OrdStatus) {
        match self.orders.get_mut(cl_ord_id) {
            Some(order) => {
                order.status = status;
                order.reports = order.reports.saturating_add(1);
            }
            None => {
                self.orders
                    .insert(cl_ord_id.to_string(), Order::new(cl_ord_id, status));
            }
        }
    }

    pub fn status(&self, cl_ord_id: &str) -> Option<OrdStatus> {
        self.orders.get(cl_ord_id).map(|o| o.status)
    }

    pub fn get(&self, cl_ord_id: &str) -> Option<&Order> {
        self.orders.get(cl_ord_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Orders that can still receive fills.
    pub fn open_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values().filter(|o| !o.status.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_report_keeps_one_entry() {
        let mut tracker = ExecutionTracker::new();
        tracker.record("ORD1", OrdStatus::Filled);
        tracker.record("ORD1", OrdStatus::Filled);

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.status("ORD1"), Some(OrdStatus::Filled));
        assert_eq!(tracker.get("ORD1").map(|o| o.reports), Some(2));
    }

    #[test]
    fn later_report_overwrites_status() {
        let mut tracker = ExecutionTracker::new();
        tracker.record("ORD1", OrdStatus::New);
        tracker.record("ORD2", OrdStatus::New);
        tracker.record("ORD1", OrdStatus::PartiallyFilled);

        assert_eq!(tracker.status("ORD1"), Some(OrdStatus::PartiallyFilled));
        assert_eq!(tracker.status("ORD2"), Some(OrdStatus::New));
        assert_eq!(tracker.status("ORD3"), None);
        assert_eq!(tracker.open_orders().count(), 2);

        tracker.record("ORD2", OrdStatus::Canceled);
        assert_eq!(tracker.open_orders().count(), 1);
    }
}
