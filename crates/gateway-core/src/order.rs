//! Tracked order state, keyed by client order id.
//!
//! Orders are only ever learned about through execution reports; the
//! gateway never holds resting orders itself.

use std::fmt;

/// Last known OrdStatus (39) of an order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OrdStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
}

impl OrdStatus {
    /// Parse a FIX OrdStatus (39) / ExecType (150) code.
    ///
    /// Only the five statuses the tracker knows about are accepted;
    /// anything else (pending, replaced, done-for-day, ...) is `None`.
    pub fn from_fix(value: &str) -> Option<Self> {
        match value {
            "0" => Some(OrdStatus::New),
            "1" => Some(OrdStatus::PartiallyFilled),
            "2" => Some(OrdStatus::Filled),
            "4" => Some(OrdStatus::Canceled),
            "8" => Some(OrdStatus::Rejected),
            _ => None,
        }
    }

    /// `true` once no further fills can arrive.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrdStatus::Filled | OrdStatus::Canceled | OrdStatus::Rejected
        )
    }
}

impl fmt::Display for OrdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrdStatus::New => "New",
            OrdStatus::PartiallyFilled => "PartiallyFilled",
            OrdStatus::Filled => "Filled",
            OrdStatus::Canceled => "Canceled",
            OrdStatus::Rejected => "Rejected",
        };
        f.write_str(name)
    }
}

/// A single tracked order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub cl_ord_id: String,
    pub status: OrdStatus,

    /// Number of execution reports seen for this id.
    pub reports: u32,
}

impl Order {
    pub fn new(cl_ord_id: impl Into<String>, status: OrdStatus) -> Self {
        Order {
            cl_ord_id: cl_ord_id.into(),
            status,
            reports: 1,
        }
    }
}
