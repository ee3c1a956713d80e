//! Configuration values consumed by the gateway core.
//!
//! The core never loads configuration itself; the server crate builds
//! a [`GatewayConfig`] (from defaults, a TOML file and the environment)
//! and hands it to [`Gateway::new`](crate::gateway::Gateway::new).

use rust_decimal::Decimal;
use serde::Deserialize;

/// Quote/order decision policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuotePolicy {
    /// An order is emitted only when `spread < spread_threshold`.
    #[serde(with = "rust_decimal::serde::str")]
    pub spread_threshold: Decimal,

    /// OrderQty (38) of emitted orders.
    pub quote_quantity: u64,

    /// Symbol (55) of emitted orders.
    pub quote_symbol: String,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        QuotePolicy {
            spread_threshold: Decimal::new(5, 2),
            quote_quantity: 10,
            quote_symbol: "TEST".to_string(),
        }
    }
}

/// Gateway identity and session defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Our SenderCompID (49) on every outbound message.
    pub sender_comp_id: String,

    /// TargetCompID (56) for new orders.
    pub target_comp_id: String,

    /// HeartBtInt (108) used when the counterparty's logon omits it.
    pub heartbeat_interval: u32,

    /// Prefix of generated ClOrdIDs (`<prefix>-<n>`).
    pub cl_ord_id_prefix: String,

    pub quote: QuotePolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            sender_comp_id: "EXCHANGE".to_string(),
            target_comp_id: "CLIENT1".to_string(),
            heartbeat_interval: 30,
            cl_ord_id_prefix: "QUOTE".to_string(),
            quote: QuotePolicy::default(),
        }
    }
}
