//! gateway-core
//!
//! Pure trading-gateway logic:
//! - messages (input/output types)
//! - session state (logon handshake, sequence numbers)
//! - two-sided aggregated order book
//! - quote/order decision engine
//! - execution tracking and PnL
//! - the [`Gateway`] that routes messages between them

pub mod side;
pub mod order_type;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod top_of_book;
pub mod quote_engine;
pub mod execution_tracker;
pub mod pnl;
pub mod session;
pub mod gateway;
pub mod config;
pub mod error;
pub mod timestamp;

pub use side::Side;
pub use order_type::OrderType;

pub use messages::{
    ExecutionReport,
    Header,
    Heartbeat,
    HeartbeatReply,
    InputMessage,
    Logon,
    LogonAck,
    Logout,
    LogoutReply,
    MarketData,
    MarketDataKind,
    MdEntry,
    MdUpdateAction,
    NewOrderSingle,
    Outbound,
    OutboundHeader,
    OutputMessage,
    TestRequest,
};

pub use config::{GatewayConfig, QuotePolicy};
pub use error::GatewayError;
pub use execution_tracker::ExecutionTracker;
pub use gateway::Gateway;
pub use order::{OrdStatus, Order};
pub use order_book::OrderBook;
pub use pnl::{FillError, PnlTracker};
pub use quote_engine::{QuoteDecision, QuoteEngine};
pub use session::{Session, SessionState};
pub use top_of_book::TopOfBookSnapshot;

pub use rust_decimal::Decimal;
