//! gateway-server
//!
//! UDP transport for the trading gateway. One task owns the socket and
//! the gateway; every datagram is handled to completion before the next
//! one is read.

pub mod config;
pub mod handler;
pub mod server;

pub use config::{Config, TransportConfig};
pub use handler::MessageHandler;
pub use server::UdpGateway;
