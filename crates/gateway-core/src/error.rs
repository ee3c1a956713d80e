//! Error types for the gateway core.
//!
//! Codec-level errors live in `gateway-protocol`; these cover messages
//! that decoded fine but that the session state machine refuses. The
//! caller logs them and drops the message; none of them is fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A non-logon message arrived before the session was logged on.
    #[error("message type {msg_type} rejected: session not logged on")]
    NotLoggedOn { msg_type: &'static str },

    /// The session has been torn down and is not accepting a logon.
    #[error("session is disconnected")]
    SessionDisconnected,
}
