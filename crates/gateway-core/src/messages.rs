//! Message types used by the gateway core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what the gateway consumes.
//! - [`Outbound`]: what the gateway produces (header + [`OutputMessage`]).
//!
//! Note: the FIX-lite encoder/decoder lives in the `gateway-protocol`
//! crate; this module is purely logical.

use rust_decimal::Decimal;

use crate::order::OrdStatus;
use crate::order_type::OrderType;
use crate::side::Side;

/// Standard header fields as received. Only a Logon needs a complete
/// header, so everything here is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub msg_seq_num: Option<u64>,
    pub sender_comp_id: Option<String>,
    pub target_comp_id: Option<String>,
    pub sending_time: Option<String>,
}

/// A decoded inbound message, routed by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Logon (35=A).
    Logon(Logon),

    /// Heartbeat (35=0).
    Heartbeat(Heartbeat),

    /// TestRequest (35=1); answered with a Heartbeat.
    TestRequest(TestRequest),

    /// Logout (35=5).
    Logout(Logout),

    /// Market data snapshot (35=W) or incremental refresh (35=X).
    MarketData(MarketData),

    /// Execution report (35=8).
    ExecutionReport(ExecutionReport),
}

impl InputMessage {
    /// FIX MsgType code of this message.
    pub fn msg_type(&self) -> &'static str {
        match self {
            InputMessage::Logon(_) => "A",
            InputMessage::Heartbeat(_) => "0",
            InputMessage::TestRequest(_) => "1",
            InputMessage::Logout(_) => "5",
            InputMessage::MarketData(md) => match md.kind {
                MarketDataKind::Snapshot => "W",
                MarketDataKind::Incremental => "X",
            },
            InputMessage::ExecutionReport(_) => "8",
        }
    }

    /// Inbound MsgSeqNum, if the sender supplied one.
    pub fn msg_seq_num(&self) -> Option<u64> {
        match self {
            InputMessage::Logon(l) => Some(l.msg_seq_num),
            InputMessage::Heartbeat(h) => h.header.msg_seq_num,
            InputMessage::TestRequest(t) => t.header.msg_seq_num,
            InputMessage::Logout(l) => l.header.msg_seq_num,
            InputMessage::MarketData(md) => md.header.msg_seq_num,
            InputMessage::ExecutionReport(er) => er.header.msg_seq_num,
        }
    }
}

/// Logon request. The header tags are mandatory here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logon {
    pub msg_seq_num: u64,
    pub sender_comp_id: String,
    pub target_comp_id: String,
    pub sending_time: Option<String>,

    /// EncryptMethod (98); only `0` (none) is ever used.
    pub encrypt_method: u32,

    /// HeartBtInt (108) requested by the counterparty, in seconds.
    pub heart_bt_int: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Heartbeat {
    pub header: Header,
    pub test_req_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestRequest {
    pub header: Header,
    pub test_req_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Logout {
    pub header: Header,
    pub text: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarketDataKind {
    /// Full refresh (35=W).
    Snapshot,
    /// Incremental refresh (35=X).
    Incremental,
}

/// MDUpdateAction (279).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MdUpdateAction {
    New,
    Change,
    Delete,
}

impl MdUpdateAction {
    pub fn from_fix(value: &str) -> Option<Self> {
        match value {
            "0" => Some(MdUpdateAction::New),
            "1" => Some(MdUpdateAction::Change),
            "2" => Some(MdUpdateAction::Delete),
            _ => None,
        }
    }
}

/// One entry of the NoMDEntries (268) repeating group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdEntry {
    pub action: MdUpdateAction,
    pub side: Side,
    pub price: Decimal,
    /// Ignored for `Delete`.
    pub size: u64,
}

impl MdEntry {
    /// Size to apply to the book: a delete is an update to size 0.
    pub fn effective_size(&self) -> u64 {
        match self.action {
            MdUpdateAction::Delete => 0,
            MdUpdateAction::New | MdUpdateAction::Change => self.size,
        }
    }
}

/// A market-data message, already validated entry by entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketData {
    pub header: Header,
    pub kind: MarketDataKind,
    pub symbol: Option<String>,
    pub entries: Vec<MdEntry>,
}

/// Execution report (35=8), reduced to the fields the gateway tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub header: Header,

    /// ClOrdID (11): the key the tracker records under.
    pub cl_ord_id: String,
    pub order_id: Option<String>,
    pub exec_id: Option<String>,
    pub exec_type: Option<String>,
    pub ord_status: OrdStatus,

    pub symbol: Option<String>,
    pub side: Option<Side>,

    /// LastShares (32) / LastPx (31) of this fill, when it is one.
    pub last_qty: Option<u64>,
    pub last_px: Option<Decimal>,
}

/// Header stamped on every outbound message by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundHeader {
    pub msg_seq_num: u64,
    pub sender_comp_id: String,
    pub target_comp_id: String,
    pub sending_time: String,
}

/// An outbound message, ready for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub header: OutboundHeader,
    pub message: OutputMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// Logon acknowledgement (35=A).
    Logon(LogonAck),

    /// Heartbeat (35=0), optionally answering a TestRequest.
    Heartbeat(HeartbeatReply),

    /// Logout confirmation (35=5).
    Logout(LogoutReply),

    /// New order decided by the quote engine (35=D).
    NewOrderSingle(NewOrderSingle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonAck {
    pub encrypt_method: u32,
    pub heart_bt_int: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeartbeatReply {
    pub test_req_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogoutReply {
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderSingle {
    pub cl_ord_id: String,
    pub symbol: String,
    pub side: Side,
    pub quantity: u64,
    pub price: Decimal,
    pub order_type: OrderType,
    pub transact_time: String,
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl OutputMessage {
    pub fn logon_ack(heart_bt_int: u32) -> Self {
        OutputMessage::Logon(LogonAck {
            encrypt_method: 0,
            heart_bt_int,
        })
    }

    pub fn heartbeat(test_req_id: Option<String>) -> Self {
        OutputMessage::Heartbeat(HeartbeatReply { test_req_id })
    }

    pub fn logout(text: Option<String>) -> Self {
        OutputMessage::Logout(LogoutReply { text })
    }

    /// FIX MsgType code of this message.
    pub fn msg_type(&self) -> &'static str {
        match self {
            OutputMessage::Logon(_) => "A",
            OutputMessage::Heartbeat(_) => "0",
            OutputMessage::Logout(_) => "5",
            OutputMessage::NewOrderSingle(_) => "D",
        }
    }
}
