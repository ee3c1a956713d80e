//! Translation between wire messages and the gateway's logical messages.
//!
//! - [`decode_input`]: `FixMessage` -> `InputMessage`, enforcing the
//!   tags each message type needs. Every entry of a market-data message is
//!   validated before anything is returned, so a bad entry drops the whole
//!   message instead of half-applying it.
//! - [`encode_output`]: `Outbound` -> `FixMessage`.

use std::str::FromStr;

use gateway_core::{
    ExecutionReport, Header, Heartbeat, InputMessage, Logon, Logout, MarketData,
    MarketDataKind, MdEntry, MdUpdateAction, OrdStatus, Outbound, OutputMessage, Side,
    TestRequest,
};
use rust_decimal::Decimal;

use crate::codec;
use crate::error::ProtocolError;
use crate::message::FixMessage;
use crate::tags::{self, msg_type};

// ============================================================================
// INPUT: counterparty -> gateway
// ============================================================================

/// Decode a wire message into a routable input message.
pub fn decode_input(msg: &FixMessage) -> Result<InputMessage, ProtocolError> {
    let kind = required_str(msg, tags::MSG_TYPE)?;

    match kind {
        msg_type::LOGON => decode_logon(msg).map(InputMessage::Logon),
        msg_type::HEARTBEAT => Ok(InputMessage::Heartbeat(Heartbeat {
            header: decode_header(msg)?,
            test_req_id: optional_string(msg, tags::TEST_REQ_ID),
        })),
        msg_type::TEST_REQUEST => Ok(InputMessage::TestRequest(TestRequest {
            header: decode_header(msg)?,
            test_req_id: optional_string(msg, tags::TEST_REQ_ID),
        })),
        msg_type::LOGOUT => Ok(InputMessage::Logout(Logout {
            header: decode_header(msg)?,
            text: optional_string(msg, tags::TEXT),
        })),
        msg_type::MARKET_DATA_SNAPSHOT => {
            decode_market_data(msg, MarketDataKind::Snapshot).map(InputMessage::MarketData)
        }
        msg_type::MARKET_DATA_INCREMENTAL => {
            decode_market_data(msg, MarketDataKind::Incremental).map(InputMessage::MarketData)
        }
        msg_type::EXECUTION_REPORT => {
            decode_execution_report(msg).map(InputMessage::ExecutionReport)
        }
        other => Err(ProtocolError::UnknownMessageType(other.to_string())),
    }
}

fn decode_header(msg: &FixMessage) -> Result<Header, ProtocolError> {
    Ok(Header {
        msg_seq_num: optional_parsed(msg, tags::MSG_SEQ_NUM)?,
        sender_comp_id: optional_string(msg, tags::SENDER_COMP_ID),
        target_comp_id: optional_string(msg, tags::TARGET_COMP_ID),
        sending_time: optional_string(msg, tags::SENDING_TIME),
    })
}

fn decode_logon(msg: &FixMessage) -> Result<Logon, ProtocolError> {
    Ok(Logon {
        msg_seq_num: required_parsed(msg, tags::MSG_SEQ_NUM)?,
        sender_comp_id: required_str(msg, tags::SENDER_COMP_ID)?.to_string(),
        target_comp_id: required_str(msg, tags::TARGET_COMP_ID)?.to_string(),
        sending_time: optional_string(msg, tags::SENDING_TIME),
        encrypt_method: optional_parsed(msg, tags::ENCRYPT_METHOD)?.unwrap_or(0),
        heart_bt_int: optional_parsed(msg, tags::HEART_BT_INT)?,
    })
}

fn decode_market_data(msg: &FixMessage, kind: MarketDataKind) -> Result<MarketData, ProtocolError> {
    let declared: u32 = required_parsed(msg, tags::NO_MD_ENTRIES)?;
    let indices = msg.group_indices();
    if (indices.len() as u64) < u64::from(declared) {
        return Err(ProtocolError::MissingRequiredTag(tags::MD_ENTRY_TYPE));
    }
    if (indices.len() as u64) > u64::from(declared) {
        return Err(ProtocolError::invalid(
            tags::NO_MD_ENTRIES,
            msg.get(tags::NO_MD_ENTRIES).unwrap_or_default(),
        ));
    }

    let message_action = match msg.get(tags::MD_UPDATE_ACTION) {
        Some(raw) => Some(parse_action(raw)?),
        None => None,
    };

    let mut entries = Vec::with_capacity(indices.len());
    for index in indices {
        let action = match kind {
            MarketDataKind::Snapshot => MdUpdateAction::New,
            MarketDataKind::Incremental => match msg.get_group(index, tags::MD_UPDATE_ACTION) {
                Some(raw) => parse_action(raw)?,
                None => message_action.unwrap_or(MdUpdateAction::New),
            },
        };

        let side_raw = required_group(msg, index, tags::MD_ENTRY_TYPE)?;
        let side = Side::from_md_entry_type(side_raw)
            .ok_or_else(|| ProtocolError::invalid(tags::MD_ENTRY_TYPE, side_raw))?;

        let price = parse_value::<Decimal>(
            tags::MD_ENTRY_PX,
            required_group(msg, index, tags::MD_ENTRY_PX)?,
        )?;

        let size = match action {
            MdUpdateAction::Delete => match non_empty(msg.get_group(index, tags::MD_ENTRY_SIZE)) {
                Some(raw) => parse_value::<u64>(tags::MD_ENTRY_SIZE, raw)?,
                None => 0,
            },
            MdUpdateAction::New | MdUpdateAction::Change => parse_value::<u64>(
                tags::MD_ENTRY_SIZE,
                required_group(msg, index, tags::MD_ENTRY_SIZE)?,
            )?,
        };

        entries.push(MdEntry {
            action,
            side,
            price,
            size,
        });
    }

    Ok(MarketData {
        header: decode_header(msg)?,
        kind,
        symbol: optional_string(msg, tags::SYMBOL),
        entries,
    })
}

fn decode_execution_report(msg: &FixMessage) -> Result<ExecutionReport, ProtocolError> {
    let cl_ord_id = required_str(msg, tags::CL_ORD_ID)?.to_string();

    let (status_tag, status_raw) = match non_empty(msg.get(tags::ORD_STATUS)) {
        Some(raw) => (tags::ORD_STATUS, raw),
        None => match non_empty(msg.get(tags::EXEC_TYPE)) {
            Some(raw) => (tags::EXEC_TYPE, raw),
            None => return Err(ProtocolError::MissingRequiredTag(tags::ORD_STATUS)),
        },
    };
    let ord_status =
        OrdStatus::from_fix(status_raw).ok_or_else(|| ProtocolError::invalid(status_tag, status_raw))?;

    let side = match non_empty(msg.get(tags::SIDE)) {
        Some(raw) => Some(Side::from_fix(raw).ok_or_else(|| ProtocolError::invalid(tags::SIDE, raw))?),
        None => None,
    };

    Ok(ExecutionReport {
        header: decode_header(msg)?,
        cl_ord_id,
        order_id: optional_string(msg, tags::ORDER_ID),
        exec_id: optional_string(msg, tags::EXEC_ID),
        exec_type: optional_string(msg, tags::EXEC_TYPE),
        ord_status,
        symbol: optional_string(msg, tags::SYMBOL),
        side,
        last_qty: optional_parsed(msg, tags::LAST_SHARES)?,
        last_px: optional_parsed(msg, tags::LAST_PX)?,
    })
}

// ============================================================================
// OUTPUT: gateway -> counterparty
// ============================================================================

/// Build the wire message for an outbound message.
pub fn encode_output(out: &Outbound) -> FixMessage {
    let mut msg = FixMessage::new();
    msg.set(tags::MSG_TYPE, out.message.msg_type())
        .set(tags::MSG_SEQ_NUM, out.header.msg_seq_num)
        .set(tags::SENDER_COMP_ID, &out.header.sender_comp_id)
        .set(tags::TARGET_COMP_ID, &out.header.target_comp_id)
        .set(tags::SENDING_TIME, &out.header.sending_time);

    match &out.message {
        OutputMessage::Logon(ack) => {
            msg.set(tags::ENCRYPT_METHOD, ack.encrypt_method)
                .set(tags::HEART_BT_INT, ack.heart_bt_int);
        }
        OutputMessage::Heartbeat(hb) => {
            if let Some(id) = &hb.test_req_id {
                msg.set(tags::TEST_REQ_ID, id);
            }
        }
        OutputMessage::Logout(logout) => {
            if let Some(text) = &logout.text {
                msg.set(tags::TEXT, text);
            }
        }
        OutputMessage::NewOrderSingle(order) => {
            msg.set(tags::CL_ORD_ID, &order.cl_ord_id)
                .set(tags::SYMBOL, &order.symbol)
                .set(tags::SIDE, order.side.as_fix())
                .set(tags::ORDER_QTY, order.quantity)
                .set(tags::PRICE, order.price)
                .set(tags::ORD_TYPE, order.order_type.as_fix())
                .set(tags::TRANSACT_TIME, &order.transact_time);
        }
    }

    msg
}

/// Encode an outbound message straight to bytes.
pub fn encode_outbound(out: &Outbound) -> Vec<u8> {
    codec::encode(&encode_output(out))
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn required_str(msg: &FixMessage, tag: u32) -> Result<&str, ProtocolError> {
    non_empty(msg.get(tag)).ok_or(ProtocolError::MissingRequiredTag(tag))
}

fn required_group(msg: &FixMessage, index: u32, tag: u32) -> Result<&str, ProtocolError> {
    non_empty(msg.get_group(index, tag)).ok_or(ProtocolError::MissingRequiredTag(tag))
}

fn optional_string(msg: &FixMessage, tag: u32) -> Option<String> {
    non_empty(msg.get(tag)).map(str::to_string)
}

fn parse_value<T: FromStr>(tag: u32, raw: &str) -> Result<T, ProtocolError> {
    raw.parse::<T>().map_err(|_| ProtocolError::invalid(tag, raw))
}

fn required_parsed<T: FromStr>(msg: &FixMessage, tag: u32) -> Result<T, ProtocolError> {
    parse_value(tag, required_str(msg, tag)?)
}

fn optional_parsed<T: FromStr>(msg: &FixMessage, tag: u32) -> Result<Option<T>, ProtocolError> {
    non_empty(msg.get(tag))
        .map(|raw| parse_value(tag, raw))
        .transpose()
}

fn parse_action(raw: &str) -> Result<MdUpdateAction, ProtocolError> {
    MdUpdateAction::from_fix(raw).ok_or_else(|| ProtocolError::invalid(tags::MD_UPDATE_ACTION, raw))
}
