// crates/gateway-core/tests/scenarios.rs
//
// End-to-end scenarios: wire bytes in, decoded replies out.
use std::str::FromStr;

use gateway_core::{Decimal, Gateway, GatewayConfig, OrdStatus, Side};
use gateway_protocol::tags;
use gateway_protocol::{
    checksum, decode, decode_input, encode_outbound, from_pipe_str, FixMessage, ProtocolError,
};

fn px(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Wrap a pipe-delimited body with BeginString, BodyLength and CheckSum.
fn frame(body: &str) -> Vec<u8> {
    let body = from_pipe_str(body);
    let mut out = format!("8=FIX.4.2\x019={}\x01", body.len()).into_bytes();
    out.extend_from_slice(&body);
    let sum = checksum(&out);
    out.extend_from_slice(format!("10={:03}\x01", sum).as_bytes());
    out
}

/// Feed one framed message through decode -> gateway -> encode.
fn send(gw: &mut Gateway, body: &str) -> Option<FixMessage> {
    let msg = decode(&frame(body)).expect("fixture must decode");
    let input = decode_input(&msg).expect("fixture must translate");
    gw.process_message(input)
        .expect("gateway accepted the message")
        .map(|out| decode(&encode_outbound(&out)).expect("reply must decode"))
}

fn logged_on() -> Gateway {
    let mut gw = Gateway::new(GatewayConfig::default());
    send(&mut gw, "35=A|34=1|49=CLIENT1|56=EXCHANGE|98=0|108=30|").unwrap();
    gw
}

#[test]
fn logon_is_acknowledged() {
    let mut gw = Gateway::new(GatewayConfig::default());
    let reply = send(&mut gw, "35=A|34=1|49=CLIENT1|56=EXCHANGE|98=0|108=30|").unwrap();

    assert_eq!(reply.get(tags::BEGIN_STRING_TAG), Some("FIX.4.2"));
    assert_eq!(reply.get(tags::MSG_TYPE), Some("A"));
    assert_eq!(reply.get(tags::MSG_SEQ_NUM), Some("1"));
    assert_eq!(reply.get(tags::SENDER_COMP_ID), Some("EXCHANGE"));
    assert_eq!(reply.get(tags::TARGET_COMP_ID), Some("CLIENT1"));
    assert_eq!(reply.get(tags::ENCRYPT_METHOD), Some("0"));
    assert_eq!(reply.get(tags::HEART_BT_INT), Some("30"));
    assert!(reply.get(tags::SENDING_TIME).is_some());
    assert!(gw.session().is_active());
}

#[test]
fn snapshot_then_incremental_delete() {
    let mut gw = logged_on();

    let out = send(
        &mut gw,
        "35=W|34=2|55=AAPL|268=2|269=0|270=172.35|271=100|269=1|270=172.40|271=50|",
    );
    assert!(out.is_none());
    assert_eq!(gw.book().best_bid(), Some(px("172.35")));
    assert_eq!(gw.book().best_ask(), Some(px("172.40")));
    assert_eq!(gw.book().spread(), Some(px("0.05")));

    let out = send(&mut gw, "35=X|34=3|55=AAPL|268=1|279=2|269=1|270=172.40|");
    assert!(out.is_none());
    assert_eq!(gw.book().best_ask(), None);
    assert_eq!(gw.book().size_at(Side::Sell, px("172.40")), None);
    assert_eq!(gw.book().best_bid(), Some(px("172.35")));
}

#[test]
fn bid_snapshot_then_zero_size_update_empties_bids() {
    let mut gw = logged_on();
    send(&mut gw, "35=W|34=2|268=1|269=0|270=172.35|271=100|");
    assert_eq!(gw.book().size_at(Side::Buy, px("172.35")), Some(100));

    send(&mut gw, "35=X|34=3|268=1|279=1|269=0|270=172.35|271=0|");
    assert!(gw.book().bids().is_empty());
}

#[test]
fn narrow_spread_emits_one_limit_sell() {
    let mut gw = logged_on();

    let out = send(
        &mut gw,
        "35=W|34=2|268=2|269=0|270=172.35|271=100|269=1|270=172.40|271=50|",
    );
    assert!(out.is_none(), "spread equal to the threshold must not trade");

    let order = send(&mut gw, "35=X|34=3|268=1|279=0|269=1|270=172.39|271=20|").unwrap();
    assert_eq!(order.get(tags::MSG_TYPE), Some("D"));
    assert_eq!(order.get(tags::MSG_SEQ_NUM), Some("2"));
    assert_eq!(order.get(tags::CL_ORD_ID), Some("QUOTE-1"));
    assert_eq!(order.get(tags::SYMBOL), Some("TEST"));
    assert_eq!(order.get(tags::SIDE), Some("2"));
    assert_eq!(order.get(tags::ORDER_QTY), Some("10"));
    assert_eq!(order.get(tags::PRICE), Some("172.39"));
    assert_eq!(order.get(tags::ORD_TYPE), Some("2"));
    assert!(order.get(tags::TRANSACT_TIME).is_some());

    // The book is unchanged, so the next update quotes again.
    let again = send(&mut gw, "35=X|34=4|268=1|279=1|269=0|270=172.35|271=80|").unwrap();
    assert_eq!(again.get(tags::CL_ORD_ID), Some("QUOTE-2"));
    assert_eq!(again.get(tags::MSG_SEQ_NUM), Some("3"));
}

#[test]
fn execution_reports_update_the_tracker() {
    let mut gw = logged_on();

    assert!(send(&mut gw, "35=8|34=2|11=ORD1|39=0|").is_none());
    assert_eq!(gw.tracker().status("ORD1"), Some(OrdStatus::New));

    assert!(send(&mut gw, "35=8|34=3|11=ORD1|39=2|54=1|32=10|31=172.39|").is_none());
    assert!(send(&mut gw, "35=8|34=4|11=ORD1|39=2|").is_none());
    let order = gw.tracker().get("ORD1").unwrap();
    assert_eq!(order.status, OrdStatus::Filled);
    assert_eq!(order.reports, 3);
    assert_eq!(gw.tracker().len(), 1);
    assert_eq!(gw.pnl().position(), 10);
}

#[test]
fn extreme_values_on_the_wire_are_absorbed() {
    let mut gw = logged_on();

    let out = send(
        &mut gw,
        "35=W|34=2|268=2|269=0|270=-79228162514264337593543950335|271=18446744073709551615|\
         269=1|270=79228162514264337593543950335|271=1|",
    );
    assert!(out.is_none());
    assert_eq!(gw.book().spread(), None);
    assert_eq!(gw.book().mid_price(), Some(Decimal::ZERO));

    assert!(send(&mut gw, "35=8|34=3|11=ORD1|39=2|54=1|32=18446744073709551615|31=1|").is_none());
    assert_eq!(gw.tracker().status("ORD1"), Some(OrdStatus::Filled));
    assert_eq!(gw.pnl().position(), 0);
    assert!(gw.session().is_active());
}

#[test]
fn heartbeat_echoes_test_request_id() {
    let mut gw = logged_on();
    let reply = send(&mut gw, "35=1|34=2|112=PING-7|").unwrap();
    assert_eq!(reply.get(tags::MSG_TYPE), Some("0"));
    assert_eq!(reply.get(tags::TEST_REQ_ID), Some("PING-7"));
    assert_eq!(reply.get(tags::MSG_SEQ_NUM), Some("2"));
}

#[test]
fn logout_starts_a_fresh_session() {
    let mut gw = logged_on();
    let reply = send(&mut gw, "35=5|34=2|58=bye|").unwrap();
    assert_eq!(reply.get(tags::MSG_TYPE), Some("5"));
    assert!(!gw.session().is_active());

    let msg = decode(&frame("35=0|34=3|")).unwrap();
    assert!(gw.process_message(decode_input(&msg).unwrap()).is_err());

    let reply = send(&mut gw, "35=A|34=1|49=CLIENT1|56=EXCHANGE|98=0|108=30|").unwrap();
    assert_eq!(reply.get(tags::MSG_SEQ_NUM), Some("1"));
}

#[test]
fn truncated_input_is_incomplete() {
    assert_eq!(decode(b"8=FIX.4.2\x019=5\x01"), Err(ProtocolError::Incomplete));
    let bytes = from_pipe_str("8=FIX.4.2|9=5|35=A|");
    assert_eq!(decode(&bytes), Err(ProtocolError::Incomplete));
}

#[test]
fn market_data_before_logon_is_refused() {
    let mut gw = Gateway::new(GatewayConfig::default());
    let msg = decode(&frame("35=W|34=1|268=1|269=0|270=1|271=1|")).unwrap();
    assert!(gw.process_message(decode_input(&msg).unwrap()).is_err());
    assert!(gw.book().is_empty());
}
