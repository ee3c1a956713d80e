// crates/gateway-server/tests/udp_roundtrip.rs
use std::time::Duration;

use gateway_protocol::{decode, encode, tags, FixMessage};
use gateway_server::{Config, UdpGateway};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::time::timeout;

fn loopback_config() -> Config {
    let mut config = Config::default();
    config.transport.bind_addr = "127.0.0.1".to_string();
    config.transport.port = 0;
    config
}

fn logon() -> Vec<u8> {
    let mut msg = FixMessage::new();
    msg.set(tags::MSG_TYPE, "A")
        .set(tags::MSG_SEQ_NUM, 1)
        .set(tags::SENDER_COMP_ID, "CLIENT1")
        .set(tags::TARGET_COMP_ID, "EXCHANGE")
        .set(tags::HEART_BT_INT, 30);
    encode(&msg)
}

async fn recv(socket: &UdpSocket) -> FixMessage {
    let mut buf = vec![0u8; 4096];
    let len = timeout(Duration::from_secs(5), socket.recv(&mut buf))
        .await
        .expect("reply within timeout")
        .unwrap();
    decode(&buf[..len]).unwrap()
}

#[tokio::test]
async fn logon_is_answered_to_the_sender() {
    let gateway = UdpGateway::bind(&loopback_config()).await.unwrap();
    let server_addr = gateway.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(gateway.run(async move {
        let _ = stop_rx.await;
    }));

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.connect(server_addr).await.unwrap();
    client.send(&logon()).await.unwrap();

    let ack = recv(&client).await;
    assert_eq!(ack.get(tags::MSG_TYPE), Some("A"));
    assert_eq!(ack.get(tags::MSG_SEQ_NUM), Some("1"));
    assert_eq!(ack.get(tags::HEART_BT_INT), Some("30"));

    let mut test_request = FixMessage::new();
    test_request
        .set(tags::MSG_TYPE, "1")
        .set(tags::MSG_SEQ_NUM, 2)
        .set(tags::TEST_REQ_ID, "T1");
    client.send(&encode(&test_request)).await.unwrap();

    let heartbeat = recv(&client).await;
    assert_eq!(heartbeat.get(tags::MSG_TYPE), Some("0"));
    assert_eq!(heartbeat.get(tags::TEST_REQ_ID), Some("T1"));
    assert_eq!(heartbeat.get(tags::MSG_SEQ_NUM), Some("2"));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn replies_go_to_reply_to_when_configured() {
    let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut config = loopback_config();
    config.transport.reply_to = Some(listener.local_addr().unwrap().to_string());

    let gateway = UdpGateway::bind(&config).await.unwrap();
    let server_addr = gateway.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(gateway.run(async move {
        let _ = stop_rx.await;
    }));

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(&logon(), server_addr).await.unwrap();

    let ack = recv(&listener).await;
    assert_eq!(ack.get(tags::MSG_TYPE), Some("A"));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
