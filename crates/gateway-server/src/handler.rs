//! Datagram handling.
//!
//! `MessageHandler` owns the `Gateway` and the stream parser. Each call to
//! [`MessageHandler::on_datagram`] runs every message the datagram
//! completes through decode -> gateway -> encode and returns the reply
//! buffers in order. Nothing that arrives on the wire is fatal: bad input
//! is logged and dropped.

use gateway_core::{Gateway, GatewayConfig};
use gateway_protocol::{decode_input, encode_outbound, to_pipe_string, FixMessage, FixParser};
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub struct MessageHandler {
    gateway: Gateway,
    parser: FixParser,
}

impl MessageHandler {
    pub fn new(config: GatewayConfig, max_pending_bytes: usize) -> Self {
        MessageHandler {
            gateway: Gateway::new(config),
            parser: FixParser::with_max_pending(max_pending_bytes),
        }
    }

    /// Feed one datagram; returns the encoded replies it produced.
    pub fn on_datagram(&mut self, data: &[u8]) -> Vec<Vec<u8>> {
        trace!(wire = %to_pipe_string(data), "inbound datagram");

        if let Err(err) = self.parser.append_buffer(data) {
            warn!(error = %err, "dropping buffered input");
            return Vec::new();
        }

        let mut replies = Vec::new();
        loop {
            match self.parser.get_message() {
                Ok(Some(msg)) => {
                    if let Some(reply) = self.handle_message(&msg) {
                        replies.push(reply);
                    }
                }
                Ok(None) => break,
                Err(err) => warn!(error = %err, "dropping undecodable message"),
            }
        }

        if self.parser.pending() > 0 {
            debug!(pending = self.parser.pending(), "waiting for the rest of a message");
        }
        replies
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    fn handle_message(&mut self, msg: &FixMessage) -> Option<Vec<u8>> {
        let input = match decode_input(msg) {
            Ok(input) => input,
            Err(err) => {
                warn!(
                    msg_type = msg.msg_type().unwrap_or("-"),
                    error = %err,
                    "dropping message"
                );
                return None;
            }
        };

        let msg_type = input.msg_type();
        let seq = input.msg_seq_num();
        match self.gateway.process_message(input) {
            Ok(Some(out)) => {
                let bytes = encode_outbound(&out);
                debug!(
                    msg_type = out.message.msg_type(),
                    seq = out.header.msg_seq_num,
                    "reply"
                );
                trace!(wire = %to_pipe_string(&bytes), "outbound");
                Some(bytes)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(msg_type, seq = ?seq, error = %err, "message refused");
                None
            }
        }
    }
}
