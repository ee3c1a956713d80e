//! Session state: logon handshake and sequence numbers for one
//! counterparty.
//!
//! ```text
//! Disconnected --connect()--> AwaitingLogon --Logon--> Active
//!      ^                                                 |
//!      +--------------------- Logout --------------------+
//! ```
//!
//! The outbound counter starts at 1 and is advanced once per outbound
//! message, whatever its type. No gap-fill or resend is implemented; the
//! inbound high-water mark is kept for observability only.

use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::messages::{Logon, Outbound, OutboundHeader, OutputMessage};
use crate::timestamp::fix_timestamp_now;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    AwaitingLogon,
    Active,
}

#[derive(Debug, Clone)]
pub struct Session {
    /// Our own CompID, stamped as SenderCompID on everything we send.
    local_comp_id: String,
    default_heartbeat: u32,

    state: SessionState,
    counterparty: Option<String>,

    /// MsgSeqNum of the next outbound message.
    next_outbound_seq: u64,

    /// Highest inbound MsgSeqNum seen so far (0 = none).
    inbound_high_water: u64,

    heartbeat_interval: u32,
}

impl Session {
    pub fn new(local_comp_id: impl Into<String>, default_heartbeat: u32) -> Self {
        Session {
            local_comp_id: local_comp_id.into(),
            default_heartbeat,
            state: SessionState::Disconnected,
            counterparty: None,
            next_outbound_seq: 1,
            inbound_high_water: 0,
            heartbeat_interval: default_heartbeat,
        }
    }

    /// Transport is ready: start waiting for a logon.
    pub fn connect(&mut self) {
        if self.state == SessionState::Disconnected {
            self.state = SessionState::AwaitingLogon;
        }
    }

    pub fn disconnect(&mut self) {
        self.state = SessionState::Disconnected;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn counterparty(&self) -> Option<&str> {
        self.counterparty.as_deref()
    }

    pub fn local_comp_id(&self) -> &str {
        &self.local_comp_id
    }

    pub fn next_outbound_seq(&self) -> u64 {
        self.next_outbound_seq
    }

    pub fn inbound_high_water(&self) -> u64 {
        self.inbound_high_water
    }

    pub fn heartbeat_interval(&self) -> u32 {
        self.heartbeat_interval
    }

    /// Handle a logon and build the acknowledgement.
    ///
    /// Accepted while awaiting logon and, as a re-logon, while active.
    pub fn on_logon(&mut self, logon: &Logon) -> Result<Outbound, GatewayError> {
        if self.state == SessionState::Disconnected {
            return Err(GatewayError::SessionDisconnected);
        }

        if logon.target_comp_id != self.local_comp_id {
            debug!(
                target_comp_id = %logon.target_comp_id,
                local = %self.local_comp_id,
                "logon addressed to a different CompID"
            );
        }

        self.observe_inbound(Some(logon.msg_seq_num));
        self.heartbeat_interval = logon.heart_bt_int.unwrap_or(self.default_heartbeat);
        self.counterparty = Some(logon.sender_comp_id.clone());

        if self.state == SessionState::AwaitingLogon {
            info!(counterparty = %logon.sender_comp_id, "session logged on");
        } else {
            info!(counterparty = %logon.sender_comp_id, "re-logon on active session");
        }
        self.state = SessionState::Active;

        let heart_bt_int = self.heartbeat_interval;
        Ok(self.outbound_to(
            &logon.sender_comp_id,
            OutputMessage::logon_ack(heart_bt_int),
        ))
    }

    /// Fail unless the session is active.
    pub fn ensure_active(&self, msg_type: &'static str) -> Result<(), GatewayError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::AwaitingLogon => Err(GatewayError::NotLoggedOn { msg_type }),
            SessionState::Disconnected => Err(GatewayError::SessionDisconnected),
        }
    }

    /// Track the inbound MsgSeqNum. Regressions are logged, not rejected.
    pub fn observe_inbound(&mut self, msg_seq_num: Option<u64>) {
        let Some(seq) = msg_seq_num else {
            return;
        };
        if seq <= self.inbound_high_water {
            warn!(
                seq,
                high_water = self.inbound_high_water,
                "inbound MsgSeqNum did not advance"
            );
            return;
        }
        self.inbound_high_water = seq;
    }

    /// Confirm a logout and tear the session down.
    pub fn on_logout(&mut self) -> Result<Outbound, GatewayError> {
        self.ensure_active("5")?;
        let reply = self.reply(OutputMessage::logout(None));
        info!(counterparty = ?self.counterparty, "session logged out");
        self.disconnect();
        Ok(reply)
    }

    /// Address `message` back to the logged-on counterparty.
    pub fn reply(&mut self, message: OutputMessage) -> Outbound {
        let target = self.counterparty.clone().unwrap_or_default();
        self.outbound_to(&target, message)
    }

    /// Stamp `message` with the next outbound header.
    pub fn outbound_to(&mut self, target_comp_id: &str, message: OutputMessage) -> Outbound {
        let msg_seq_num = self.next_outbound_seq;
        self.next_outbound_seq += 1;

        Outbound {
            header: OutboundHeader {
                msg_seq_num,
                sender_comp_id: self.local_comp_id.clone(),
                target_comp_id: target_comp_id.to_string(),
                sending_time: fix_timestamp_now(),
            },
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn logon(seq: u64, heart_bt_int: Option<u32>) -> Logon {
        Logon {
            msg_seq_num: seq,
            sender_comp_id: "CLIENT1".to_string(),
            target_comp_id: "EXCHANGE".to_string(),
            sending_time: None,
            encrypt_method: 0,
            heart_bt_int,
        }
    }

    fn connected() -> Session {
        let mut session = Session::new("EXCHANGE", 30);
        session.connect();
        session
    }

    #[test]
    fn new_session_is_disconnected_and_rejects_logon() {
        let mut session = Session::new("EXCHANGE", 30);
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(
            session.on_logon(&logon(1, None)),
            Err(GatewayError::SessionDisconnected)
        );
    }

    #[test]
    fn logon_activates_and_acks_with_first_sequence_number() {
        let mut session = connected();
        assert_eq!(session.state(), SessionState::AwaitingLogon);

        let ack = session.on_logon(&logon(1, None)).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(ack.header.msg_seq_num, 1);
        assert_eq!(ack.header.target_comp_id, "CLIENT1");
        assert_eq!(ack.header.sender_comp_id, "EXCHANGE");
        assert_eq!(ack.message, OutputMessage::logon_ack(30));
        assert_eq!(session.next_outbound_seq(), 2);
        assert_eq!(session.counterparty(), Some("CLIENT1"));
    }

    #[test]
    fn logon_heartbeat_interval_is_echoed() {
        let mut session = connected();
        let ack = session.on_logon(&logon(1, Some(45))).unwrap();
        assert_eq!(ack.message, OutputMessage::logon_ack(45));
        assert_eq!(session.heartbeat_interval(), 45);
    }

    #[test]
    fn awaiting_logon_rejects_other_types() {
        let session = connected();
        assert_eq!(
            session.ensure_active("W"),
            Err(GatewayError::NotLoggedOn { msg_type: "W" })
        );
    }

    #[test]
    fn inbound_high_water_ignores_regressions() {
        let mut session = connected();
        session.observe_inbound(Some(5));
        session.observe_inbound(Some(3));
        session.observe_inbound(None);
        assert_eq!(session.inbound_high_water(), 5);
    }

    #[test]
    fn logout_disconnects() {
        let mut session = connected();
        session.on_logon(&logon(1, None)).unwrap();
        let reply = session.on_logout().unwrap();
        assert_eq!(reply.header.msg_seq_num, 2);
        assert_eq!(reply.message, OutputMessage::logout(None));
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.on_logout().is_err());
    }

    proptest! {
        #[test]
        fn outbound_sequence_is_strictly_increasing(heartbeats in 0usize..200) {
            let mut session = connected();
            let mut seqs = vec![session.on_logon(&logon(1, None)).unwrap().header.msg_seq_num];
            for _ in 0..heartbeats {
                seqs.push(session.reply(OutputMessage::heartbeat(None)).header.msg_seq_num);
            }
            prop_assert_eq!(seqs[0], 1);
            prop_assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
        }

        #[test]
        fn logons_and_heartbeats_share_one_counter(
            is_logon in prop::collection::vec(any::<bool>(), 0..200)
        ) {
            let mut session = connected();
            let mut seqs = vec![session.on_logon(&logon(1, None)).unwrap().header.msg_seq_num];
            for (i, relogon) in is_logon.into_iter().enumerate() {
                let out = if relogon {
                    session.on_logon(&logon(i as u64 + 2, None)).unwrap()
                } else {
                    session.ensure_active("0").unwrap();
                    session.reply(OutputMessage::heartbeat(None))
                };
                prop_assert!(session.is_active());
                seqs.push(out.header.msg_seq_num);
            }
            prop_assert_eq!(seqs[0], 1);
            prop_assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
            prop_assert_eq!(session.next_outbound_seq(), seqs.len() as u64 + 1);
        }
    }
}
