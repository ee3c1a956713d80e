//! Gateway orchestrator.
//!
//! Owns the session, the order book, the quote engine and the execution
//! tracker, and routes each decoded [`InputMessage`] to the right one:
//!
//! - Logon -> session handshake, Logon ack.
//! - Heartbeat / TestRequest -> Heartbeat reply.
//! - Logout -> Logout reply, then a fresh session awaiting logon.
//! - Market data -> book updates, then the quote engine; maybe a new order.
//! - Execution report -> tracker (and PnL on fills); no reply.
//!
//! Everything runs synchronously on the caller's thread: one message is
//! fully handled before the next is accepted, so nothing here locks.

use tracing::{debug, info, warn};

use rust_decimal::Decimal;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::execution_tracker::ExecutionTracker;
use crate::messages::{
    ExecutionReport, InputMessage, MarketData, NewOrderSingle, Outbound, OutputMessage,
};
use crate::order_book::OrderBook;
use crate::pnl::PnlTracker;
use crate::quote_engine::QuoteEngine;
use crate::session::Session;
use crate::timestamp::fix_timestamp_now;

#[derive(Debug)]
pub struct Gateway {
    config: GatewayConfig,
    session: Session,
    book: OrderBook,
    quote_engine: QuoteEngine,
    tracker: ExecutionTracker,
    pnl: PnlTracker,

    /// Counter behind generated ClOrdIDs.
    next_cl_ord_id: u64,
}

impl Gateway {
    /// Create a gateway whose session is already waiting for a logon.
    pub fn new(config: GatewayConfig) -> Self {
        let session = Self::fresh_session(&config);
        let quote_engine = QuoteEngine::new(config.quote.clone());
        Gateway {
            config,
            session,
            book: OrderBook::new(),
            quote_engine,
            tracker: ExecutionTracker::new(),
            pnl: PnlTracker::new(),
            next_cl_ord_id: 1,
        }
    }

    /// Process a single input message and return the reply, if any.
    ///
    /// `Err` means the session refused the message; the caller logs and
    /// drops it. Book, tracker and session are left untouched in that case.
    pub fn process_message(&mut self, msg: InputMessage) -> Result<Option<Outbound>, GatewayError> {
        let msg_type = msg.msg_type();
        let seq = msg.msg_seq_num();

        match msg {
            InputMessage::Logon(logon) => self.session.on_logon(&logon).map(Some),
            InputMessage::Heartbeat(_) => {
                self.admit(msg_type, seq)?;
                Ok(Some(self.session.reply(OutputMessage::heartbeat(None))))
            }
            InputMessage::TestRequest(req) => {
                self.admit(msg_type, seq)?;
                Ok(Some(
                    self.session.reply(OutputMessage::heartbeat(req.test_req_id)),
                ))
            }
            InputMessage::Logout(logout) => {
                self.admit(msg_type, seq)?;
                if let Some(text) = logout.text.as_deref() {
                    debug!(text, "logout reason");
                }
                let reply = self.session.on_logout()?;
                self.reset_session();
                Ok(Some(reply))
            }
            InputMessage::MarketData(md) => {
                self.admit(msg_type, seq)?;
                Ok(self.process_market_data(md))
            }
            InputMessage::ExecutionReport(report) => {
                self.admit(msg_type, seq)?;
                self.process_execution_report(report);
                Ok(None)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn admit(&mut self, msg_type: &'static str, seq: Option<u64>) -> Result<(), GatewayError> {
        self.session.ensure_active(msg_type)?;
        self.session.observe_inbound(seq);
        Ok(())
    }

    fn process_market_data(&mut self, md: MarketData) -> Option<Outbound> {
        for entry in &md.entries {
            self.book
                .update(entry.side, entry.price, entry.effective_size());
        }

        let tob = self.book.top_of_book_snapshot();
        debug!(
            symbol = md.symbol.as_deref().unwrap_or("-"),
            entries = md.entries.len(),
            bid = ?tob.bid,
            ask = ?tob.ask,
            "market data applied"
        );

        let decision = self.quote_engine.evaluate(&self.book)?;
        let order = NewOrderSingle {
            cl_ord_id: self.next_cl_ord_id(),
            symbol: decision.symbol,
            side: decision.side,
            quantity: decision.quantity,
            price: decision.price,
            order_type: decision.order_type,
            transact_time: fix_timestamp_now(),
        };
        info!(
            cl_ord_id = %order.cl_ord_id,
            symbol = %order.symbol,
            price = %order.price,
            qty = order.quantity,
            "spread below threshold, sending order"
        );

        let target = self.config.target_comp_id.clone();
        Some(
            self.session
                .outbound_to(&target, OutputMessage::NewOrderSingle(order)),
        )
    }

    fn process_execution_report(&mut self, report: ExecutionReport) {
        self.tracker.record(&report.cl_ord_id, report.ord_status);

        if let (Some(side), Some(qty), Some(px)) = (report.side, report.last_qty, report.last_px) {
            if let Err(err) = self.pnl.on_fill(side, qty, px) {
                warn!(cl_ord_id = %report.cl_ord_id, error = %err, "fill not applied to PnL");
            }
        }

        debug!(
            cl_ord_id = %report.cl_ord_id,
            status = %report.ord_status,
            position = self.pnl.position(),
            open_orders = self.tracker.open_orders().count(),
            "execution report recorded"
        );
    }

    /// Start over after a logout: new sequence numbers, new order map.
    fn reset_session(&mut self) {
        self.session = Self::fresh_session(&self.config);
        self.tracker = ExecutionTracker::new();
        self.pnl = PnlTracker::new();
    }

    fn fresh_session(config: &GatewayConfig) -> Session {
        let mut session = Session::new(config.sender_comp_id.clone(), config.heartbeat_interval);
        session.connect();
        session
    }

    fn next_cl_ord_id(&mut self) -> String {
        let id = format!("{}-{}", self.config.cl_ord_id_prefix, self.next_cl_ord_id);
        self.next_cl_ord_id += 1;
        id
    }

    // -------------------------------------------------------------------------
    // Accessors (tests, admin queries)
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn tracker(&self) -> &ExecutionTracker {
        &self.tracker
    }

    pub fn pnl(&self) -> &PnlTracker {
        &self.pnl
    }

    /// Cash plus position marked at the book mid. `None` while the book is
    /// one-sided.
    pub fn marked_pnl(&self) -> Option<Decimal> {
        self.book
            .mid_price()
            .and_then(|mid| self.pnl.total_pnl(mid))
    }
}
