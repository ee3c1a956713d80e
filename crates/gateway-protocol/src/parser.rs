//! Streaming parser: accumulates received bytes and yields complete
//! messages one at a time.
//!
//! A message is complete once its CheckSum field has arrived. Anything
//! before that stays buffered, so a message split across datagrams is
//! reassembled rather than rejected. Bytes that cannot start a message
//! (no `8=` in sight) are discarded, and a partial message followed by a
//! fresh `8=` is abandoned in favour of the newer one.

use bytes::{Buf, BytesMut};
use tracing::{debug, warn};

use crate::codec::{decode, find_checksum_field};
use crate::error::ProtocolError;
use crate::message::FixMessage;
use crate::tags::SOH;

pub const DEFAULT_MAX_PENDING: usize = 64 * 1024;

#[derive(Debug)]
pub struct FixParser {
    buffer: BytesMut,
    max_pending: usize,
}

impl Default for FixParser {
    fn default() -> Self {
        FixParser::new()
    }
}

impl FixParser {
    pub fn new() -> Self {
        FixParser::with_max_pending(DEFAULT_MAX_PENDING)
    }

    pub fn with_max_pending(max_pending: usize) -> Self {
        FixParser {
            buffer: BytesMut::with_capacity(max_pending.min(DEFAULT_MAX_PENDING)),
            max_pending,
        }
    }

    /// Append received bytes.
    ///
    /// If the pending data would exceed the bound, everything pending is
    /// dropped and `BufferOverflow` is returned.
    pub fn append_buffer(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        let len = self.buffer.len() + data.len();
        if len > self.max_pending {
            warn!(len, max = self.max_pending, "parser buffer overflow, discarding");
            self.buffer.clear();
            return Err(ProtocolError::BufferOverflow {
                len,
                max: self.max_pending,
            });
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Next complete message, `Ok(None)` if more bytes are needed.
    ///
    /// A complete but undecodable message is consumed and its error
    /// returned, so the next call proceeds with whatever follows.
    pub fn get_message(&mut self) -> Result<Option<FixMessage>, ProtocolError> {
        let Some((ck_start, ck_end)) = find_checksum_field(&self.buffer) else {
            self.discard_garbage();
            return Ok(None);
        };

        let begin = last_message_start(&self.buffer[..ck_start]).unwrap_or(0);
        if begin > 0 {
            debug!(discarded = begin, "dropping bytes before BeginString");
        }

        let mut frame = self.buffer.split_to(ck_end);
        frame.advance(begin);

        // Trailing delimiters between messages carry nothing.
        while self.buffer.first() == Some(&SOH) {
            self.buffer.advance(1);
        }

        decode(&frame).map(Some)
    }

    /// Bytes waiting for the rest of their message.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Without a CheckSum field yet, keep only what could still become a
    /// message: from the last `8=` field on, or a lone trailing `8`.
    fn discard_garbage(&mut self) {
        match last_message_start(&self.buffer) {
            Some(start) => self.buffer.advance(start),
            None => {
                let keep_tail = self.buffer.last() == Some(&b'8')
                    && (self.buffer.len() == 1 || self.buffer[self.buffer.len() - 2] == SOH);
                let drop = if keep_tail {
                    self.buffer.len() - 1
                } else {
                    self.buffer.len()
                };
                if drop > 0 {
                    debug!(discarded = drop, "dropping bytes with no BeginString");
                }
                self.buffer.advance(drop);
            }
        }
    }
}

/// Offset of the last field starting with `8=`.
fn last_message_start(buf: &[u8]) -> Option<usize> {
    (0..buf.len())
        .rev()
        .find(|&i| buf[i..].starts_with(b"8=") && (i == 0 || buf[i - 1] == SOH))
}
