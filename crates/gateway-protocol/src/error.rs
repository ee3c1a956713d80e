//! Codec and translation errors.
//!
//! Syntax errors (`MalformedField`, `Incomplete`, `ChecksumMismatch`,
//! `BufferOverflow`) come from the codec; semantic errors
//! (`MissingRequiredTag`, `InvalidValue`, `UnknownMessageType`) come from
//! translating a well-formed message into a logical one. All of them drop
//! a single message and never poison later ones.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A segment without `=`, a non-numeric / out-of-range tag, or bytes
    /// that are not text.
    #[error("malformed field: {0:?}")]
    MalformedField(String),

    /// No terminating CheckSum field yet; retry with more bytes.
    #[error("incomplete message: no CheckSum field yet")]
    Incomplete,

    /// The message is well-formed but a tag the handler needs is absent
    /// (or empty).
    #[error("missing required tag {0}")]
    MissingRequiredTag(u32),

    /// No routing rule for this MsgType.
    #[error("unknown message type {0:?}")]
    UnknownMessageType(String),

    /// A tag is present but its value cannot be interpreted.
    #[error("invalid value {value:?} for tag {tag}")]
    InvalidValue { tag: u32, value: String },

    #[error("checksum mismatch: computed {expected:03}, message carries {actual}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// The streaming parser's pending buffer grew past its bound.
    #[error("pending buffer overflow: {len} bytes exceeds limit of {max}")]
    BufferOverflow { len: usize, max: usize },
}

impl ProtocolError {
    /// `true` when the caller should wait for more bytes.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ProtocolError::Incomplete)
    }

    pub(crate) fn invalid(tag: u32, value: &str) -> Self {
        ProtocolError::InvalidValue {
            tag,
            value: value.to_string(),
        }
    }
}
