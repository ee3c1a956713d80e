//! gateway-protocol
//!
//! FIX-lite wire handling for the trading gateway.
//!
//! This crate turns bytes into `gateway_core::InputMessage` values and
//! `gateway_core::Outbound` values back into bytes.
//!
//! - [`codec`]     : tag=value framing, BodyLength and CheckSum
//! - [`parser`]    : streaming reassembly of datagrams into messages
//! - [`translate`] : field maps <-> logical gateway messages
//! - [`pipe`]      : `|`-delimited rendering for logs and fixtures

pub mod tags;
pub mod error;
pub mod message;
pub mod codec;
pub mod parser;
pub mod translate;
pub mod pipe;

pub use error::ProtocolError;
pub use message::{Field, FieldKey, FixMessage};
pub use codec::{checksum, decode, encode};
pub use parser::FixParser;
pub use translate::{decode_input, encode_output, encode_outbound};
pub use pipe::{from_pipe_str, to_pipe_string};
