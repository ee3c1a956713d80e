//! FIX-lite wire codec.
//!
//! Frame layout (every field, the last included, ends with SOH):
//!
//! ```text
//! 8=FIX.4.2 | 9=<BodyLength> | <header> <body> <groups> | 10=<CheckSum>
//! ```
//!
//! - `<header>`: 35, 34, 49, 56, 52, in that order, when present.
//! - `<body>`: remaining top-level tags, ascending, except NoMDEntries.
//! - `<groups>`: NoMDEntries, then repeating-group entries by entry index,
//!   tags ascending within an entry.
//! - BodyLength counts the bytes after the `9=` field up to and including
//!   the SOH before `10=`.
//! - CheckSum is the byte sum of everything before `10=`, modulo 256,
//!   written as three digits.
//!
//! Decoding never panics on hostile input; every failure is a
//! [`ProtocolError`].

use crate::error::ProtocolError;
use crate::message::FixMessage;
use crate::tags::{self, SOH};

/// Encode a message. Tags 8, 9 and 10 in `msg` are ignored and
/// recomputed.
pub fn encode(msg: &FixMessage) -> Vec<u8> {
    let mut body = Vec::with_capacity(256);

    for tag in tags::HEADER_ORDER {
        if let Some(value) = msg.get(tag) {
            push_field(&mut body, tag, value);
        }
    }

    let mut rest: Vec<(u32, &str)> = msg
        .iter()
        .filter(|(key, _)| key.group.is_none())
        .filter(|(key, _)| !tags::is_framing_tag(key.tag) && tags::header_position(key.tag).is_none())
        .filter(|(key, _)| key.tag != tags::NO_MD_ENTRIES)
        .map(|(key, value)| (key.tag, value))
        .collect();
    rest.sort_by_key(|(tag, _)| *tag);
    for (tag, value) in rest {
        push_field(&mut body, tag, value);
    }

    // NoMDEntries opens the group on decode, so nothing top-level may follow it.
    if let Some(count) = msg.get(tags::NO_MD_ENTRIES) {
        push_field(&mut body, tags::NO_MD_ENTRIES, count);
    }

    let mut grouped: Vec<(u32, u32, &str)> = msg
        .iter()
        .filter(|(key, _)| !tags::is_framing_tag(key.tag))
        .filter_map(|(key, value)| key.group.map(|index| (index, key.tag, value)))
        .collect();
    grouped.sort_by_key(|(index, tag, _)| (*index, *tag));
    for (_, tag, value) in grouped {
        push_field(&mut body, tag, value);
    }

    let mut out = Vec::with_capacity(body.len() + 32);
    push_field(&mut out, tags::BEGIN_STRING_TAG, tags::BEGIN_STRING);
    push_field(&mut out, tags::BODY_LENGTH, &body.len().to_string());
    out.extend_from_slice(&body);

    let sum = checksum(&out);
    push_field(&mut out, tags::CHECK_SUM, &format!("{:03}", sum));
    out
}

/// Decode exactly one message.
///
/// - No complete `10=...` field yet: [`ProtocolError::Incomplete`].
/// - A segment without `=` or with a bad tag: `MalformedField`.
/// - CheckSum value disagreeing with the bytes: `ChecksumMismatch`.
///
/// Absent business tags are not an error here.
pub fn decode(buf: &[u8]) -> Result<FixMessage, ProtocolError> {
    let (ck_start, ck_end) = find_checksum_field(buf).ok_or(ProtocolError::Incomplete)?;

    if buf[ck_end..].iter().any(|b| *b != SOH) {
        return Err(ProtocolError::MalformedField(
            "trailing bytes after CheckSum".to_string(),
        ));
    }

    let declared_raw = segment_str(&buf[ck_start + 3..ck_end - 1])?;
    let declared: u32 = declared_raw
        .parse()
        .map_err(|_| ProtocolError::invalid(tags::CHECK_SUM, declared_raw))?;
    let computed = u32::from(checksum(&buf[..ck_start]));
    if declared != computed {
        return Err(ProtocolError::ChecksumMismatch {
            expected: computed,
            actual: declared,
        });
    }

    let mut msg = FixMessage::new();
    let mut groups = GroupTracker::default();

    for segment in buf[..ck_start].split(|b| *b == SOH) {
        if segment.is_empty() {
            continue;
        }
        let (tag, value) = split_field(segment)?;
        match groups.assign(tag) {
            Some(index) => msg.set_group(index, tag, value),
            None => msg.set(tag, value),
        };
    }
    msg.set(tags::CHECK_SUM, declared_raw);

    Ok(msg)
}

/// FIX checksum: byte sum modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Locate the first complete CheckSum field.
///
/// Returns `(start, end)` where `start` is the offset of `10=` and `end`
/// is one past its terminating SOH.
pub(crate) fn find_checksum_field(buf: &[u8]) -> Option<(usize, usize)> {
    let mut field_start = 0;
    while field_start < buf.len() {
        let rest = &buf[field_start..];
        let field_len = rest.iter().position(|b| *b == SOH)?;
        if rest.starts_with(b"10=") {
            return Some((field_start, field_start + field_len + 1));
        }
        field_start += field_len + 1;
    }
    None
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn push_field(out: &mut Vec<u8>, tag: u32, value: &str) {
    out.extend_from_slice(tag.to_string().as_bytes());
    out.push(b'=');
    out.extend_from_slice(value.as_bytes());
    out.push(SOH);
}

fn segment_str(segment: &[u8]) -> Result<&str, ProtocolError> {
    std::str::from_utf8(segment)
        .map_err(|_| ProtocolError::MalformedField(String::from_utf8_lossy(segment).into_owned()))
}

fn split_field(segment: &[u8]) -> Result<(u32, &str), ProtocolError> {
    let text = segment_str(segment)?;
    let (tag_raw, value) = text
        .split_once('=')
        .ok_or_else(|| ProtocolError::MalformedField(text.to_string()))?;

    match tag_raw.parse::<u32>() {
        Ok(tag) if tag > 0 => Ok((tag, value)),
        _ => Err(ProtocolError::MalformedField(text.to_string())),
    }
}

/// Assigns repeating-group entry indices while decoding.
///
/// Once NoMDEntries has been seen, MD-entry tags belong to the current
/// entry; a tag already present in that entry opens the next one.
#[derive(Default)]
struct GroupTracker {
    in_group: bool,
    current: Option<u32>,
    seen: Vec<u32>,
}

impl GroupTracker {
    fn assign(&mut self, tag: u32) -> Option<u32> {
        if tag == tags::NO_MD_ENTRIES {
            self.in_group = true;
            self.current = None;
            self.seen.clear();
            return None;
        }
        if !self.in_group || !tags::is_md_entry_tag(tag) {
            return None;
        }

        let index = match self.current {
            None => 0,
            Some(index) if self.seen.contains(&tag) => {
                self.seen.clear();
                index + 1
            }
            Some(index) => index,
        };
        self.current = Some(index);
        self.seen.push(tag);
        Some(index)
    }
}
