//! Pipe-delimited rendering of FIX bytes.
//!
//! Logs and test fixtures write messages with `|` in place of SOH. These
//! helpers convert in both directions; they never touch the codec itself.

use crate::tags::SOH;

/// Render wire bytes with SOH shown as `|`. Invalid UTF-8 is replaced.
pub fn to_pipe_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(SOH as char, "|")
}

/// Turn a pipe-delimited fixture into wire bytes.
pub fn from_pipe_str(text: &str) -> Vec<u8> {
    text.bytes()
        .map(|b| if b == b'|' { SOH } else { b })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipes_become_soh() {
        assert_eq!(from_pipe_str("35=0|34=2|"), b"35=0\x0134=2\x01".to_vec());
    }

    #[test]
    fn soh_renders_as_pipe() {
        assert_eq!(to_pipe_string(b"8=FIX.4.2\x0135=A\x01"), "8=FIX.4.2|35=A|");
    }

    #[test]
    fn lossy_on_invalid_utf8() {
        let rendered = to_pipe_string(&[b'5', b'8', b'=', 0xff, SOH]);
        assert!(rendered.starts_with("58="));
        assert!(rendered.ends_with('|'));
    }
}
