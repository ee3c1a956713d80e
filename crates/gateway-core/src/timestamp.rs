//! FIX UTCTimestamp formatting (`YYYYMMDD-HH:MM:SS.sss`), used for
//! SendingTime (52) and TransactTime (60).

use chrono::{DateTime, Utc};

pub const FIX_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H:%M:%S%.3f";

pub fn format_fix_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(FIX_TIMESTAMP_FORMAT).to_string()
}

/// Current time as a FIX timestamp.
pub fn fix_timestamp_now() -> String {
    format_fix_timestamp(Utc::now())
}
