use std::time::Instant;

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::configuration::main_configuration::{MIN_SYNCED_EPOCH, TZ_OFFSET_SECS};

pub trait Clock {
    /// Milliseconds on a monotonic counter, only used for differences.
    fn uptime_ms(&self) -> u64;

    /// Wall clock as the system reports it, synchronized or not.
    fn now_utc(&self) -> OffsetDateTime;

    /// Local wall clock, `None` until the time has been synchronized.
    fn now_local(&self) -> Option<OffsetDateTime> {
        to_local(self.now_utc())
    }
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::from_whole_seconds(TZ_OFFSET_SECS).unwrap_or(UtcOffset::UTC)
}

pub fn is_synchronized(utc: OffsetDateTime) -> bool {
    utc.unix_timestamp() >= MIN_SYNCED_EPOCH
}

pub fn to_local(utc: OffsetDateTime) -> Option<OffsetDateTime> {
    is_synchronized(utc).then(|| utc.to_offset(local_offset()))
}

/// Format a timestamp as DD.MM.YYYY - HH:MM:SS, falling back to the default representation.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    dt.format(format_description!(
        "[day].[month].[year] - [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| dt.to_string())
}

/// Clock backed by the system time, set by SNTP on the device.
pub struct SystemClock {
    boot: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn uptime_ms(&self) -> u64 {
        self.boot.elapsed().as_millis() as u64
    }

    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
