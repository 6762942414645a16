use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone};

/// `ctime(3)` layout without its trailing newline, e.g. `Wed Jun 30 21:49:08 1993`.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Width of a rendered [`CTIME_FORMAT`] timestamp.
pub const CTIME_WIDTH: usize = 24;

pub struct Timestamp {
    pub modified: SystemTime,
}

impl Timestamp {
    pub fn new(modified: SystemTime) -> Timestamp {
        Timestamp { modified }
    }

    /// Seconds and nanoseconds relative to the epoch, `None` past `i64` seconds.
    fn unix_parts(&self) -> Option<(i64, u32)> {
        match self.modified.duration_since(UNIX_EPOCH) {
            Ok(d) => Some((i64::try_from(d.as_secs()).ok()?, d.subsec_nanos())),
            Err(e) => {
                let d = e.duration();
                let secs = i64::try_from(d.as_secs()).ok()?;
                if d.subsec_nanos() == 0 {
                    Some((-secs, 0))
                } else {
                    Some((-secs - 1, 1_000_000_000 - d.subsec_nanos()))
                }
            }
        }
    }

    fn local(&self) -> Option<DateTime<Local>> {
        let (secs, nanos) = self.unix_parts()?;
        Local.timestamp_opt(secs, nanos).single()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.local() {
            Some(datetime) => write!(f, "{}", datetime.format(CTIME_FORMAT)),
            // out of chrono's calendar range: raw epoch seconds instead
            None => match self.unix_parts() {
                Some((secs, _)) => write!(f, "{:>width$}", secs, width = CTIME_WIDTH),
                None => write!(f, "{:>width$}", "?", width = CTIME_WIDTH),
            },
        }
    }
}
