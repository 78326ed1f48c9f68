use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current wall clock time in the given timezone
    fn now_in(&self, tz: &Tz) -> NaiveDateTime {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.get_timestamp_millis())
            .unwrap_or_else(Utc::now);
        utc.with_timezone(tz).naive_local()
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System pinned to a single instant
pub struct FixedSys {
    timestamp_millis: i64,
}

impl FixedSys {
    pub fn new(timestamp_millis: i64) -> Self {
        Self { timestamp_millis }
    }

    pub fn at_utc(datetime: NaiveDateTime) -> Self {
        Self::new(Utc.from_utc_datetime(&datetime).timestamp_millis())
    }
}

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}
