use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, convert::TryFrom, fmt, str::FromStr};

/// Wall-clock time of day as entered in the scheduling form (`HH:MM`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> anyhow::Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(anyhow::Error::msg(format!(
                "{}:{} is not a valid time of day",
                hours, minutes
            )));
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Local wall-clock instant of this time on the given date
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }

    pub(crate) const fn at(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hours.cmp(&other.hours) {
            Ordering::Equal => self.minutes.cmp(&other.minutes),
            ord => ord,
        }
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.trim().split(':').collect::<Vec<_>>();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty() || p.len() > 2) {
            return Err(anyhow::Error::msg(format!("Malformed time: {}", s)));
        }
        let hours = parts[0]
            .parse::<u32>()
            .map_err(|_| anyhow::Error::msg(format!("Malformed time: {}", s)))?;
        let minutes = parts[1]
            .parse::<u32>()
            .map_err(|_| anyhow::Error::msg(format!("Malformed time: {}", s)))?;
        Self::new(hours, minutes)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// True iff `start` strictly precedes `end` within the same day.
pub fn is_time_range_valid(start: &TimeOfDay, end: &TimeOfDay) -> bool {
    start < end
}

/// True iff `time` on `date` lies strictly after `now`.
///
/// `now` must be sampled once by the caller and reused for every field of a
/// validation pass.
pub fn is_date_time_in_future(date: NaiveDate, time: TimeOfDay, now: NaiveDateTime) -> bool {
    time.on(date) > now
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn it_parses_and_formats_times() {
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("23:59"), TimeOfDay::new(23, 59).unwrap());
        for invalid in &["24:00", "12:60", "12", "12:", ":30", "ab:cd", "1:2:3", "123:00"] {
            assert!(invalid.parse::<TimeOfDay>().is_err(), "{}", invalid);
        }
    }

    #[test]
    fn time_range_requires_strict_ordering() {
        assert!(!is_time_range_valid(&t("09:00"), &t("09:00")));
        assert!(is_time_range_valid(&t("09:00"), &t("09:01")));
        assert!(is_time_range_valid(&t("08:59"), &t("09:00")));
        assert!(!is_time_range_valid(&t("10:00"), &t("09:30")));
        assert!(!is_time_range_valid(&t("09:30"), &t("09:10")));
    }

    #[test]
    fn time_range_matches_minute_ordering_for_all_pairs() {
        let samples = [0, 1, 59, 60, 61, 719, 720, 1380, 1439];
        for a in samples.iter() {
            for b in samples.iter() {
                let start = TimeOfDay::new(a / 60, a % 60).unwrap();
                let end = TimeOfDay::new(b / 60, b % 60).unwrap();
                assert_eq!(is_time_range_valid(&start, &end), a < b);
            }
        }
    }

    #[test]
    fn future_check_decays_monotonically() {
        let date = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        let time = t("12:00");
        let mut now = date.and_hms_opt(11, 58, 0).unwrap();
        let mut was_future = true;
        for _ in 0..5 {
            let future = is_date_time_in_future(date, time, now);
            assert!(was_future || !future);
            was_future = future;
            now += chrono::Duration::minutes(1);
        }
        assert!(!was_future);
        assert!(!is_date_time_in_future(date, time, time.on(date)));
    }

    #[test]
    fn it_serializes_as_string() {
        let json = serde_json::to_string(&t("07:30")).unwrap();
        assert_eq!(json, "\"07:30\"");
        let parsed: TimeOfDay = serde_json::from_str("\"7:30\"").unwrap();
        assert_eq!(parsed, t("07:30"));
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
