use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Parses `YYYY-M-D` (zero padding optional) into a calendar date.
pub fn parse_date(datestr: &str) -> anyhow::Result<NaiveDate> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let year = dates[0].parse::<i32>();
    let month = dates[1].parse::<u32>();
    let day = dates[2].parse::<u32>();

    match (year, month, day) {
        (Ok(year), Ok(month), Ok(day)) if (1970..=2100).contains(&year) => {
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| anyhow::Error::msg(datestr.to_string()))
        }
        _ => Err(anyhow::Error::msg(datestr.to_string())),
    }
}

/// Timezone-naive ISO-like representation expected by the backend.
/// Note that there is no trailing `Z`.
pub fn format_naive_iso(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Last calendar day of a window that starts on `start` and spans `days` extra days.
/// `None` when that day is past the last representable date.
pub fn add_days(start: NaiveDate, days: u32) -> Option<NaiveDate> {
    start.checked_add_signed(Duration::days(i64::from(days)))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
}

pub(crate) mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let datestr = String::deserialize(deserializer)?;
        super::parse_date(&datestr)
            .map_err(|_| serde::de::Error::custom(format!("Malformed date: {}", datestr)))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(datestr) => super::super::parse_date(&datestr).map(Some).map_err(|_| {
                    serde::de::Error::custom(format!("Malformed date: {}", datestr))
                }),
                None => Ok(None),
            }
        }
    }
}
