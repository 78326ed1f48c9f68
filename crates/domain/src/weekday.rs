use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const FULL_MASK: u8 = 0b111_1111;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidWeekdayError {
    #[error("Day number {0} is outside of Monday (1) through Sunday (7)")]
    DayNumber(u32),
    #[error("Bitmask {0:#b} has bits set outside of the seven weekdays")]
    Bitmask(u16),
}

/// Monday = 1 through Sunday = 7
pub fn day_number(day: Weekday) -> u32 {
    day.number_from_monday()
}

pub fn weekday_from_number(number: u32) -> Result<Weekday, InvalidWeekdayError> {
    match number {
        1..=7 => Ok(ALL_DAYS[(number - 1) as usize]),
        _ => Err(InvalidWeekdayError::DayNumber(number)),
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Set of selected weekdays packed as the backend bitmask: bit `2^(day - 1)`
/// for Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn from_bits(bits: u16) -> Result<Self, InvalidWeekdayError> {
        if bits & !u16::from(FULL_MASK) != 0 {
            return Err(InvalidWeekdayError::Bitmask(bits));
        }
        Ok(Self(bits as u8))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    fn flag(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::flag(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::flag(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !Self::flag(day);
    }

    /// Returns whether the day is selected after toggling
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.0 ^= Self::flag(day);
        self.contains(day)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected days in canonical order, Monday first
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.iter().copied().filter(move |day| self.contains(*day))
    }
}

impl std::iter::FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<u16> for WeekdaySet {
    type Error = InvalidWeekdayError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<WeekdaySet> for u16 {
    fn from(set: WeekdaySet) -> Self {
        u16::from(set.0)
    }
}
