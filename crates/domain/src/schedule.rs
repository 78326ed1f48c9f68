use crate::{
    date::{self, serde_date},
    shared::entity::ID,
    time::TimeOfDay,
    weekday::WeekdaySet,
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleKind {
    OneTime,
    SpecificDates,
    Weekly,
}

impl ScheduleKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::SpecificDates => "Specific dates",
            Self::Weekly => "Weekly schedule",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseMode {
    Immediate,
    Scheduled,
}

impl Default for ReleaseMode {
    fn default() -> Self {
        Self::Immediate
    }
}

/// Single deadline, optionally released to students at a later instant
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OneTimePlan {
    #[serde(default, with = "serde_date::option")]
    pub deadline_date: Option<NaiveDate>,
    pub deadline_time: TimeOfDay,
    #[serde(default)]
    pub release_mode: ReleaseMode,
    #[serde(default, with = "serde_date::option")]
    pub release_date: Option<NaiveDate>,
    pub release_time: TimeOfDay,
}

impl Default for OneTimePlan {
    fn default() -> Self {
        Self {
            deadline_date: None,
            deadline_time: TimeOfDay::at(9, 0),
            release_mode: ReleaseMode::Immediate,
            release_date: None,
            release_time: TimeOfDay::at(9, 0),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    pub start_time: TimeOfDay,
    #[serde(default)]
    pub duration_days: u32,
    pub deadline_time: TimeOfDay,
}

impl DateWindow {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            start_time: TimeOfDay::at(9, 0),
            duration_days: 0,
            deadline_time: TimeOfDay::at(17, 0),
        }
    }

    /// A window with zero duration closes on the day it opens
    pub fn is_same_day(&self) -> bool {
        self.duration_days == 0
    }

    /// `None` when the duration runs past the last representable date
    pub fn end_date(&self) -> Option<NaiveDate> {
        date::add_days(self.start_date, self.duration_days)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecificDatesPlan {
    #[serde(default)]
    pub windows: Vec<DateWindow>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySettings {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub duration_days: u32,
}

impl Default for DaySettings {
    fn default() -> Self {
        Self {
            start_time: TimeOfDay::at(9, 0),
            end_time: TimeOfDay::at(18, 0),
            duration_days: 0,
        }
    }
}

/// Per-weekday settings, Monday first
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeekdaySettings([DaySettings; 7]);

impl WeekdaySettings {
    pub fn get(&self, day: Weekday) -> &DaySettings {
        &self.0[day.num_days_from_monday() as usize]
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut DaySettings {
        &mut self.0[day.num_days_from_monday() as usize]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    #[serde(default)]
    pub weekdays: WeekdaySet,
    #[serde(default)]
    pub settings: WeekdaySettings,
    #[serde(default, with = "serde_date::option")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, with = "serde_date::option")]
    pub period_end: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(
    tag = "scheduleKind",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum SchedulePlan {
    OneTime(OneTimePlan),
    SpecificDates(SpecificDatesPlan),
    Weekly(WeeklyPlan),
}

impl SchedulePlan {
    pub fn empty(kind: ScheduleKind) -> Self {
        match kind {
            ScheduleKind::OneTime => Self::OneTime(Default::default()),
            ScheduleKind::SpecificDates => Self::SpecificDates(Default::default()),
            ScheduleKind::Weekly => Self::Weekly(Default::default()),
        }
    }

    pub fn kind(&self) -> ScheduleKind {
        match self {
            Self::OneTime(_) => ScheduleKind::OneTime,
            Self::SpecificDates(_) => ScheduleKind::SpecificDates,
            Self::Weekly(_) => ScheduleKind::Weekly,
        }
    }
}

impl Default for SchedulePlan {
    fn default() -> Self {
        Self::empty(ScheduleKind::OneTime)
    }
}

/// A not yet submitted plan for distributing a survey to student groups
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    #[serde(default)]
    pub survey_id: Option<ID>,
    #[serde(default)]
    pub target_group_ids: BTreeSet<ID>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub schedule: SchedulePlan,
}

impl ScheduleDraft {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn kind(&self) -> ScheduleKind {
        self.schedule.kind()
    }

    /// Title used for recurring schedules on the backend
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => self.kind().display_name().to_string(),
        }
    }
}
