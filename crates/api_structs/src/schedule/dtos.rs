use crate::dtos::GroupDTO;
use pollemic_domain::{DateWindow, DaySettings, ScheduleKind, ID};
use serde::{Deserialize, Serialize};

/// Flexible schedule as stored by the backend
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleDTO {
    pub id: ID,
    pub questionnaire_id: ID,
    pub title: String,
    pub schedule_type: ScheduleKind,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub groups: Vec<GroupDTO>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub weekdays: Option<u8>,
    #[serde(default)]
    pub specific_dates: Option<Vec<SpecificDateDTO>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpecificDateDTO {
    pub start_date: String,
    pub start_time: String,
    pub duration_days: u32,
    pub deadline_time: String,
    pub end_date: String,
}

impl SpecificDateDTO {
    /// `None` when the window ends past the last representable date
    pub fn new(window: &DateWindow) -> Option<Self> {
        let end_date = window.end_date()?;
        Some(Self {
            start_date: pollemic_domain::format_naive_iso(&pollemic_domain::start_of_day(
                window.start_date,
            )),
            start_time: window.start_time.to_string(),
            duration_days: window.duration_days,
            deadline_time: window.deadline_time.to_string(),
            end_date: pollemic_domain::format_naive_iso(&pollemic_domain::start_of_day(end_date)),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeekdaySettingDTO {
    pub start_time: String,
    pub end_time: String,
    pub duration_days: u32,
}

impl WeekdaySettingDTO {
    pub fn new(settings: &DaySettings) -> Self {
        Self {
            start_time: settings.start_time.to_string(),
            end_time: settings.end_time.to_string(),
            duration_days: settings.duration_days,
        }
    }
}
