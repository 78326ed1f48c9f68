use crate::dtos::{ScheduleDTO, SpecificDateDTO, WeekdaySettingDTO};
use pollemic_domain::{ScheduleKind, ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub schedule_id: Option<ID>,
    #[serde(default)]
    pub schedule: Option<ScheduleDTO>,
}

pub mod create_schedule {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
    pub struct RequestBody {
        pub questionnaire_id: ID,
        pub title: String,
        pub schedule_type: ScheduleKind,
        pub group_ids: Vec<ID>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub release_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deadline_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub start_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub end_date: Option<String>,
        /// Bit `2^(day - 1)` per selected weekday, Monday = 1
        #[serde(skip_serializing_if = "Option::is_none")]
        pub weekdays: Option<u8>,
        /// Keyed by weekday number, Monday = 1
        #[serde(skip_serializing_if = "Option::is_none")]
        pub weekday_settings: Option<BTreeMap<u32, WeekdaySettingDTO>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub specific_dates: Option<Vec<SpecificDateDTO>>,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_schedule {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub schedule_id: ID,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod delete_schedule {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub schedule_id: ID,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_schedules {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct QueryParams {
        pub active_only: bool,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub count: Option<usize>,
        #[serde(default)]
        pub schedules: Vec<ScheduleDTO>,
    }
}

pub mod process_schedules {
    use super::*;

    pub type APIResponse = ScheduleResponse;
}
