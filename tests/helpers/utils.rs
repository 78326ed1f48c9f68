#![allow(dead_code)]

use chrono::NaiveDate;
use pollemic_domain::{
    DateWindow, OneTimePlan, ReleaseMode, ScheduleDraft, SchedulePlan, SpecificDatesPlan,
    Weekday, WeeklyPlan, ID,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(schedule: SchedulePlan) -> ScheduleDraft {
    ScheduleDraft {
        survey_id: Some(ID::from(7)),
        target_group_ids: [ID::from(1), ID::from(2)].into_iter().collect(),
        title: None,
        schedule,
    }
}

/// Released right away, due 2025-03-20 09:00
pub fn immediate_one_time_draft() -> ScheduleDraft {
    draft(SchedulePlan::OneTime(OneTimePlan {
        deadline_date: Some(date(2025, 3, 20)),
        ..Default::default()
    }))
}

pub fn scheduled_one_time_draft() -> ScheduleDraft {
    draft(SchedulePlan::OneTime(OneTimePlan {
        deadline_date: Some(date(2025, 3, 20)),
        release_mode: ReleaseMode::Scheduled,
        release_date: Some(date(2025, 3, 15)),
        ..Default::default()
    }))
}

pub fn specific_dates_draft() -> ScheduleDraft {
    let mut window = DateWindow::starting(date(2025, 4, 29));
    window.duration_days = 3;
    draft(SchedulePlan::SpecificDates(SpecificDatesPlan {
        windows: vec![window],
    }))
}

/// Mondays, Wednesdays and Fridays through June 2025
pub fn weekly_draft() -> ScheduleDraft {
    draft(SchedulePlan::Weekly(WeeklyPlan {
        weekdays: [Weekday::Mon, Weekday::Wed, Weekday::Fri]
            .into_iter()
            .collect(),
        period_start: Some(date(2025, 6, 2)),
        period_end: Some(date(2025, 6, 30)),
        ..Default::default()
    }))
}
