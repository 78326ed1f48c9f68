use crate::{
    date::start_of_day,
    schedule::{OneTimePlan, ReleaseMode, ScheduleDraft, SchedulePlan, SpecificDatesPlan, WeeklyPlan},
    time::{is_date_time_in_future, is_time_range_valid},
    weekday::day_number,
};
use chrono::{NaiveDateTime, Weekday};
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fmt};

const SAME_DAY_ORDER: &str = "For same-day schedules, end time must be after start time";
const WINDOW_IN_PAST: &str = "Start date and time must be in the future";
const WINDOWS_IN_PAST: &str = "One or more dates have start times in the past";
const DURATION_OUT_OF_RANGE: &str = "Duration runs past the last supported date";
const GENERIC_INVALID: &str =
    "Please fix validation errors before submitting. The schedule configuration is invalid.";

/// Symbolic key of a form field or list item an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Survey,
    Groups,
    OneTime,
    SpecificDates,
    /// Inline error of the window at this index
    SpecificDate(usize),
    Weekly,
    /// Inline error of the weekday with this number (Monday = 1)
    Weekday(u32),
    StartDate,
    EndDate,
    EmptySchedule,
}

impl FieldKey {
    pub fn weekday(day: Weekday) -> Self {
        Self::Weekday(day_number(day))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Survey => write!(f, "survey"),
            Self::Groups => write!(f, "groups"),
            Self::OneTime => write!(f, "oneTime"),
            Self::SpecificDates => write!(f, "specificDates"),
            Self::SpecificDate(index) => write!(f, "specificDates.{}", index),
            Self::Weekly => write!(f, "weekly"),
            Self::Weekday(day) => write!(f, "weekly.{}", day),
            Self::StartDate => write!(f, "startDate"),
            Self::EndDate => write!(f, "endDate"),
            Self::EmptySchedule => write!(f, "emptySchedule"),
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub errors: BTreeMap<FieldKey, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    /// Drops the inline error of a single item, used when that item is being edited
    pub fn clear(&mut self, key: FieldKey) {
        self.errors.remove(&key);
    }

    /// Single message explaining why the draft cannot be submitted
    pub fn summary(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }
        let summary = [
            FieldKey::EmptySchedule,
            FieldKey::OneTime,
            FieldKey::SpecificDates,
            FieldKey::Weekly,
            FieldKey::StartDate,
            FieldKey::EndDate,
        ]
        .iter()
        .find_map(|key| self.error(*key))
        .unwrap_or(GENERIC_INVALID);
        Some(summary.to_string())
    }

    fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.entry(key).or_insert_with(|| message.into());
    }

    /// Like `insert`, but a later check overrides an earlier message
    fn replace(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.insert(key, message.into());
    }
}

/// Validates a draft against the wall-clock instant `now`.
///
/// Pure: the same draft and `now` always yield the same result.
pub fn validate(draft: &ScheduleDraft, now: NaiveDateTime) -> ValidationResult {
    let mut result = ValidationResult::default();

    if draft.survey_id.is_none() {
        result.insert(FieldKey::Survey, "Please select a survey");
    }
    if draft.target_group_ids.is_empty() {
        result.insert(FieldKey::Groups, "Please select at least one target group");
    }

    match &draft.schedule {
        SchedulePlan::OneTime(plan) => validate_one_time(plan, now, &mut result),
        SchedulePlan::SpecificDates(plan) => validate_specific_dates(plan, now, &mut result),
        SchedulePlan::Weekly(plan) => validate_weekly(plan, now, &mut result),
    }

    if is_schedule_empty(&draft.schedule) {
        result.insert(FieldKey::EmptySchedule, "Cannot submit an empty schedule");
    }

    result
}

fn validate_one_time(plan: &OneTimePlan, now: NaiveDateTime, result: &mut ValidationResult) {
    match plan.deadline_date {
        None => result.insert(FieldKey::OneTime, "Please select a deadline date"),
        Some(date) if !is_date_time_in_future(date, plan.deadline_time, now) => {
            result.insert(FieldKey::OneTime, "Deadline must be in the future")
        }
        _ => (),
    }

    if plan.release_mode != ReleaseMode::Scheduled {
        return;
    }
    // Release problems take precedence over deadline problems
    match plan.release_date {
        None => result.replace(FieldKey::OneTime, "Please select a release date"),
        Some(date) if !is_date_time_in_future(date, plan.release_time, now) => result.replace(
            FieldKey::OneTime,
            "Release date and time must be in the future",
        ),
        Some(date) => {
            if let Some(deadline_date) = plan.deadline_date {
                let release = plan.release_time.on(date);
                let deadline = plan.deadline_time.on(deadline_date);
                if release >= deadline {
                    result.replace(
                        FieldKey::OneTime,
                        "Release date and time must be before deadline",
                    );
                }
            }
        }
    }
}

fn validate_specific_dates(
    plan: &SpecificDatesPlan,
    now: NaiveDateTime,
    result: &mut ValidationResult,
) {
    if plan.windows.is_empty() {
        result.insert(FieldKey::SpecificDates, "Please add at least one specific date");
        return;
    }

    for (index, window) in plan.windows.iter().enumerate() {
        // (inline message, collection message)
        let error = if !is_date_time_in_future(window.start_date, window.start_time, now) {
            Some((WINDOW_IN_PAST, WINDOWS_IN_PAST))
        } else if window.end_date().is_none() {
            Some((DURATION_OUT_OF_RANGE, DURATION_OUT_OF_RANGE))
        } else if window.is_same_day()
            && !is_time_range_valid(&window.start_time, &window.deadline_time)
        {
            Some((SAME_DAY_ORDER, SAME_DAY_ORDER))
        } else {
            None
        };

        if let Some((inline, collection)) = error {
            result.insert(FieldKey::SpecificDate(index), inline);
            // first failing window wins the collection level message
            result.insert(FieldKey::SpecificDates, collection);
        }
    }
}

fn validate_weekly(plan: &WeeklyPlan, now: NaiveDateTime, result: &mut ValidationResult) {
    if plan.weekdays.is_empty() {
        result.insert(FieldKey::Weekly, "Please select at least one day of the week");
    }

    for day in plan.weekdays.iter() {
        let settings = plan.settings.get(day);
        if settings.duration_days == 0
            && !is_time_range_valid(&settings.start_time, &settings.end_time)
        {
            result.insert(FieldKey::weekday(day), SAME_DAY_ORDER);
            result.insert(FieldKey::Weekly, SAME_DAY_ORDER);
        }
    }

    match plan.period_start {
        None => result.insert(FieldKey::StartDate, "Please select a start date"),
        Some(start) if start_of_day(start) <= now => {
            result.insert(FieldKey::StartDate, "Start date must be in the future")
        }
        _ => (),
    }

    match (plan.period_start, plan.period_end) {
        (_, None) => result.insert(FieldKey::EndDate, "Please select an end date"),
        (Some(start), Some(end)) if end < start => result.insert(
            FieldKey::EndDate,
            "End date must be on or after the start date",
        ),
        _ => (),
    }
}

/// Whether the active schedule shape configures no occurrence at all
pub fn is_schedule_empty(schedule: &SchedulePlan) -> bool {
    match schedule {
        SchedulePlan::OneTime(plan) => plan.deadline_date.is_none(),
        SchedulePlan::SpecificDates(plan) => plan.windows.is_empty(),
        SchedulePlan::Weekly(plan) => {
            plan.weekdays.is_empty() || plan.period_start.is_none() || plan.period_end.is_none()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        schedule::{DateWindow, ScheduleKind},
        shared::entity::ID,
        time::TimeOfDay,
    };
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 3, 13)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn tomorrow() -> NaiveDate {
        now().date() + Duration::days(1)
    }

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn draft(schedule: SchedulePlan) -> ScheduleDraft {
        let mut draft = ScheduleDraft::new();
        draft.survey_id = Some(ID::from(1));
        draft.target_group_ids.insert(ID::from(10));
        draft.schedule = schedule;
        draft
    }

    fn valid_one_time() -> OneTimePlan {
        OneTimePlan {
            deadline_date: Some(tomorrow()),
            ..Default::default()
        }
    }

    #[test]
    fn it_accepts_a_complete_one_time_draft() {
        let result = validate(&draft(SchedulePlan::OneTime(valid_one_time())), now());
        assert!(result.is_valid(), "{:?}", result);
        assert_eq!(result.summary(), None);
    }

    #[test]
    fn it_requires_survey_and_groups() {
        let mut d = draft(SchedulePlan::OneTime(valid_one_time()));
        d.survey_id = None;
        d.target_group_ids.clear();
        let result = validate(&d, now());
        assert_eq!(result.error(FieldKey::Survey), Some("Please select a survey"));
        assert_eq!(
            result.error(FieldKey::Groups),
            Some("Please select at least one target group")
        );
        assert_eq!(
            result.summary().unwrap(),
            "Please fix validation errors before submitting. The schedule configuration is invalid."
        );
    }

    #[test]
    fn one_time_deadline_must_be_in_the_future() {
        let plan = OneTimePlan {
            deadline_date: Some(now().date()),
            deadline_time: t("10:30"),
            ..Default::default()
        };
        let result = validate(&draft(SchedulePlan::OneTime(plan)), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Deadline must be in the future")
        );
    }

    #[test]
    fn release_after_deadline_is_rejected() {
        let deadline = now() + Duration::hours(1);
        let release = now() + Duration::hours(2);
        let plan = OneTimePlan {
            deadline_date: Some(deadline.date()),
            deadline_time: t(&deadline.format("%H:%M").to_string()),
            release_mode: ReleaseMode::Scheduled,
            release_date: Some(release.date()),
            release_time: t(&release.format("%H:%M").to_string()),
        };
        let result = validate(&draft(SchedulePlan::OneTime(plan)), now());
        assert!(!result.is_valid());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Release date and time must be before deadline")
        );
    }

    #[test]
    fn release_equal_to_deadline_is_rejected() {
        let plan = OneTimePlan {
            deadline_date: Some(tomorrow()),
            deadline_time: t("12:00"),
            release_mode: ReleaseMode::Scheduled,
            release_date: Some(tomorrow()),
            release_time: t("12:00"),
        };
        let result = validate(&draft(SchedulePlan::OneTime(plan)), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Release date and time must be before deadline")
        );
    }

    #[test]
    fn scheduled_release_needs_a_future_date() {
        let mut plan = OneTimePlan {
            release_mode: ReleaseMode::Scheduled,
            ..valid_one_time()
        };
        let result = validate(&draft(SchedulePlan::OneTime(plan.clone())), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Please select a release date")
        );

        plan.release_date = Some(now().date());
        plan.release_time = t("08:00");
        let result = validate(&draft(SchedulePlan::OneTime(plan.clone())), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Release date and time must be in the future")
        );

        plan.release_time = t("11:00");
        assert!(validate(&draft(SchedulePlan::OneTime(plan)), now()).is_valid());
    }

    #[test]
    fn release_errors_replace_deadline_errors() {
        let mut plan = OneTimePlan {
            deadline_date: Some(now().date()),
            deadline_time: t("08:00"),
            release_mode: ReleaseMode::Scheduled,
            release_date: Some(now().date()),
            release_time: t("07:00"),
        };
        let result = validate(&draft(SchedulePlan::OneTime(plan.clone())), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Release date and time must be in the future")
        );

        // Without a release problem the deadline message stays
        plan.release_mode = ReleaseMode::Immediate;
        let result = validate(&draft(SchedulePlan::OneTime(plan.clone())), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Deadline must be in the future")
        );

        plan.deadline_date = None;
        plan.release_mode = ReleaseMode::Scheduled;
        plan.release_date = None;
        let result = validate(&draft(SchedulePlan::OneTime(plan)), now());
        assert_eq!(
            result.error(FieldKey::OneTime),
            Some("Please select a release date")
        );
        assert_eq!(
            result.summary().unwrap(),
            "Cannot submit an empty schedule"
        );
    }

    #[test]
    fn same_day_window_needs_ordered_times() {
        let mut window = DateWindow::starting(tomorrow());
        window.start_time = t("09:00");
        window.deadline_time = t("08:00");
        let mut plan = SpecificDatesPlan {
            windows: vec![window],
        };
        let result = validate(&draft(SchedulePlan::SpecificDates(plan.clone())), now());
        assert_eq!(result.error(FieldKey::SpecificDates), Some(SAME_DAY_ORDER));
        assert_eq!(result.error(FieldKey::SpecificDate(0)), Some(SAME_DAY_ORDER));

        plan.windows[0].deadline_time = t("10:00");
        let result = validate(&draft(SchedulePlan::SpecificDates(plan)), now());
        assert!(result.is_valid(), "{:?}", result);
    }

    #[test]
    fn multi_day_windows_skip_the_time_order_check() {
        let mut window = DateWindow::starting(tomorrow());
        window.deadline_time = t("08:00");
        window.duration_days = 2;
        let plan = SpecificDatesPlan {
            windows: vec![window],
        };
        assert!(validate(&draft(SchedulePlan::SpecificDates(plan)), now()).is_valid());
    }

    #[test]
    fn first_failing_window_wins_the_collection_message() {
        let ok = DateWindow::starting(tomorrow());
        let mut past = DateWindow::starting(now().date() - Duration::days(1));
        past.deadline_time = t("08:00");
        let mut unordered = DateWindow::starting(tomorrow());
        unordered.deadline_time = t("08:00");
        let plan = SpecificDatesPlan {
            windows: vec![ok, unordered, past],
        };
        let result = validate(&draft(SchedulePlan::SpecificDates(plan)), now());
        assert_eq!(result.error(FieldKey::SpecificDates), Some(SAME_DAY_ORDER));
        assert_eq!(result.error(FieldKey::SpecificDate(0)), None);
        assert_eq!(result.error(FieldKey::SpecificDate(1)), Some(SAME_DAY_ORDER));
        assert_eq!(
            result.error(FieldKey::SpecificDate(2)),
            Some("Start date and time must be in the future")
        );
    }

    #[test]
    fn past_windows_get_a_collection_level_summary() {
        let past = DateWindow::starting(now().date() - Duration::days(1));
        let plan = SpecificDatesPlan {
            windows: vec![DateWindow::starting(tomorrow()), past],
        };
        let result = validate(&draft(SchedulePlan::SpecificDates(plan)), now());
        assert_eq!(
            result.error(FieldKey::SpecificDate(1)),
            Some("Start date and time must be in the future")
        );
        assert_eq!(
            result.error(FieldKey::SpecificDates),
            Some("One or more dates have start times in the past")
        );
        assert_eq!(
            result.summary().unwrap(),
            "One or more dates have start times in the past"
        );
    }

    #[test]
    fn windows_running_past_the_calendar_are_rejected() {
        let mut window = DateWindow::starting(tomorrow());
        window.duration_days = u32::MAX;
        let plan = SpecificDatesPlan {
            windows: vec![window],
        };
        let result = validate(&draft(SchedulePlan::SpecificDates(plan)), now());
        assert!(!result.is_valid());
        assert_eq!(
            result.error(FieldKey::SpecificDate(0)),
            Some("Duration runs past the last supported date")
        );
        assert_eq!(
            result.error(FieldKey::SpecificDates),
            Some("Duration runs past the last supported date")
        );
    }

    #[test]
    fn empty_windows_are_an_empty_schedule() {
        let result = validate(
            &draft(SchedulePlan::empty(ScheduleKind::SpecificDates)),
            now(),
        );
        assert_eq!(
            result.error(FieldKey::SpecificDates),
            Some("Please add at least one specific date")
        );
        assert_eq!(
            result.error(FieldKey::EmptySchedule),
            Some("Cannot submit an empty schedule")
        );
    }

    fn valid_weekly() -> WeeklyPlan {
        let mut plan = WeeklyPlan::default();
        plan.weekdays.insert(Weekday::Tue);
        plan.weekdays.insert(Weekday::Thu);
        plan.period_start = Some(tomorrow());
        plan.period_end = Some(tomorrow() + Duration::days(30));
        plan
    }

    #[test]
    fn it_accepts_a_complete_weekly_draft() {
        let result = validate(&draft(SchedulePlan::Weekly(valid_weekly())), now());
        assert!(result.is_valid(), "{:?}", result);
    }

    #[test]
    fn weekly_needs_at_least_one_day() {
        let mut plan = valid_weekly();
        plan.weekdays = Default::default();
        let result = validate(&draft(SchedulePlan::Weekly(plan)), now());
        assert_eq!(
            result.error(FieldKey::Weekly),
            Some("Please select at least one day of the week")
        );
        assert!(result.error(FieldKey::EmptySchedule).is_some());
    }

    #[test]
    fn weekly_reports_each_misordered_day() {
        let mut plan = valid_weekly();
        plan.settings.get_mut(Weekday::Thu).end_time = t("08:00");
        plan.settings.get_mut(Weekday::Tue).end_time = t("09:00");
        // unselected days are not checked
        plan.settings.get_mut(Weekday::Sun).end_time = t("01:00");
        let result = validate(&draft(SchedulePlan::Weekly(plan.clone())), now());
        assert_eq!(result.error(FieldKey::Weekday(2)), Some(SAME_DAY_ORDER));
        assert_eq!(result.error(FieldKey::Weekday(4)), Some(SAME_DAY_ORDER));
        assert_eq!(result.error(FieldKey::Weekday(7)), None);
        assert_eq!(result.error(FieldKey::Weekly), Some(SAME_DAY_ORDER));

        plan.settings.get_mut(Weekday::Thu).duration_days = 1;
        plan.settings.get_mut(Weekday::Tue).duration_days = 1;
        assert!(validate(&draft(SchedulePlan::Weekly(plan)), now()).is_valid());
    }

    #[test]
    fn weekly_period_is_validated() {
        let mut plan = valid_weekly();
        plan.period_start = Some(now().date());
        plan.period_end = Some(now().date() - Duration::days(1));
        let result = validate(&draft(SchedulePlan::Weekly(plan.clone())), now());
        assert_eq!(
            result.error(FieldKey::StartDate),
            Some("Start date must be in the future")
        );
        assert_eq!(
            result.error(FieldKey::EndDate),
            Some("End date must be on or after the start date")
        );

        plan.period_start = Some(tomorrow());
        plan.period_end = Some(tomorrow());
        assert!(validate(&draft(SchedulePlan::Weekly(plan.clone())), now()).is_valid());

        plan.period_end = None;
        let result = validate(&draft(SchedulePlan::Weekly(plan)), now());
        assert_eq!(result.error(FieldKey::EndDate), Some("Please select an end date"));
        assert!(result.error(FieldKey::EmptySchedule).is_some());
    }

    #[test]
    fn validation_is_idempotent() {
        let mut plan = valid_weekly();
        plan.settings.get_mut(Weekday::Tue).end_time = t("06:00");
        let d = draft(SchedulePlan::Weekly(plan));
        assert_eq!(validate(&d, now()), validate(&d, now()));
    }

    #[test]
    fn field_keys_render_symbolically() {
        let keys = vec![
            (FieldKey::OneTime, "oneTime"),
            (FieldKey::SpecificDate(3), "specificDates.3"),
            (FieldKey::weekday(Weekday::Sun), "weekly.7"),
            (FieldKey::EmptySchedule, "emptySchedule"),
        ];
        for (key, expected) in keys {
            assert_eq!(key.to_string(), expected);
        }
        let mut result = ValidationResult::default();
        result.insert(FieldKey::StartDate, "x");
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"errors":{"startDate":"x"}}"#
        );
    }
}
