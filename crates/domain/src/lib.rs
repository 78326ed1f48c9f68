mod assignment;
mod date;
mod group;
mod schedule;
mod shared;
mod survey;
mod time;
mod validation;
mod weekday;

pub use assignment::{AssignmentStatus, ScheduledSurvey};
pub use date::{add_days, format_naive_iso, parse_date, start_of_day};
pub use group::Group;
pub use schedule::{
    DateWindow, DaySettings, OneTimePlan, ReleaseMode, ScheduleDraft, ScheduleKind, SchedulePlan,
    SpecificDatesPlan, WeekdaySettings, WeeklyPlan,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use survey::{
    map_question_type_to_api, map_question_type_to_ui, normalize_questions, Question, Survey,
};
pub use time::{is_date_time_in_future, is_time_range_valid, TimeOfDay};
pub use validation::{is_schedule_empty, validate, FieldKey, ValidationResult};
pub use weekday::{day_number, weekday_from_number, weekday_name, InvalidWeekdayError, WeekdaySet};

pub use chrono::{NaiveDate, NaiveDateTime, Weekday};
pub use chrono_tz::Tz;
