use crate::shared::entity::ID;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Scheduled,
    Sent,
}

impl AssignmentStatus {
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            Self::Scheduled
        } else {
            Self::Sent
        }
    }
}

/// Row of the scheduled surveys overview
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduledSurvey {
    pub id: ID,
    pub name: String,
    pub date: String,
    pub recurrence: String,
    pub target: String,
    pub status: AssignmentStatus,
}

impl ScheduledSurvey {
    /// Date column of the overview. Falls back to the raw value when the
    /// backend sends something that is not an ISO-like timestamp.
    pub fn display_date(due_date: &str) -> String {
        let trimmed = due_date.trim_end_matches('Z');
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| due_date.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_formats_due_dates() {
        assert_eq!(
            ScheduledSurvey::display_date("2025-04-18T09:00:00"),
            "2025-04-18"
        );
        assert_eq!(
            ScheduledSurvey::display_date("2025-04-18T09:00:00.000Z"),
            "2025-04-18"
        );
        assert_eq!(ScheduledSurvey::display_date("soon"), "soon");
    }
}
