use pollemic_domain::{normalize_questions, AssignmentStatus, ScheduledSurvey, Survey, ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dtos::GroupDTO;

const UNTITLED_SURVEY: &str = "Untitled survey";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SurveyDTO {
    pub id: ID,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Either an array or an object keyed by question number
    #[serde(default)]
    pub questions: Value,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<ID>,
}

impl SurveyDTO {
    pub fn into_survey(self) -> Survey {
        Survey {
            questions: normalize_questions(&self.questions),
            title: if self.title.trim().is_empty() {
                format!("{} #{}", UNTITLED_SURVEY, self.id)
            } else {
                self.title
            },
            id: self.id,
            description: self.description,
            is_anonymous: self.is_anonymous,
            created_at: self.created_at,
            created_by: self.created_by,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssignmentQuestionnaireDTO {
    pub title: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssignmentDTO {
    pub id: ID,
    pub questionnaire: AssignmentQuestionnaireDTO,
    pub group: GroupDTO,
    pub due_date: String,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl AssignmentDTO {
    pub fn into_scheduled_survey(self) -> ScheduledSurvey {
        ScheduledSurvey {
            id: self.id,
            name: self.questionnaire.title,
            date: ScheduledSurvey::display_date(&self.due_date),
            recurrence: self
                .recurrence
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "Once".into()),
            target: self.group.title,
            status: AssignmentStatus::from_active(self.is_active),
        }
    }
}
