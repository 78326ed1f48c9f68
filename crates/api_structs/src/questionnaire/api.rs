use crate::dtos::{AssignmentDTO, SurveyDTO};
use pollemic_domain::{Survey, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct SurveyListResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub questionnaires: Vec<SurveyDTO>,
}

impl SurveyListResponse {
    pub fn into_surveys(self) -> Vec<Survey> {
        self.questionnaires
            .into_iter()
            .map(SurveyDTO::into_survey)
            .collect()
    }
}

pub mod get_questionnaires {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct QueryParams {
        pub limit: Option<usize>,
    }

    pub type APIResponse = SurveyListResponse;
}

pub mod get_latest_questionnaires {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct QueryParams {
        pub limit: usize,
    }

    pub type APIResponse = SurveyListResponse;
}

pub mod get_questionnaire {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub questionnaire_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        #[serde(default)]
        pub status: Option<String>,
        pub questionnaire: SurveyDTO,
    }
}

pub mod assign_questionnaire {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub questionnaire_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
    pub struct RequestBody {
        pub group_id: ID,
        /// Timezone-naive ISO timestamp
        pub due_date: String,
    }

    #[derive(Debug, Deserialize, Serialize, Clone)]
    pub struct APIResponse {
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub questionnaire: Option<SurveyDTO>,
    }
}

pub mod get_assignments {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        #[serde(default)]
        pub assignments: Vec<AssignmentDTO>,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn surveys_without_a_title_are_kept() {
        let res: SurveyListResponse = serde_json::from_str(
            r#"{"questionnaires": [{"id": 3}, {"id": "4", "title": "Exit poll", "questions": []}]}"#,
        )
        .unwrap();
        let surveys = res.into_surveys();
        assert_eq!(surveys.len(), 2);
        assert_eq!(surveys[0].id, ID::from(3));
        assert_eq!(surveys[0].title, "Untitled survey #3");
        assert_eq!(surveys[1].title, "Exit poll");
    }
}
