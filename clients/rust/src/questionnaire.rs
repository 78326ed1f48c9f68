use crate::base::{APIResponse, BaseClient};
use pollemic_api_structs::*;
use pollemic_domain::{format_naive_iso, NaiveDateTime, ID};
use std::sync::Arc;

#[derive(Clone)]
pub struct QuestionnaireClient {
    base: Arc<BaseClient>,
}

pub struct AssignQuestionnaireInput {
    pub questionnaire_id: ID,
    pub group_id: ID,
    pub due_date: NaiveDateTime,
}

impl QuestionnaireClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, limit: Option<usize>) -> APIResponse<get_questionnaires::APIResponse> {
        let query = get_questionnaires::QueryParams { limit };
        self.base
            .get_with_query("questionnaires".into(), &query)
            .await
    }

    pub async fn latest(&self, limit: usize) -> APIResponse<get_latest_questionnaires::APIResponse> {
        let query = get_latest_questionnaires::QueryParams { limit };
        self.base
            .get_with_query("questionnaires/latest".into(), &query)
            .await
    }

    pub async fn get(&self, questionnaire_id: ID) -> APIResponse<get_questionnaire::APIResponse> {
        self.base
            .get(format!("questionnaires/{}", questionnaire_id))
            .await
    }

    pub async fn assign(
        &self,
        input: AssignQuestionnaireInput,
    ) -> APIResponse<assign_questionnaire::APIResponse> {
        let body = assign_questionnaire::RequestBody {
            group_id: input.group_id,
            due_date: format_naive_iso(&input.due_date),
        };
        self.base
            .post(body, format!("questionnaires/{}/assign", input.questionnaire_id))
            .await
    }

    /// Sends an already built assign body
    pub async fn assign_raw(
        &self,
        questionnaire_id: &ID,
        body: &assign_questionnaire::RequestBody,
    ) -> APIResponse<assign_questionnaire::APIResponse> {
        self.base
            .post(body, format!("questionnaires/{}/assign", questionnaire_id))
            .await
    }

    pub async fn assignments(&self) -> APIResponse<get_assignments::APIResponse> {
        self.base.get("questionnaires/assignments".into()).await
    }
}
