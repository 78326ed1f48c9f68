use crate::base::{APIResponse, BaseClient};
use pollemic_api_structs::*;
use pollemic_domain::ID;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScheduleClient {
    base: Arc<BaseClient>,
}

pub type CreateScheduleInput = create_schedule::RequestBody;

impl ScheduleClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: &CreateScheduleInput,
    ) -> APIResponse<create_schedule::APIResponse> {
        self.base.post(input, "schedules".into()).await
    }

    pub async fn get(&self, schedule_id: ID) -> APIResponse<get_schedule::APIResponse> {
        self.base.get(format!("schedules/{}", schedule_id)).await
    }

    pub async fn list(&self, active_only: bool) -> APIResponse<get_schedules::APIResponse> {
        let query = get_schedules::QueryParams { active_only };
        self.base.get_with_query("schedules".into(), &query).await
    }

    pub async fn delete(&self, schedule_id: ID) -> APIResponse<delete_schedule::APIResponse> {
        self.base.delete(format!("schedules/{}", schedule_id)).await
    }

    /// Asks the backend to materialize due occurrences of all active schedules
    pub async fn process(&self) -> APIResponse<process_schedules::APIResponse> {
        self.base.post_empty("schedules/process".into()).await
    }
}
