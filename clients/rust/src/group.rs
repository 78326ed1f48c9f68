use crate::base::{APIResponse, BaseClient};
use pollemic_api_structs::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct GroupClient {
    base: Arc<BaseClient>,
}

impl GroupClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self) -> APIResponse<get_groups::APIResponse> {
        self.base.get("groups".into()).await
    }

    pub async fn active(&self) -> APIResponse<get_active_groups::APIResponse> {
        self.base.get("groups/active".into()).await
    }
}
