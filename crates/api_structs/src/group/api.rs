use crate::dtos::GroupDTO;
use pollemic_domain::Group;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct GroupListResponse {
    /// Absent when the backend has nothing to report
    #[serde(default)]
    pub groups: Option<Vec<GroupDTO>>,
}

impl GroupListResponse {
    pub fn into_active_groups(self) -> Vec<Group> {
        self.groups
            .unwrap_or_default()
            .into_iter()
            .map(GroupDTO::into_group)
            .filter(|group| group.is_active)
            .collect()
    }
}

pub mod get_groups {
    use super::*;

    pub type APIResponse = GroupListResponse;
}

pub mod get_active_groups {
    use super::*;

    pub type APIResponse = GroupListResponse;
}
