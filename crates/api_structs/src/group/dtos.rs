use pollemic_domain::{Group, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GroupDTO {
    pub group_id: ID,
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
}

impl GroupDTO {
    pub fn into_group(self) -> Group {
        Group {
            id: self.group_id,
            title: self.title,
            is_active: self.is_active,
        }
    }
}
