use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Student group a survey can be distributed to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    pub id: ID,
    pub title: String,
    pub is_active: bool,
}

impl Entity<ID> for Group {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
