mod group;
mod questionnaire;
mod schedule;
mod shared;

pub mod dtos {
    pub use crate::group::dtos::*;
    pub use crate::questionnaire::dtos::*;
    pub use crate::schedule::dtos::*;
}

pub use crate::group::api::*;
pub use crate::questionnaire::api::*;
pub use crate::schedule::api::*;
pub use crate::shared::api::*;
