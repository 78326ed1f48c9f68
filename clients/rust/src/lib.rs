mod base;
mod group;
mod questionnaire;
mod schedule;
mod session;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use group::GroupClient;
pub use pollemic_api_structs::dtos::*;
pub use pollemic_domain::{Group, ScheduleKind, ScheduledSurvey, Survey, ID};
use questionnaire::QuestionnaireClient;
pub use questionnaire::AssignQuestionnaireInput;
use schedule::ScheduleClient;
pub use schedule::CreateScheduleInput;
pub use session::{CurrentUser, Session, StaticSession};
use std::sync::Arc;

// Domain
pub use pollemic_api_structs::dtos::ScheduleDTO as FlexibleSchedule;

/// Pollemic backend SDK
///
/// Typed access to the questionnaire, group and schedule endpoints used by
/// the scheduling dashboard.
#[derive(Clone)]
pub struct PollemicSDK {
    pub questionnaire: QuestionnaireClient,
    pub group: GroupClient,
    pub schedule: ScheduleClient,
    session: Arc<dyn Session>,
}

impl PollemicSDK {
    pub fn new<T: Into<String>>(address: T, session: Arc<dyn Session>) -> Self {
        let base = Arc::new(BaseClient::new(address.into(), session));
        let session = base.session().clone();
        let questionnaire = QuestionnaireClient::new(base.clone());
        let group = GroupClient::new(base.clone());
        let schedule = ScheduleClient::new(base);

        Self {
            questionnaire,
            group,
            schedule,
            session,
        }
    }

    /// SDK with a fixed bearer token and no user details
    pub fn with_token<T: Into<String>>(address: T, token: Option<String>) -> Self {
        Self::new(address, Arc::new(StaticSession::new(token, None)))
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }
}
