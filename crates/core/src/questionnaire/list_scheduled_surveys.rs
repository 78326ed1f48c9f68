use crate::shared::usecase::UseCase;
use pollemic_domain::ScheduledSurvey;
use pollemic_infra::PollemicContext;
use std::convert::Infallible;
use tracing::error;

/// Lists assignments as display rows. A failing backend yields an empty list.
#[derive(Debug)]
pub struct ListScheduledSurveysUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for ListScheduledSurveysUseCase {
    type Response = Vec<ScheduledSurvey>;

    type Error = Infallible;

    const NAME: &'static str = "ListScheduledSurveys";

    async fn execute(&mut self, ctx: &PollemicContext) -> Result<Self::Response, Self::Error> {
        match ctx.sdk.questionnaire.assignments().await {
            Ok(res) => Ok(res
                .assignments
                .into_iter()
                .map(|assignment| assignment.into_scheduled_survey())
                .collect()),
            Err(e) => {
                error!("Failed to fetch scheduled surveys: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
