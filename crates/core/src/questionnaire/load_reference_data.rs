use crate::{error::PollemicError, shared::usecase::UseCase};
use pollemic_domain::{Group, Survey};
use pollemic_infra::PollemicContext;
use pollemic_sdk::{APIError, APIErrorVariant};
use tracing::{info, warn};

/// Surveys and groups a schedule draft can pick from
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub surveys: Vec<Survey>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurveySource {
    All,
    Latest,
}

#[derive(Debug)]
pub struct LoadReferenceDataUseCase {
    pub source: SurveySource,
    /// Falls back to the configured limit when not set
    pub limit: Option<usize>,
}

#[derive(Debug)]
pub enum UseCaseError {
    Surveys(APIError),
    Groups(APIError),
}

impl From<UseCaseError> for PollemicError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Surveys(e) => Self::from_api(e, "Failed to fetch questionnaires"),
            UseCaseError::Groups(e) => Self::from_api(e, "Failed to fetch active groups"),
        }
    }
}

async fn load_active_groups(ctx: &PollemicContext) -> Result<Vec<Group>, APIError> {
    let res = match ctx.sdk.group.active().await {
        Err(e) if e.variant == APIErrorVariant::Network => {
            warn!("Failed to fetch from /groups/active, trying /groups");
            ctx.sdk.group.list().await?
        }
        res => res?,
    };
    if res.groups.is_none() {
        warn!("Groups response did not contain a groups field");
    }
    Ok(res.into_active_groups())
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoadReferenceDataUseCase {
    type Response = ReferenceData;

    type Error = UseCaseError;

    const NAME: &'static str = "LoadReferenceData";

    async fn execute(&mut self, ctx: &PollemicContext) -> Result<Self::Response, Self::Error> {
        let limit = self.limit.unwrap_or(ctx.config.survey_limit);
        let surveys = match self.source {
            SurveySource::All => ctx.sdk.questionnaire.list(Some(limit)).await,
            SurveySource::Latest => ctx.sdk.questionnaire.latest(limit).await,
        }
        .map_err(UseCaseError::Surveys)?
        .into_surveys();

        let groups = load_active_groups(ctx)
            .await
            .map_err(UseCaseError::Groups)?;

        info!(
            "Loaded {} survey(s) and {} active group(s)",
            surveys.len(),
            groups.len()
        );
        Ok(ReferenceData { surveys, groups })
    }
}

/// Active groups only, for callers that do not need surveys
#[derive(Debug)]
pub struct ListActiveGroupsUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for ListActiveGroupsUseCase {
    type Response = Vec<Group>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListActiveGroups";

    async fn execute(&mut self, ctx: &PollemicContext) -> Result<Self::Response, Self::Error> {
        load_active_groups(ctx).await.map_err(UseCaseError::Groups)
    }
}
