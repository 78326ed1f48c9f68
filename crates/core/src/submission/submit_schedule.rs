use super::build::{build_submission, SubmissionRequest};
use crate::{
    error::PollemicError,
    shared::usecase::{execute, UseCase},
    store::ScheduleDraftStore,
};
use futures::future::join_all;
use pollemic_api_structs::{assign_questionnaire, create_schedule};
use pollemic_domain::{validate, ScheduleDraft, ID};
use pollemic_infra::PollemicContext;
use pollemic_sdk::APIError;
use tracing::{info, warn};

const ASSIGN_FALLBACK: &str = "Failed to assign questionnaire";
const CREATE_SCHEDULE_FALLBACK: &str = "Failed to create schedule";

/// What the backend confirmed for a submitted draft
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionReceipt {
    Assigned {
        questionnaire_id: ID,
        group_ids: Vec<ID>,
        messages: Vec<String>,
    },
    Scheduled {
        schedule_id: Option<ID>,
        message: Option<String>,
    },
}

#[derive(Debug)]
pub struct SubmitScheduleUseCase {
    pub draft: ScheduleDraft,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDraft(String),
    Assign(APIError),
    /// At least one group was assigned before another assignment failed
    PartialAssign {
        assigned: Vec<ID>,
        failed: Vec<ID>,
        error: APIError,
    },
    CreateSchedule(APIError),
}

impl From<UseCaseError> for PollemicError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDraft(summary) => Self::InvalidDraft(summary),
            UseCaseError::Assign(e) => Self::from_api(e, ASSIGN_FALLBACK),
            UseCaseError::PartialAssign {
                assigned,
                failed,
                error,
            } => {
                let reason = Self::from_api(error, ASSIGN_FALLBACK);
                let message = format!(
                    "Assigned {} of {} group(s), the rest failed: {}",
                    assigned.len(),
                    assigned.len() + failed.len(),
                    reason
                );
                Self::PartiallyAssigned {
                    assigned,
                    failed,
                    message,
                }
            }
            UseCaseError::CreateSchedule(e) => Self::from_api(e, CREATE_SCHEDULE_FALLBACK),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubmitScheduleUseCase {
    type Response = SubmissionReceipt;

    type Error = UseCaseError;

    const NAME: &'static str = "SubmitSchedule";

    async fn execute(&mut self, ctx: &PollemicContext) -> Result<Self::Response, Self::Error> {
        let result = validate(&self.draft, ctx.now());
        if let Some(summary) = result.summary() {
            return Err(UseCaseError::InvalidDraft(summary));
        }

        let request = build_submission(&self.draft)
            .map_err(|e| UseCaseError::InvalidDraft(e.to_string()))?;

        match request {
            SubmissionRequest::Assign {
                questionnaire_id,
                assignments,
            } => assign_to_groups(ctx, questionnaire_id, assignments).await,
            SubmissionRequest::CreateSchedule(body) => create_schedule(ctx, &body).await,
        }
    }
}

async fn assign_to_groups(
    ctx: &PollemicContext,
    questionnaire_id: ID,
    assignments: Vec<assign_questionnaire::RequestBody>,
) -> Result<SubmissionReceipt, UseCaseError> {
    let calls = assignments
        .iter()
        .map(|body| ctx.sdk.questionnaire.assign_raw(&questionnaire_id, body));
    let responses = join_all(calls).await;

    let mut messages = Vec::with_capacity(responses.len());
    let mut group_ids = Vec::with_capacity(responses.len());
    let mut failed = Vec::new();
    let mut first_error = None;
    for (assignment, res) in assignments.into_iter().zip(responses) {
        match res {
            Ok(res) => {
                if let Some(message) = res.message {
                    messages.push(message);
                }
                group_ids.push(assignment.group_id);
            }
            Err(e) => {
                warn!(
                    "Assigning questionnaire {} to group {} failed: {:?}",
                    questionnaire_id, assignment.group_id, e
                );
                failed.push(assignment.group_id);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(error) = first_error {
        if group_ids.is_empty() {
            return Err(UseCaseError::Assign(error));
        }
        return Err(UseCaseError::PartialAssign {
            assigned: group_ids,
            failed,
            error,
        });
    }
    info!(
        "Assigned questionnaire {} to {} group(s)",
        questionnaire_id,
        group_ids.len()
    );

    Ok(SubmissionReceipt::Assigned {
        questionnaire_id,
        group_ids,
        messages,
    })
}

async fn create_schedule(
    ctx: &PollemicContext,
    body: &create_schedule::RequestBody,
) -> Result<SubmissionReceipt, UseCaseError> {
    let res = ctx
        .sdk
        .schedule
        .create(body)
        .await
        .map_err(UseCaseError::CreateSchedule)?;

    let schedule_id = res
        .schedule_id
        .or_else(|| res.schedule.as_ref().map(|schedule| schedule.id.clone()));
    info!("Created {:?} schedule {:?}", body.schedule_type, schedule_id);

    Ok(SubmissionReceipt::Scheduled {
        schedule_id,
        message: res.message,
    })
}

/// Submits the draft held by `store` and discards it once the backend accepted it.
///
/// When only some groups could be assigned, those groups are dropped from the
/// draft so that resubmitting targets the remaining ones.
pub async fn submit_draft(
    store: &ScheduleDraftStore,
    ctx: &PollemicContext,
) -> Result<SubmissionReceipt, PollemicError> {
    let draft = store.take_for_submission()?;
    match execute(SubmitScheduleUseCase { draft }, ctx).await {
        Ok(receipt) => {
            store.reset();
            Ok(receipt)
        }
        Err(e) => {
            let e = PollemicError::from(e);
            if let PollemicError::PartiallyAssigned { assigned, .. } = &e {
                store.remove_groups(assigned);
            }
            Err(e)
        }
    }
}
