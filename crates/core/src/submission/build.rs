use crate::error::PollemicError;
use pollemic_api_structs::{
    assign_questionnaire, create_schedule,
    dtos::{SpecificDateDTO, WeekdaySettingDTO},
};
use pollemic_domain::{
    day_number, format_naive_iso, start_of_day, NaiveDate, OneTimePlan, ReleaseMode,
    ScheduleDraft, SchedulePlan, TimeOfDay, WeeklyPlan, ID,
};

/// Backend calls a draft translates into
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionRequest {
    /// Immediate one-time release: one assignment per target group
    Assign {
        questionnaire_id: ID,
        assignments: Vec<assign_questionnaire::RequestBody>,
    },
    CreateSchedule(create_schedule::RequestBody),
}

/// Translates a draft into wire payloads. Dates are sent timezone-naive.
///
/// Expects a draft that already passed validation; structurally missing
/// fields are still reported instead of guessed.
pub fn build_submission(draft: &ScheduleDraft) -> Result<SubmissionRequest, PollemicError> {
    let questionnaire_id = draft
        .survey_id
        .clone()
        .ok_or_else(|| PollemicError::InvalidDraft("Please select a survey".into()))?;
    let group_ids: Vec<ID> = draft.target_group_ids.iter().cloned().collect();

    let mut body = create_schedule::RequestBody {
        questionnaire_id: questionnaire_id.clone(),
        title: draft.display_title(),
        schedule_type: draft.kind(),
        group_ids,
        release_date: None,
        deadline_date: None,
        start_date: None,
        end_date: None,
        weekdays: None,
        weekday_settings: None,
        specific_dates: None,
    };

    match &draft.schedule {
        SchedulePlan::OneTime(plan) => {
            let deadline = timestamp(plan.deadline_date, plan.deadline_time, "deadline")?;
            if plan.release_mode == ReleaseMode::Immediate {
                let assignments = body
                    .group_ids
                    .into_iter()
                    .map(|group_id| assign_questionnaire::RequestBody {
                        group_id,
                        due_date: deadline.clone(),
                    })
                    .collect();
                return Ok(SubmissionRequest::Assign {
                    questionnaire_id,
                    assignments,
                });
            }
            body.release_date = Some(release_timestamp(plan)?);
            body.deadline_date = Some(deadline);
        }
        SchedulePlan::SpecificDates(plan) => {
            let windows = plan
                .windows
                .iter()
                .map(SpecificDateDTO::new)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    PollemicError::InvalidDraft(
                        "Duration runs past the last supported date".into(),
                    )
                })?;
            body.specific_dates = Some(windows);
        }
        SchedulePlan::Weekly(plan) => fill_weekly(&mut body, plan)?,
    }

    Ok(SubmissionRequest::CreateSchedule(body))
}

fn fill_weekly(
    body: &mut create_schedule::RequestBody,
    plan: &WeeklyPlan,
) -> Result<(), PollemicError> {
    let start = plan
        .period_start
        .ok_or_else(|| PollemicError::InvalidDraft("Please select a start date".into()))?;
    let end = plan
        .period_end
        .ok_or_else(|| PollemicError::InvalidDraft("Please select an end date".into()))?;

    body.start_date = Some(format_naive_iso(&start_of_day(start)));
    body.end_date = Some(format_naive_iso(&start_of_day(end)));
    body.weekdays = Some(plan.weekdays.bits());
    body.weekday_settings = Some(
        plan.weekdays
            .iter()
            .map(|day| (day_number(day), WeekdaySettingDTO::new(plan.settings.get(day))))
            .collect(),
    );
    Ok(())
}

fn release_timestamp(plan: &OneTimePlan) -> Result<String, PollemicError> {
    timestamp(plan.release_date, plan.release_time, "release")
}

fn timestamp(
    date: Option<NaiveDate>,
    time: TimeOfDay,
    what: &str,
) -> Result<String, PollemicError> {
    let date = date
        .ok_or_else(|| PollemicError::InvalidDraft(format!("Please select a {} date", what)))?;
    Ok(format_naive_iso(&time.on(date)))
}
