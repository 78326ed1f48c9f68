mod error;
mod questionnaire;
mod shared;
mod store;
mod submission;

pub use error::PollemicError;
pub use questionnaire::{
    ListActiveGroupsUseCase, ListScheduledSurveysUseCase, LoadReferenceDataError,
    LoadReferenceDataUseCase, ReferenceData, SurveySource,
};
pub use shared::debounce::Debouncer;
pub use shared::usecase::{execute, UseCase};
pub use store::ScheduleDraftStore;
pub use submission::{
    build_submission, submit_draft, SubmissionReceipt, SubmissionRequest, SubmitScheduleError,
    SubmitScheduleUseCase,
};
