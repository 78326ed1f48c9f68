mod build;
mod submit_schedule;

pub use build::{build_submission, SubmissionRequest};
pub use submit_schedule::{
    submit_draft, SubmissionReceipt, SubmitScheduleUseCase, UseCaseError as SubmitScheduleError,
};
