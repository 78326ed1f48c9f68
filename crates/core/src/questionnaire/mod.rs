mod list_scheduled_surveys;
mod load_reference_data;

pub use list_scheduled_surveys::ListScheduledSurveysUseCase;
pub use load_reference_data::{
    ListActiveGroupsUseCase, LoadReferenceDataUseCase, ReferenceData, SurveySource,
    UseCaseError as LoadReferenceDataError,
};
