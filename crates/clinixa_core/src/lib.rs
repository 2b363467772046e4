//! Clinixa core: pure form validation, session state machine and view-model helpers.
mod analysis;
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use analysis::{AnalysisResult, Likelihood, PossibleDisease};
pub use effect::Effect;
pub use form::{Field, FieldErrors, RawForm};
pub use msg::Msg;
pub use state::{AppState, SessionPhase, SessionState, SubmissionId};
pub use update::update;
pub use validate::{
    validate, validate_field, Gender, SymptomRequest, AGE_INVALID, GENDER_INVALID,
    SYMPTOMS_REQUIRED,
};
pub use view_model::{AppViewModel, ConditionRowView, ResultsView};
