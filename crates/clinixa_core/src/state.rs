use crate::view_model::{AppViewModel, ResultsView};
use crate::{AnalysisResult, Field, FieldErrors, RawForm};

pub type SubmissionId = u64;

/// Exactly one phase of the analysis session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading {
        submission: SubmissionId,
    },
    Error {
        message: String,
    },
    Result {
        value: AnalysisResult,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Error,
    Result,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Loading { .. } => SessionPhase::Loading,
            SessionState::Error { .. } => SessionPhase::Error,
            SessionState::Result { .. } => SessionPhase::Result,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Error { .. } | SessionState::Result { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Result { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: RawForm,
    field_errors: FieldErrors,
    session: SessionState,
    last_submission: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.session.phase(),
            form: self.form.clone(),
            field_errors: self.field_errors.clone(),
            submit_enabled: !self.session.is_loading(),
            error_message: self.session.error_message().map(ToOwned::to_owned),
            results: self.session.result().map(ResultsView::from_result),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn form(&self) -> &RawForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn edit_field(&mut self, field: Field, value: String) {
        if self.form.get(field) == value {
            return;
        }
        self.form.set(field, value);
        self.field_errors.clear(field);
        self.dirty = true;
    }

    pub(crate) fn replace_form(&mut self, form: RawForm) {
        if self.form == form {
            return;
        }
        self.form = form;
        self.field_errors = FieldErrors::new();
        self.dirty = true;
    }

    pub(crate) fn set_field_errors(&mut self, errors: FieldErrors) {
        self.field_errors = errors;
        self.dirty = true;
    }

    /// Clears field errors and any previous outcome, and enters `Loading`.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.last_submission += 1;
        self.field_errors = FieldErrors::new();
        self.session = SessionState::Loading {
            submission: self.last_submission,
        };
        self.dirty = true;
        self.last_submission
    }

    /// Applies an outcome if it belongs to the in-flight submission.
    pub(crate) fn resolve(&mut self, submission: SubmissionId, outcome: SessionState) -> bool {
        match self.session {
            SessionState::Loading { submission: active } if active == submission => {
                self.session = outcome;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn return_to_idle(&mut self) {
        self.session = SessionState::Idle;
        self.dirty = true;
    }
}
