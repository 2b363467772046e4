use crate::{validate, AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            state.edit_field(field, value);
            Vec::new()
        }
        Msg::FormLoaded(form) => {
            state.replace_form(form);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One submission in flight at a time; extra submits are dropped.
            if state.session().is_loading() {
                return (state, Vec::new());
            }
            match validate(state.form()) {
                Ok(request) => {
                    let submission = state.begin_submission();
                    vec![Effect::AnalyzeSymptoms {
                        submission,
                        request,
                    }]
                }
                Err(errors) => {
                    state.set_field_errors(errors);
                    Vec::new()
                }
            }
        }
        Msg::AnalysisSucceeded { submission, result } => {
            state.resolve(submission, SessionState::Result { value: result });
            Vec::new()
        }
        Msg::AnalysisFailed {
            submission,
            message,
        } => {
            state.resolve(submission, SessionState::Error { message });
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.session().is_terminal() {
                state.return_to_idle();
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            if matches!(state.session(), SessionState::Error { .. }) {
                state.return_to_idle();
            }
            Vec::new()
        }
    };

    (state, effects)
}
