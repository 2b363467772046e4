use clinixa_core::{
    update, AppState, AppViewModel, Effect, Field, FieldErrors, Msg, RawForm, SessionState,
};
use clinixa_logging::{clinixa_debug, clinixa_info, clinixa_warn};
use tokio::sync::watch;

use crate::AnalysisClient;

/// Owns the session state and runs core effects against an [`AnalysisClient`].
///
/// Every state change goes through [`clinixa_core::update`]. Observers get the
/// current [`SessionState`] through [`SessionController::subscribe`].
pub struct SessionController<C> {
    client: C,
    state: AppState,
    observers: watch::Sender<SessionState>,
}

impl<C: AnalysisClient> SessionController<C> {
    pub fn new(client: C) -> Self {
        let (observers, _) = watch::channel(SessionState::Idle);
        Self {
            client,
            state: AppState::new(),
            observers,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.observers.subscribe()
    }

    pub fn session(&self) -> &SessionState {
        self.state.session()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(Msg::FieldEdited {
            field,
            value: value.into(),
        });
    }

    pub fn load_form(&mut self, form: RawForm) {
        self.dispatch(Msg::FormLoaded(form));
    }

    /// Validates the current form and, if valid, performs the single analysis call.
    ///
    /// Returns the field errors when validation blocks the call; the transport
    /// is not touched in that case. Otherwise the session ends in `Result` or
    /// `Error` before this returns.
    pub async fn submit(&mut self) -> Result<&SessionState, FieldErrors> {
        let effects = self.dispatch(Msg::SubmitClicked);
        if effects.is_empty() && !self.state.session().is_loading() {
            return Err(self.state.field_errors().clone());
        }
        for effect in effects {
            self.run_effect(effect).await;
        }
        Ok(self.state.session())
    }

    pub async fn submit_form(&mut self, form: RawForm) -> Result<&SessionState, FieldErrors> {
        self.load_form(form);
        self.submit().await
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetClicked);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Msg::ErrorDismissed);
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let session = self.state.session();
        self.observers.send_if_modified(|current| {
            if *current == *session {
                false
            } else {
                *current = session.clone();
                true
            }
        });
        effects
    }

    async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AnalyzeSymptoms {
                submission,
                request,
            } => {
                clinixa_info!(
                    "submission {} started symptoms_len={} age={:?} gender={:?}",
                    submission,
                    request.symptoms().len(),
                    request.age(),
                    request.gender()
                );
                let msg = match self.client.analyze(&request).await {
                    Ok(result) => {
                        clinixa_debug!("submission {} succeeded", submission);
                        Msg::AnalysisSucceeded { submission, result }
                    }
                    Err(err) => {
                        clinixa_warn!("submission {} failed: {}", submission, err);
                        Msg::AnalysisFailed {
                            submission,
                            message: err.user_message(),
                        }
                    }
                };
                self.dispatch(msg);
            }
        }
    }
}
