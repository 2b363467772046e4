use crate::{AnalysisResult, FieldErrors, RawForm, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: SessionPhase,
    pub form: RawForm,
    pub field_errors: FieldErrors,
    pub submit_enabled: bool,
    pub error_message: Option<String>,
    pub results: Option<ResultsView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub conditions: Vec<ConditionRowView>,
    pub precautions: Vec<String>,
    pub when_to_seek_help: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRowView {
    pub name: String,
    /// Lower-cased likelihood, e.g. `"high"`.
    pub likelihood: String,
    pub description: String,
}

impl ResultsView {
    pub(crate) fn from_result(result: &AnalysisResult) -> Self {
        Self {
            conditions: result
                .possible_diseases
                .iter()
                .map(|disease| ConditionRowView {
                    name: disease.name.clone(),
                    likelihood: disease.likelihood.label().into_owned(),
                    description: disease.description.clone(),
                })
                .collect(),
            precautions: result.precautions.clone(),
            when_to_seek_help: result.when_to_seek_help.clone(),
            disclaimer: result.disclaimer.clone(),
        }
    }
}
