#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User changed one form field.
    FieldEdited {
        field: crate::Field,
        value: String,
    },
    /// Replace all form values at once (non-interactive callers).
    FormLoaded(crate::RawForm),
    /// User pressed Analyze.
    SubmitClicked,
    /// Transport returned a parsed analysis.
    AnalysisSucceeded {
        submission: crate::SubmissionId,
        result: crate::AnalysisResult,
    },
    /// Transport failed; `message` is already user-facing.
    AnalysisFailed {
        submission: crate::SubmissionId,
        message: String,
    },
    /// User asked for a new analysis from the results or error view.
    ResetClicked,
    /// User closed the error banner.
    ErrorDismissed,
}
