use crate::{SubmissionId, SymptomRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one analysis call for this submission.
    AnalyzeSymptoms {
        submission: SubmissionId,
        request: SymptomRequest,
    },
}
