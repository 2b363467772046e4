use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

/// Structured answer from the analysis service. Decode-only; read-only once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResult {
    pub possible_diseases: Vec<PossibleDisease>,
    pub precautions: Vec<String>,
    pub when_to_seek_help: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PossibleDisease {
    pub name: String,
    pub likelihood: Likelihood,
    pub description: String,
}

/// Likelihood label, matched case-insensitively.
///
/// The service falls back to labels such as `"unknown"` when it cannot
/// analyze the input; those are kept verbatim in [`Likelihood::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Likelihood {
    Low,
    Medium,
    High,
    Unknown(String),
}

impl Likelihood {
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Likelihood::Low,
            "medium" => Likelihood::Medium,
            "high" => Likelihood::High,
            _ => Likelihood::Unknown(raw.to_string()),
        }
    }

    /// Lower-cased display label.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Likelihood::Low => Cow::Borrowed("low"),
            Likelihood::Medium => Cow::Borrowed("medium"),
            Likelihood::High => Cow::Borrowed("high"),
            Likelihood::Unknown(raw) => Cow::Owned(raw.to_lowercase()),
        }
    }
}

impl<'de> Deserialize<'de> for Likelihood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Likelihood::from_label(&raw))
    }
}
