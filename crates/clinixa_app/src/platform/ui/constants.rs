use clinixa_core::Field;

pub const APP_TITLE: &str = "Clinixa Health";
pub const APP_TAGLINE: &str = "AI-powered symptom analysis and health recommendations";
pub const DISCLAIMER_BANNER: &str = "Important: This tool provides general health information only. \
It is not a substitute for professional medical advice, diagnosis, or treatment. \
Always consult a qualified healthcare provider for medical concerns.";
pub const LOADING_TEXT: &str = "Analyzing your symptoms...";
pub const FORM_HEADING: &str = "Enter Your Symptoms";
pub const KEEP_OR_CLEAR_HINT: &str = "(Enter keeps the value in brackets, '-' clears it)";

pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Symptoms => "Symptoms *",
        Field::Age => "Age",
        Field::Gender => "Gender (male/female/other)",
        Field::Duration => "Duration of Symptoms",
    }
}

pub fn field_placeholder(field: Field) -> &'static str {
    match field {
        Field::Symptoms => "e.g., headache, fever, cough, fatigue",
        Field::Age => "0-120, optional",
        Field::Gender => "optional",
        Field::Duration => "e.g., 2 days, 1 week",
    }
}
