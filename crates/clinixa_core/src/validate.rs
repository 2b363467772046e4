use serde::Serialize;

use crate::{Field, FieldErrors, RawForm};

pub const SYMPTOMS_REQUIRED: &str = "Please describe your symptoms";
pub const AGE_INVALID: &str = "Please enter a valid age (0-120)";
pub const GENDER_INVALID: &str = "Please select a valid gender";

const MIN_AGE: f64 = 0.0;
const MAX_AGE: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Normalized payload for the analysis service.
///
/// Only [`validate`] builds one, so every value that reaches the transport has
/// non-blank symptoms and an age inside `0..=120`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomRequest {
    symptoms: String,
    age: Option<u8>,
    gender: Option<Gender>,
    duration: Option<String>,
}

impl SymptomRequest {
    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn age(&self) -> Option<u8> {
        self.age
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }
}

/// Validates every field and builds the request, or reports all field errors.
pub fn validate(form: &RawForm) -> Result<SymptomRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(message) = check_symptoms(&form.symptoms) {
        errors.insert(Field::Symptoms, message);
    }
    let age = parse_age(&form.age).unwrap_or_else(|message| {
        errors.insert(Field::Age, message);
        None
    });
    let gender = parse_gender(&form.gender).unwrap_or_else(|message| {
        errors.insert(Field::Gender, message);
        None
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SymptomRequest {
        // Sent as typed; trimming is only used for the emptiness check.
        symptoms: form.symptoms.clone(),
        age,
        gender,
        // Whitespace-only counts as absent; anything else is sent as typed.
        duration: non_blank(&form.duration).map(|_| form.duration.clone()),
    })
}

/// Revalidates a single field, returning its error message if any.
pub fn validate_field(form: &RawForm, field: Field) -> Option<&'static str> {
    let value = form.get(field);
    match field {
        Field::Symptoms => check_symptoms(value).err(),
        Field::Age => parse_age(value).err(),
        Field::Gender => parse_gender(value).err(),
        Field::Duration => None,
    }
}

fn check_symptoms(raw: &str) -> Result<(), &'static str> {
    if raw.trim().is_empty() {
        Err(SYMPTOMS_REQUIRED)
    } else {
        Ok(())
    }
}

fn parse_age(raw: &str) -> Result<Option<u8>, &'static str> {
    let Some(trimmed) = non_blank(raw) else {
        return Ok(None);
    };
    let value: f64 = trimmed.parse().map_err(|_| AGE_INVALID)?;
    if !value.is_finite() || !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(AGE_INVALID);
    }
    // Fractional ages truncate toward zero, after the range check.
    Ok(Some(value.trunc() as u8))
}

fn parse_gender(raw: &str) -> Result<Option<Gender>, &'static str> {
    let Some(trimmed) = non_blank(raw) else {
        return Ok(None);
    };
    match trimmed.to_ascii_lowercase().as_str() {
        "male" => Ok(Some(Gender::Male)),
        "female" => Ok(Some(Gender::Female)),
        "other" => Ok(Some(Gender::Other)),
        _ => Err(GENDER_INVALID),
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
