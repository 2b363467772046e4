use std::collections::BTreeMap;
use std::fmt;

/// Input fields of the symptom form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Symptoms,
    Age,
    Gender,
    Duration,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Symptoms, Field::Age, Field::Gender, Field::Duration];

    /// Wire name, also used as the key of a field error.
    pub fn name(self) -> &'static str {
        match self {
            Field::Symptoms => "symptoms",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Duration => "duration",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Form values exactly as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawForm {
    pub symptoms: String,
    pub age: String,
    pub gender: String,
    pub duration: String,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Symptoms => &self.symptoms,
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Duration => &self.duration,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Symptoms => &mut self.symptoms,
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Duration => &mut self.duration,
        };
        *slot = value.into();
    }
}

/// Field-scoped validation messages, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drops the error for one field, leaving the others untouched.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
