use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use clinic_domain::validation::{FieldError, FieldErrors, is_present, is_valid_email};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account that owns patients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC-format Argon2 hash. The plaintext is never stored.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient record, visible only to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Doctor record, shared across users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Link between one patient and one doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A mapping expanded with both ends.
#[derive(Debug, Clone)]
pub struct MappingDetail {
    pub mapping: Mapping,
    pub patient: Patient,
    pub doctor: Doctor,
}

/// Age exactly as sent by the client. Any JSON value deserializes, so a
/// wrong type surfaces as a field error rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl AgeInput {
    /// The age if it is a positive integer that fits the column.
    /// Integral floats such as `40.0` count as integers.
    pub fn positive(&self) -> Option<i32> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Float(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => *f as i64,
            Self::Text(s) => s.trim().parse().ok()?,
            Self::Float(_) | Self::Other(_) => return None,
        };
        i32::try_from(value).ok().filter(|age| *age > 0)
    }
}

/// Fields for a new patient, before validation.
#[derive(Debug, Clone, Default)]
pub struct PatientFields {
    pub name: Option<String>,
    pub age: Option<AgeInput>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Partial update for a patient; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<AgeInput>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Fields for a new doctor, before validation.
#[derive(Debug, Clone, Default)]
pub struct DoctorFields {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub contact: Option<String>,
}

/// Partial update for a doctor; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub contact: Option<String>,
}

const NAME_REQUIRED: &str = "Name is required";
const AGE_POSITIVE: &str = "Age must be a positive integer";
const SPECIALIZATION_REQUIRED: &str = "Specialization is required";

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = FieldErrors::new();
    errors
        .check(is_present(name), "name", NAME_REQUIRED)
        .check(is_valid_email(email), "email", "Please include a valid email")
        .check(
            password.chars().count() >= MIN_PASSWORD_LEN,
            "password",
            "Password must be 6 or more characters",
        );
    errors.finish()
}

pub fn validate_login(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = FieldErrors::new();
    errors
        .check(is_valid_email(email), "email", "Please include a valid email")
        .check(!password.is_empty(), "password", "Password is required");
    errors.finish()
}

impl Patient {
    /// Validate `fields` and build a patient owned by `user_id`.
    pub fn create(user_id: Uuid, fields: PatientFields) -> Result<Self, Vec<FieldError>> {
        let name = fields.name.filter(|n| is_present(n));
        let age = fields.age.as_ref().and_then(AgeInput::positive);

        let (Some(name), Some(age)) = (name.clone(), age) else {
            let mut errors = FieldErrors::new();
            errors
                .check(name.is_some(), "name", NAME_REQUIRED)
                .check(age.is_some(), "age", AGE_POSITIVE);
            return Err(errors.into_vec());
        };
        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            user_id,
            name,
            age,
            gender: fields.gender,
            address: fields.address,
            phone: fields.phone,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge supplied fields. Validates before touching anything.
    pub fn apply(&mut self, patch: PatientPatch) -> Result<(), Vec<FieldError>> {
        let age = patch.age.as_ref().map(AgeInput::positive);

        let mut errors = FieldErrors::new();
        errors
            .check(
                patch.name.as_deref().is_none_or(is_present),
                "name",
                NAME_REQUIRED,
            )
            .check(!matches!(age, Some(None)), "age", AGE_POSITIVE);
        errors.finish()?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(Some(age)) = age {
            self.age = age;
        }
        if patch.gender.is_some() {
            self.gender = patch.gender;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Doctor {
    pub fn create(fields: DoctorFields) -> Result<Self, Vec<FieldError>> {
        let name = fields.name.filter(|n| is_present(n));
        let specialization = fields.specialization.filter(|s| is_present(s));

        let (Some(name), Some(specialization)) = (name.clone(), specialization.clone()) else {
            let mut errors = FieldErrors::new();
            errors
                .check(name.is_some(), "name", NAME_REQUIRED)
                .check(
                    specialization.is_some(),
                    "specialization",
                    SPECIALIZATION_REQUIRED,
                );
            return Err(errors.into_vec());
        };
        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            name,
            specialization,
            contact: fields.contact,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: DoctorPatch) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .check(
                patch.name.as_deref().is_none_or(is_present),
                "name",
                NAME_REQUIRED,
            )
            .check(
                patch.specialization.as_deref().is_none_or(is_present),
                "specialization",
                SPECIALIZATION_REQUIRED,
            );
        errors.finish()?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(specialization) = patch.specialization {
            self.specialization = specialization;
        }
        if patch.contact.is_some() {
            self.contact = patch.contact;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
