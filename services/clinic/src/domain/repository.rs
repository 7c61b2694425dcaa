#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Doctor, Mapping, MappingDetail, Patient, User};
use crate::error::ClinicServiceError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    /// Lookup by email, compared case-sensitively as stored.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ClinicServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ClinicServiceError>;
    /// Fails with `UserAlreadyExists` on a duplicate email.
    async fn create(&self, user: &User) -> Result<(), ClinicServiceError>;
}

/// Repository for patients. Lookups by id are unscoped; callers check `user_id`.
pub trait PatientRepository: Send + Sync {
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Patient>, ClinicServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, ClinicServiceError>;
    async fn create(&self, patient: &Patient) -> Result<(), ClinicServiceError>;
    async fn update(&self, patient: &Patient) -> Result<(), ClinicServiceError>;
    /// Delete a patient and its mappings. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError>;
}

/// Repository for the shared doctor directory.
pub trait DoctorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Doctor>, ClinicServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, ClinicServiceError>;
    async fn create(&self, doctor: &Doctor) -> Result<(), ClinicServiceError>;
    async fn update(&self, doctor: &Doctor) -> Result<(), ClinicServiceError>;
    /// Delete a doctor and its mappings. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError>;
}

/// Repository for patient-doctor links.
pub trait MappingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mapping>, ClinicServiceError>;
    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, ClinicServiceError>;
    /// Fails with `MappingAlreadyExists` if the pair is already linked.
    async fn create(&self, mapping: &Mapping) -> Result<(), ClinicServiceError>;
    /// Mappings whose patient belongs to `user_id`, with both ends expanded.
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<MappingDetail>, ClinicServiceError>;
    async fn list_doctors_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Doctor>, ClinicServiceError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError>;
}

/// Port for one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, ClinicServiceError>;
    /// `Ok(false)` on mismatch; `Err` only if the stored hash is unusable.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ClinicServiceError>;
}
