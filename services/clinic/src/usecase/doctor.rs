use uuid::Uuid;

use crate::domain::repository::DoctorRepository;
use crate::domain::types::{Doctor, DoctorFields, DoctorPatch};
use crate::error::ClinicServiceError;

// ── CreateDoctor ─────────────────────────────────────────────────────────────

pub struct CreateDoctorUseCase<R: DoctorRepository> {
    pub repo: R,
}

impl<R: DoctorRepository> CreateDoctorUseCase<R> {
    pub async fn execute(&self, fields: DoctorFields) -> Result<Doctor, ClinicServiceError> {
        let doctor = Doctor::create(fields).map_err(ClinicServiceError::Validation)?;
        self.repo.create(&doctor).await?;
        Ok(doctor)
    }
}

// ── ListDoctors ──────────────────────────────────────────────────────────────

pub struct ListDoctorsUseCase<R: DoctorRepository> {
    pub repo: R,
}

impl<R: DoctorRepository> ListDoctorsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Doctor>, ClinicServiceError> {
        self.repo.list().await
    }
}

// ── GetDoctor ────────────────────────────────────────────────────────────────

pub struct GetDoctorUseCase<R: DoctorRepository> {
    pub repo: R,
}

impl<R: DoctorRepository> GetDoctorUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Doctor, ClinicServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ClinicServiceError::DoctorNotFound)
    }
}

// ── UpdateDoctor ─────────────────────────────────────────────────────────────

pub struct UpdateDoctorUseCase<R: DoctorRepository> {
    pub repo: R,
}

impl<R: DoctorRepository> UpdateDoctorUseCase<R> {
    pub async fn execute(&self, id: Uuid, patch: DoctorPatch) -> Result<Doctor, ClinicServiceError> {
        let mut doctor = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ClinicServiceError::DoctorNotFound)?;
        doctor.apply(patch).map_err(ClinicServiceError::Validation)?;
        self.repo.update(&doctor).await?;
        Ok(doctor)
    }
}

// ── DeleteDoctor ─────────────────────────────────────────────────────────────

pub struct DeleteDoctorUseCase<R: DoctorRepository> {
    pub repo: R,
}

impl<R: DoctorRepository> DeleteDoctorUseCase<R> {
    /// Mappings that reference the doctor go with it.
    pub async fn execute(&self, id: Uuid) -> Result<(), ClinicServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ClinicServiceError::DoctorNotFound);
        }
        Ok(())
    }
}
