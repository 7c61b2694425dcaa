use uuid::Uuid;

use crate::domain::repository::PatientRepository;
use crate::domain::types::{Patient, PatientFields, PatientPatch};
use crate::error::ClinicServiceError;

/// Load a patient only if `user_id` owns it. Absent and foreign look the same.
pub(crate) async fn find_owned<R: PatientRepository>(
    repo: &R,
    user_id: Uuid,
    patient_id: Uuid,
) -> Result<Patient, ClinicServiceError> {
    repo.find_by_id(patient_id)
        .await?
        .filter(|p| p.user_id == user_id)
        .ok_or(ClinicServiceError::PatientNotFound)
}

// ── CreatePatient ────────────────────────────────────────────────────────────

pub struct CreatePatientUseCase<R: PatientRepository> {
    pub repo: R,
}

impl<R: PatientRepository> CreatePatientUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        fields: PatientFields,
    ) -> Result<Patient, ClinicServiceError> {
        let patient = Patient::create(user_id, fields).map_err(ClinicServiceError::Validation)?;
        self.repo.create(&patient).await?;
        Ok(patient)
    }
}

// ── ListPatients ─────────────────────────────────────────────────────────────

pub struct ListPatientsUseCase<R: PatientRepository> {
    pub repo: R,
}

impl<R: PatientRepository> ListPatientsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Patient>, ClinicServiceError> {
        self.repo.list_by_owner(user_id).await
    }
}

// ── GetPatient ───────────────────────────────────────────────────────────────

pub struct GetPatientUseCase<R: PatientRepository> {
    pub repo: R,
}

impl<R: PatientRepository> GetPatientUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<Patient, ClinicServiceError> {
        find_owned(&self.repo, user_id, id).await
    }
}

// ── UpdatePatient ────────────────────────────────────────────────────────────

pub struct UpdatePatientUseCase<R: PatientRepository> {
    pub repo: R,
}

impl<R: PatientRepository> UpdatePatientUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: PatientPatch,
    ) -> Result<Patient, ClinicServiceError> {
        let mut patient = find_owned(&self.repo, user_id, id).await?;
        patient.apply(patch).map_err(ClinicServiceError::Validation)?;
        self.repo.update(&patient).await?;
        Ok(patient)
    }
}

// ── DeletePatient ────────────────────────────────────────────────────────────

pub struct DeletePatientUseCase<R: PatientRepository> {
    pub repo: R,
}

impl<R: PatientRepository> DeletePatientUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), ClinicServiceError> {
        find_owned(&self.repo, user_id, id).await?;
        if !self.repo.delete(id).await? {
            return Err(ClinicServiceError::PatientNotFound);
        }
        Ok(())
    }
}
