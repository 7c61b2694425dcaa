use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{DoctorRepository, MappingRepository, PatientRepository};
use crate::domain::types::{Doctor, Mapping, MappingDetail};
use crate::error::ClinicServiceError;
use crate::usecase::patient::find_owned;

// ── CreateMapping ────────────────────────────────────────────────────────────

pub struct CreateMappingInput {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
}

pub struct CreateMappingUseCase<P: PatientRepository, D: DoctorRepository, M: MappingRepository> {
    pub patients: P,
    pub doctors: D,
    pub mappings: M,
}

impl<P, D, M> CreateMappingUseCase<P, D, M>
where
    P: PatientRepository,
    D: DoctorRepository,
    M: MappingRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateMappingInput,
    ) -> Result<Mapping, ClinicServiceError> {
        find_owned(&self.patients, user_id, input.patient_id).await?;
        if self.doctors.find_by_id(input.doctor_id).await?.is_none() {
            return Err(ClinicServiceError::DoctorNotFound);
        }
        if self.mappings.exists(input.patient_id, input.doctor_id).await? {
            return Err(ClinicServiceError::MappingAlreadyExists);
        }

        let mapping = Mapping {
            id: Uuid::now_v7(),
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            created_at: Utc::now(),
        };
        self.mappings.create(&mapping).await?;
        Ok(mapping)
    }
}

// ── ListMappings ─────────────────────────────────────────────────────────────

pub struct ListMappingsUseCase<M: MappingRepository> {
    pub mappings: M,
}

impl<M: MappingRepository> ListMappingsUseCase<M> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<MappingDetail>, ClinicServiceError> {
        self.mappings.list_by_owner(user_id).await
    }
}

// ── ListDoctorsForPatient ────────────────────────────────────────────────────

pub struct ListDoctorsForPatientUseCase<P: PatientRepository, M: MappingRepository> {
    pub patients: P,
    pub mappings: M,
}

impl<P: PatientRepository, M: MappingRepository> ListDoctorsForPatientUseCase<P, M> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        patient_id: Uuid,
    ) -> Result<Vec<Doctor>, ClinicServiceError> {
        find_owned(&self.patients, user_id, patient_id).await?;
        self.mappings.list_doctors_for_patient(patient_id).await
    }
}

// ── DeleteMapping ────────────────────────────────────────────────────────────

pub struct DeleteMappingUseCase<P: PatientRepository, M: MappingRepository> {
    pub patients: P,
    pub mappings: M,
}

impl<P: PatientRepository, M: MappingRepository> DeleteMappingUseCase<P, M> {
    /// Unlike patient reads, a foreign mapping is reported as `Forbidden`.
    pub async fn execute(&self, user_id: Uuid, mapping_id: Uuid) -> Result<(), ClinicServiceError> {
        let mapping = self
            .mappings
            .find_by_id(mapping_id)
            .await?
            .ok_or(ClinicServiceError::MappingNotFound)?;

        let owner = self
            .patients
            .find_by_id(mapping.patient_id)
            .await?
            .map(|p| p.user_id);
        if owner != Some(user_id) {
            tracing::debug!(%user_id, %mapping_id, "mapping delete refused");
            return Err(ClinicServiceError::Forbidden);
        }

        if !self.mappings.delete(mapping_id).await? {
            return Err(ClinicServiceError::MappingNotFound);
        }
        Ok(())
    }
}
