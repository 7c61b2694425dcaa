use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_auth_types::identity::Principal;

use crate::domain::types::{Mapping, MappingDetail};
use crate::error::ClinicServiceError;
use crate::handlers::doctor::DoctorResponse;
use crate::handlers::patient::PatientResponse;
use crate::handlers::{MessageResponse, parse_id};
use crate::state::AppState;
use crate::usecase::mapping::{
    CreateMappingInput, CreateMappingUseCase, DeleteMappingUseCase, ListDoctorsForPatientUseCase,
    ListMappingsUseCase,
};

#[derive(Serialize)]
pub struct MappingResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(serialize_with = "clinic_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Mapping> for MappingResponse {
    fn from(m: Mapping) -> Self {
        Self {
            id: m.id,
            patient_id: m.patient_id,
            doctor_id: m.doctor_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct MappingDetailResponse {
    #[serde(flatten)]
    pub mapping: MappingResponse,
    pub patient: PatientResponse,
    pub doctor: DoctorResponse,
}

impl From<MappingDetail> for MappingDetailResponse {
    fn from(d: MappingDetail) -> Self {
        Self {
            mapping: d.mapping.into(),
            patient: d.patient.into(),
            doctor: d.doctor.into(),
        }
    }
}

// ── POST /api/mappings ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMappingRequest {
    #[serde(alias = "patientId")]
    pub patient_id: Option<String>,
    #[serde(alias = "doctorId")]
    pub doctor_id: Option<String>,
}

pub async fn create_mapping(
    principal: Principal,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateMappingRequest>, ClinicServiceError>,
) -> Result<(StatusCode, Json<MappingResponse>), ClinicServiceError> {
    let patient_id = parse_id(
        body.patient_id.as_deref().unwrap_or_default(),
        ClinicServiceError::PatientNotFound,
    )?;
    let doctor_id = parse_id(
        body.doctor_id.as_deref().unwrap_or_default(),
        ClinicServiceError::DoctorNotFound,
    )?;
    let usecase = CreateMappingUseCase {
        patients: state.patient_repo(),
        doctors: state.doctor_repo(),
        mappings: state.mapping_repo(),
    };
    let mapping = usecase
        .execute(
            principal.user_id,
            CreateMappingInput {
                patient_id,
                doctor_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(mapping.into())))
}

// ── GET /api/mappings ────────────────────────────────────────────────────────

pub async fn list_mappings(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<MappingDetailResponse>>, ClinicServiceError> {
    let usecase = ListMappingsUseCase {
        mappings: state.mapping_repo(),
    };
    let details = usecase.execute(principal.user_id).await?;
    Ok(Json(details.into_iter().map(Into::into).collect()))
}

// ── GET /api/mappings/{patient_id} ───────────────────────────────────────────

pub async fn list_doctors_for_patient(
    principal: Principal,
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<DoctorResponse>>, ClinicServiceError> {
    let patient_id = parse_id(&patient_id, ClinicServiceError::PatientNotFound)?;
    let usecase = ListDoctorsForPatientUseCase {
        patients: state.patient_repo(),
        mappings: state.mapping_repo(),
    };
    let doctors = usecase.execute(principal.user_id, patient_id).await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

// ── DELETE /api/mappings/{id} ────────────────────────────────────────────────

pub async fn delete_mapping(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::MappingNotFound)?;
    let usecase = DeleteMappingUseCase {
        patients: state.patient_repo(),
        mappings: state.mapping_repo(),
    };
    usecase.execute(principal.user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Mapping removed successfully",
    }))
}
