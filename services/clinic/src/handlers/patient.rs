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

use crate::domain::types::{AgeInput, Patient, PatientFields, PatientPatch};
use crate::error::ClinicServiceError;
use crate::handlers::{MessageResponse, parse_id};
use crate::state::AppState;
use crate::usecase::patient::{
    CreatePatientUseCase, DeletePatientUseCase, GetPatientUseCase, ListPatientsUseCase,
    UpdatePatientUseCase,
};

#[derive(Serialize)]
pub struct PatientResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(serialize_with = "clinic_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "clinic_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            age: p.age,
            gender: p.gender,
            address: p.address,
            phone: p.phone,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Shared by create and update; on update absent fields stay unchanged.
#[derive(Deserialize)]
pub struct PatientRequest {
    pub name: Option<String>,
    pub age: Option<AgeInput>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// ── POST /api/patients ───────────────────────────────────────────────────────

pub async fn create_patient(
    principal: Principal,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<PatientRequest>, ClinicServiceError>,
) -> Result<(StatusCode, Json<PatientResponse>), ClinicServiceError> {
    let usecase = CreatePatientUseCase {
        repo: state.patient_repo(),
    };
    let patient = usecase
        .execute(
            principal.user_id,
            PatientFields {
                name: body.name,
                age: body.age,
                gender: body.gender,
                address: body.address,
                phone: body.phone,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(patient.into())))
}

// ── GET /api/patients ────────────────────────────────────────────────────────

pub async fn list_patients(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, ClinicServiceError> {
    let usecase = ListPatientsUseCase {
        repo: state.patient_repo(),
    };
    let patients = usecase.execute(principal.user_id).await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

// ── GET /api/patients/{id} ───────────────────────────────────────────────────

pub async fn get_patient(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::PatientNotFound)?;
    let usecase = GetPatientUseCase {
        repo: state.patient_repo(),
    };
    let patient = usecase.execute(principal.user_id, id).await?;
    Ok(Json(patient.into()))
}

// ── PUT /api/patients/{id} ───────────────────────────────────────────────────

pub async fn update_patient(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<PatientRequest>, ClinicServiceError>,
) -> Result<Json<PatientResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::PatientNotFound)?;
    let usecase = UpdatePatientUseCase {
        repo: state.patient_repo(),
    };
    let patient = usecase
        .execute(
            principal.user_id,
            id,
            PatientPatch {
                name: body.name,
                age: body.age,
                gender: body.gender,
                address: body.address,
                phone: body.phone,
            },
        )
        .await?;
    Ok(Json(patient.into()))
}

// ── DELETE /api/patients/{id} ────────────────────────────────────────────────

pub async fn delete_patient(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::PatientNotFound)?;
    let usecase = DeletePatientUseCase {
        repo: state.patient_repo(),
    };
    usecase.execute(principal.user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Patient removed successfully",
    }))
}
