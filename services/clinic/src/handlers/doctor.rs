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

use crate::domain::types::{Doctor, DoctorFields, DoctorPatch};
use crate::error::ClinicServiceError;
use crate::handlers::{MessageResponse, parse_id};
use crate::state::AppState;
use crate::usecase::doctor::{
    CreateDoctorUseCase, DeleteDoctorUseCase, GetDoctorUseCase, ListDoctorsUseCase,
    UpdateDoctorUseCase,
};

#[derive(Serialize)]
pub struct DoctorResponse {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub contact: Option<String>,
    #[serde(serialize_with = "clinic_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "clinic_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Doctor> for DoctorResponse {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialization: d.specialization,
            contact: d.contact,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct DoctorRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub contact: Option<String>,
}

// ── POST /api/doctors ────────────────────────────────────────────────────────

pub async fn create_doctor(
    _principal: Principal,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<DoctorRequest>, ClinicServiceError>,
) -> Result<(StatusCode, Json<DoctorResponse>), ClinicServiceError> {
    let usecase = CreateDoctorUseCase {
        repo: state.doctor_repo(),
    };
    let doctor = usecase
        .execute(DoctorFields {
            name: body.name,
            specialization: body.specialization,
            contact: body.contact,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(doctor.into())))
}

// ── GET /api/doctors ─────────────────────────────────────────────────────────

pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorResponse>>, ClinicServiceError> {
    let usecase = ListDoctorsUseCase {
        repo: state.doctor_repo(),
    };
    let doctors = usecase.execute().await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

// ── GET /api/doctors/{id} ────────────────────────────────────────────────────

pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DoctorResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::DoctorNotFound)?;
    let usecase = GetDoctorUseCase {
        repo: state.doctor_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/doctors/{id} ────────────────────────────────────────────────────

pub async fn update_doctor(
    _principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<DoctorRequest>, ClinicServiceError>,
) -> Result<Json<DoctorResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::DoctorNotFound)?;
    let usecase = UpdateDoctorUseCase {
        repo: state.doctor_repo(),
    };
    let doctor = usecase
        .execute(
            id,
            DoctorPatch {
                name: body.name,
                specialization: body.specialization,
                contact: body.contact,
            },
        )
        .await?;
    Ok(Json(doctor.into()))
}

// ── DELETE /api/doctors/{id} ─────────────────────────────────────────────────

pub async fn delete_doctor(
    _principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ClinicServiceError> {
    let id = parse_id(&id, ClinicServiceError::DoctorNotFound)?;
    let usecase = DeleteDoctorUseCase {
        repo: state.doctor_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        message: "Doctor removed successfully",
    }))
}
