use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{ConnectOptions, Database};
use uuid::Uuid;

use clinic_migration::{Migrator, MigratorTrait as _};
use clinic_server::domain::repository::{DoctorRepository, MappingRepository, PatientRepository};
use clinic_server::domain::types::{Doctor, Mapping, MappingDetail, Patient};
use clinic_server::error::ClinicServiceError;
use clinic_server::router::build_router;
use clinic_server::state::AppState;

pub use clinic_testing::auth::{MockAuth, TEST_JWT_SECRET, bearer_header};

// ── In-memory store ──────────────────────────────────────────────────────────

/// Tables shared by the mock repositories, so mapping queries can see
/// patients and doctors created through the other repos.
#[derive(Clone, Default)]
pub struct MemStore {
    pub patients: Arc<Mutex<Vec<Patient>>>,
    pub doctors: Arc<Mutex<Vec<Doctor>>>,
    pub mappings: Arc<Mutex<Vec<Mapping>>>,
}

impl MemStore {
    pub fn patient_repo(&self) -> MockPatientRepo {
        MockPatientRepo(self.clone())
    }

    pub fn doctor_repo(&self) -> MockDoctorRepo {
        MockDoctorRepo(self.clone())
    }

    pub fn mapping_repo(&self) -> MockMappingRepo {
        MockMappingRepo(self.clone())
    }

    pub fn insert_patient(&self, patient: Patient) -> Patient {
        self.patients.lock().unwrap().push(patient.clone());
        patient
    }

    pub fn insert_doctor(&self, doctor: Doctor) -> Doctor {
        self.doctors.lock().unwrap().push(doctor.clone());
        doctor
    }

    pub fn insert_mapping(&self, patient_id: Uuid, doctor_id: Uuid) -> Mapping {
        let mapping = Mapping {
            id: Uuid::now_v7(),
            patient_id,
            doctor_id,
            created_at: Utc::now(),
        };
        self.mappings.lock().unwrap().push(mapping.clone());
        mapping
    }
}

// ── MockPatientRepo ──────────────────────────────────────────────────────────

pub struct MockPatientRepo(pub MemStore);

impl PatientRepository for MockPatientRepo {
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Patient>, ClinicServiceError> {
        Ok(self
            .0
            .patients
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, ClinicServiceError> {
        Ok(self.0.patients.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, patient: &Patient) -> Result<(), ClinicServiceError> {
        self.0.patients.lock().unwrap().push(patient.clone());
        Ok(())
    }

    async fn update(&self, patient: &Patient) -> Result<(), ClinicServiceError> {
        let mut patients = self.0.patients.lock().unwrap();
        if let Some(slot) = patients.iter_mut().find(|p| p.id == patient.id) {
            *slot = patient.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let mut patients = self.0.patients.lock().unwrap();
        let before = patients.len();
        patients.retain(|p| p.id != id);
        self.0.mappings.lock().unwrap().retain(|m| m.patient_id != id);
        Ok(patients.len() < before)
    }
}

// ── MockDoctorRepo ───────────────────────────────────────────────────────────

pub struct MockDoctorRepo(pub MemStore);

impl DoctorRepository for MockDoctorRepo {
    async fn list(&self) -> Result<Vec<Doctor>, ClinicServiceError> {
        Ok(self.0.doctors.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, ClinicServiceError> {
        Ok(self.0.doctors.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, doctor: &Doctor) -> Result<(), ClinicServiceError> {
        self.0.doctors.lock().unwrap().push(doctor.clone());
        Ok(())
    }

    async fn update(&self, doctor: &Doctor) -> Result<(), ClinicServiceError> {
        let mut doctors = self.0.doctors.lock().unwrap();
        if let Some(slot) = doctors.iter_mut().find(|d| d.id == doctor.id) {
            *slot = doctor.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let mut doctors = self.0.doctors.lock().unwrap();
        let before = doctors.len();
        doctors.retain(|d| d.id != id);
        self.0.mappings.lock().unwrap().retain(|m| m.doctor_id != id);
        Ok(doctors.len() < before)
    }
}

// ── MockMappingRepo ──────────────────────────────────────────────────────────

pub struct MockMappingRepo(pub MemStore);

impl MappingRepository for MockMappingRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mapping>, ClinicServiceError> {
        Ok(self.0.mappings.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, ClinicServiceError> {
        Ok(self
            .0
            .mappings
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.patient_id == patient_id && m.doctor_id == doctor_id))
    }

    async fn create(&self, mapping: &Mapping) -> Result<(), ClinicServiceError> {
        self.0.mappings.lock().unwrap().push(mapping.clone());
        Ok(())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<MappingDetail>, ClinicServiceError> {
        let patients = self.0.patients.lock().unwrap();
        let doctors = self.0.doctors.lock().unwrap();
        Ok(self
            .0
            .mappings
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| {
                let patient = patients
                    .iter()
                    .find(|p| p.id == m.patient_id && p.user_id == user_id)?;
                let doctor = doctors.iter().find(|d| d.id == m.doctor_id)?;
                Some(MappingDetail {
                    mapping: m.clone(),
                    patient: patient.clone(),
                    doctor: doctor.clone(),
                })
            })
            .collect())
    }

    async fn list_doctors_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Doctor>, ClinicServiceError> {
        let doctors = self.0.doctors.lock().unwrap();
        Ok(self
            .0
            .mappings
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.patient_id == patient_id)
            .filter_map(|m| doctors.iter().find(|d| d.id == m.doctor_id).cloned())
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let mut mappings = self.0.mappings.lock().unwrap();
        let before = mappings.len();
        mappings.retain(|m| m.id != id);
        Ok(mappings.len() < before)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_patient(user_id: Uuid, name: &str) -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::now_v7(),
        user_id,
        name: name.to_owned(),
        age: 40,
        gender: None,
        address: None,
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_doctor(name: &str, specialization: &str) -> Doctor {
    let now = Utc::now();
    Doctor {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        specialization: specialization.to_owned(),
        contact: None,
        created_at: now,
        updated_at: now,
    }
}

// ── HTTP test app ────────────────────────────────────────────────────────────

/// Fresh in-memory SQLite database with every migration applied.
pub async fn test_state() -> AppState {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // Each pooled connection would otherwise see its own empty database.
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState {
        db,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 3600,
    }
}

pub async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state)
}
