use uuid::Uuid;

use clinic_server::domain::types::{AgeInput, PatientFields, PatientPatch};
use clinic_server::error::ClinicServiceError;
use clinic_server::usecase::patient::{
    CreatePatientUseCase, DeletePatientUseCase, GetPatientUseCase, ListPatientsUseCase,
    UpdatePatientUseCase,
};

use crate::helpers::{MemStore, test_doctor, test_patient};

// ── CreatePatientUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_patient_for_caller() {
    let store = MemStore::default();
    let owner = Uuid::now_v7();
    let usecase = CreatePatientUseCase {
        repo: store.patient_repo(),
    };

    let patient = usecase
        .execute(
            owner,
            PatientFields {
                name: Some("Bob".into()),
                age: Some(AgeInput::Number(40)),
                phone: Some("555-0100".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patient.user_id, owner);
    assert_eq!(store.patients.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_not_persist_invalid_patient() {
    let store = MemStore::default();
    let usecase = CreatePatientUseCase {
        repo: store.patient_repo(),
    };

    let result = usecase
        .execute(
            Uuid::now_v7(),
            PatientFields {
                name: Some("Bob".into()),
                age: Some(AgeInput::Number(0)),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(ClinicServiceError::Validation(ref e)) if e[0].field == "age"),
        "expected age validation error, got {result:?}"
    );
    assert!(store.patients.lock().unwrap().is_empty());
}

// ── ListPatientsUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_own_patients() {
    let store = MemStore::default();
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();
    store.insert_patient(test_patient(alice, "A1"));
    store.insert_patient(test_patient(alice, "A2"));
    store.insert_patient(test_patient(bob, "B1"));

    let usecase = ListPatientsUseCase {
        repo: store.patient_repo(),
    };
    let names: Vec<_> = usecase
        .execute(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, ["A1", "A2"]);
}

// ── GetPatientUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_foreign_patient_as_not_found() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));

    let usecase = GetPatientUseCase {
        repo: store.patient_repo(),
    };
    let foreign = usecase.execute(Uuid::now_v7(), patient.id).await;
    let missing = usecase.execute(patient.user_id, Uuid::now_v7()).await;

    assert!(matches!(foreign, Err(ClinicServiceError::PatientNotFound)));
    assert!(matches!(missing, Err(ClinicServiceError::PatientNotFound)));
}

// ── UpdatePatientUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_merge_patch_and_refresh_updated_at() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));

    let usecase = UpdatePatientUseCase {
        repo: store.patient_repo(),
    };
    let updated = usecase
        .execute(
            patient.user_id,
            patient.id,
            PatientPatch {
                age: Some(AgeInput::Text("41".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Bob");
    assert_eq!(updated.age, 41);
    assert!(updated.updated_at >= patient.updated_at);
    assert_eq!(store.patients.lock().unwrap()[0].age, 41);
}

#[tokio::test]
async fn should_refuse_update_by_other_user() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));

    let usecase = UpdatePatientUseCase {
        repo: store.patient_repo(),
    };
    let result = usecase
        .execute(
            Uuid::now_v7(),
            patient.id,
            PatientPatch {
                name: Some("Mallory".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ClinicServiceError::PatientNotFound)));
    assert_eq!(store.patients.lock().unwrap()[0].name, "Bob");
}

// ── DeletePatientUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_patient_and_its_mappings() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    store.insert_mapping(patient.id, doctor.id);

    let usecase = DeletePatientUseCase {
        repo: store.patient_repo(),
    };
    usecase.execute(patient.user_id, patient.id).await.unwrap();

    assert!(store.patients.lock().unwrap().is_empty());
    assert!(store.mappings.lock().unwrap().is_empty());
    assert_eq!(store.doctors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_delete_by_other_user() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));

    let usecase = DeletePatientUseCase {
        repo: store.patient_repo(),
    };
    let result = usecase.execute(Uuid::now_v7(), patient.id).await;

    assert!(matches!(result, Err(ClinicServiceError::PatientNotFound)));
    assert_eq!(store.patients.lock().unwrap().len(), 1);
}
