use uuid::Uuid;

use clinic_server::error::ClinicServiceError;
use clinic_server::usecase::mapping::{
    CreateMappingInput, CreateMappingUseCase, DeleteMappingUseCase, ListDoctorsForPatientUseCase,
    ListMappingsUseCase,
};

use crate::helpers::{
    MemStore, MockDoctorRepo, MockMappingRepo, MockPatientRepo, test_doctor, test_patient,
};

fn create_usecase(store: &MemStore) -> CreateMappingUseCase<MockPatientRepo, MockDoctorRepo, MockMappingRepo> {
    CreateMappingUseCase {
        patients: store.patient_repo(),
        doctors: store.doctor_repo(),
        mappings: store.mapping_repo(),
    }
}

// ── CreateMappingUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_link_own_patient_to_doctor() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));

    let mapping = create_usecase(&store)
        .execute(
            patient.user_id,
            CreateMappingInput {
                patient_id: patient.id,
                doctor_id: doctor.id,
            },
        )
        .await
        .unwrap();

    assert_eq!(mapping.patient_id, patient.id);
    assert_eq!(mapping.doctor_id, doctor.id);
    assert_eq!(store.mappings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_mapping_foreign_patient() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));

    let result = create_usecase(&store)
        .execute(
            Uuid::now_v7(),
            CreateMappingInput {
                patient_id: patient.id,
                doctor_id: doctor.id,
            },
        )
        .await;

    assert!(matches!(result, Err(ClinicServiceError::PatientNotFound)));
    assert!(store.mappings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_refuse_mapping_unknown_doctor() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));

    let result = create_usecase(&store)
        .execute(
            patient.user_id,
            CreateMappingInput {
                patient_id: patient.id,
                doctor_id: Uuid::now_v7(),
            },
        )
        .await;

    assert!(matches!(result, Err(ClinicServiceError::DoctorNotFound)));
}

#[tokio::test]
async fn should_refuse_duplicate_pair() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    store.insert_mapping(patient.id, doctor.id);

    let result = create_usecase(&store)
        .execute(
            patient.user_id,
            CreateMappingInput {
                patient_id: patient.id,
                doctor_id: doctor.id,
            },
        )
        .await;

    assert!(matches!(result, Err(ClinicServiceError::MappingAlreadyExists)));
    assert_eq!(store.mappings.lock().unwrap().len(), 1);
}

// ── ListMappingsUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_mappings_of_own_patients() {
    let store = MemStore::default();
    let alice = Uuid::now_v7();
    let mine = store.insert_patient(test_patient(alice, "Mine"));
    let theirs = store.insert_patient(test_patient(Uuid::now_v7(), "Theirs"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    store.insert_mapping(mine.id, doctor.id);
    store.insert_mapping(theirs.id, doctor.id);

    let details = ListMappingsUseCase {
        mappings: store.mapping_repo(),
    }
    .execute(alice)
    .await
    .unwrap();

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].patient.name, "Mine");
    assert_eq!(details[0].doctor.name, "Dr. Lee");
}

// ── ListDoctorsForPatientUseCase ─────────────────────────────────────────────

#[tokio::test]
async fn should_list_doctors_for_own_patient_only() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let lee = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    store.insert_doctor(test_doctor("Dr. Kim", "Dermatology"));
    store.insert_mapping(patient.id, lee.id);

    let usecase = ListDoctorsForPatientUseCase {
        patients: store.patient_repo(),
        mappings: store.mapping_repo(),
    };
    let doctors = usecase.execute(patient.user_id, patient.id).await.unwrap();
    let foreign = usecase.execute(Uuid::now_v7(), patient.id).await;

    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].id, lee.id);
    assert!(matches!(foreign, Err(ClinicServiceError::PatientNotFound)));
}

// ── DeleteMappingUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_own_mapping() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    let mapping = store.insert_mapping(patient.id, doctor.id);

    DeleteMappingUseCase {
        patients: store.patient_repo(),
        mappings: store.mapping_repo(),
    }
    .execute(patient.user_id, mapping.id)
    .await
    .unwrap();

    assert!(store.mappings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_deleting_foreign_mapping() {
    let store = MemStore::default();
    let patient = store.insert_patient(test_patient(Uuid::now_v7(), "Bob"));
    let doctor = store.insert_doctor(test_doctor("Dr. Lee", "Cardiology"));
    let mapping = store.insert_mapping(patient.id, doctor.id);

    let result = DeleteMappingUseCase {
        patients: store.patient_repo(),
        mappings: store.mapping_repo(),
    }
    .execute(Uuid::now_v7(), mapping.id)
    .await;

    assert!(matches!(result, Err(ClinicServiceError::Forbidden)));
    assert_eq!(store.mappings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_unknown_mapping() {
    let store = MemStore::default();
    let result = DeleteMappingUseCase {
        patients: store.patient_repo(),
        mappings: store.mapping_repo(),
    }
    .execute(Uuid::now_v7(), Uuid::now_v7())
    .await;

    assert!(matches!(result, Err(ClinicServiceError::MappingNotFound)));
}
