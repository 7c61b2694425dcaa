use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use clinic_schema::{doctors, mappings, patients, users};

use crate::domain::repository::{
    DoctorRepository, MappingRepository, PatientRepository, UserRepository,
};
use crate::domain::types::{Doctor, Mapping, MappingDetail, Patient, User};
use crate::error::ClinicServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ClinicServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ClinicServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ClinicServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ClinicServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Patient repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPatientRepository {
    pub db: DatabaseConnection,
}

impl PatientRepository for DbPatientRepository {
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Patient>, ClinicServiceError> {
        let models = patients::Entity::find()
            .filter(patients::Column::UserId.eq(user_id))
            .order_by_asc(patients::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list patients by owner")?;
        Ok(models.into_iter().map(patient_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, ClinicServiceError> {
        let model = patients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find patient by id")?;
        Ok(model.map(patient_from_model))
    }

    async fn create(&self, patient: &Patient) -> Result<(), ClinicServiceError> {
        patient_to_active(patient)
            .insert(&self.db)
            .await
            .context("create patient")?;
        Ok(())
    }

    async fn update(&self, patient: &Patient) -> Result<(), ClinicServiceError> {
        patient_to_active(patient)
            .update(&self.db)
            .await
            .context("update patient")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let result = patients::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete patient")?;
        Ok(result.rows_affected > 0)
    }
}

fn patient_to_active(patient: &Patient) -> patients::ActiveModel {
    patients::ActiveModel {
        id: Set(patient.id),
        user_id: Set(patient.user_id),
        name: Set(patient.name.clone()),
        age: Set(patient.age),
        gender: Set(patient.gender.clone()),
        address: Set(patient.address.clone()),
        phone: Set(patient.phone.clone()),
        created_at: Set(patient.created_at),
        updated_at: Set(patient.updated_at),
    }
}

fn patient_from_model(model: patients::Model) -> Patient {
    Patient {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        age: model.age,
        gender: model.gender,
        address: model.address,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Doctor repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDoctorRepository {
    pub db: DatabaseConnection,
}

impl DoctorRepository for DbDoctorRepository {
    async fn list(&self) -> Result<Vec<Doctor>, ClinicServiceError> {
        let models = doctors::Entity::find()
            .order_by_asc(doctors::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list doctors")?;
        Ok(models.into_iter().map(doctor_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, ClinicServiceError> {
        let model = doctors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find doctor by id")?;
        Ok(model.map(doctor_from_model))
    }

    async fn create(&self, doctor: &Doctor) -> Result<(), ClinicServiceError> {
        doctor_to_active(doctor)
            .insert(&self.db)
            .await
            .context("create doctor")?;
        Ok(())
    }

    async fn update(&self, doctor: &Doctor) -> Result<(), ClinicServiceError> {
        doctor_to_active(doctor)
            .update(&self.db)
            .await
            .context("update doctor")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let result = doctors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete doctor")?;
        Ok(result.rows_affected > 0)
    }
}

fn doctor_to_active(doctor: &Doctor) -> doctors::ActiveModel {
    doctors::ActiveModel {
        id: Set(doctor.id),
        name: Set(doctor.name.clone()),
        specialization: Set(doctor.specialization.clone()),
        contact: Set(doctor.contact.clone()),
        created_at: Set(doctor.created_at),
        updated_at: Set(doctor.updated_at),
    }
}

fn doctor_from_model(model: doctors::Model) -> Doctor {
    Doctor {
        id: model.id,
        name: model.name,
        specialization: model.specialization,
        contact: model.contact,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Mapping repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMappingRepository {
    pub db: DatabaseConnection,
}

impl MappingRepository for DbMappingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mapping>, ClinicServiceError> {
        let model = mappings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find mapping by id")?;
        Ok(model.map(mapping_from_model))
    }

    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, ClinicServiceError> {
        let count = mappings::Entity::find()
            .filter(mappings::Column::PatientId.eq(patient_id))
            .filter(mappings::Column::DoctorId.eq(doctor_id))
            .count(&self.db)
            .await
            .context("check mapping exists")?;
        Ok(count > 0)
    }

    async fn create(&self, mapping: &Mapping) -> Result<(), ClinicServiceError> {
        let result = mappings::ActiveModel {
            id: Set(mapping.id),
            patient_id: Set(mapping.patient_id),
            doctor_id: Set(mapping.doctor_id),
            created_at: Set(mapping.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ClinicServiceError::MappingAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create mapping").into()),
        }
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<MappingDetail>, ClinicServiceError> {
        let owned: HashMap<Uuid, Patient> = patients::Entity::find()
            .filter(patients::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list owned patients for mappings")?
            .into_iter()
            .map(|m| (m.id, patient_from_model(m)))
            .collect();
        if owned.is_empty() {
            return Ok(Vec::new());
        }

        let rows = mappings::Entity::find()
            .inner_join(patients::Entity)
            .filter(patients::Column::UserId.eq(user_id))
            .order_by_asc(mappings::Column::CreatedAt)
            .find_also_related(doctors::Entity)
            .all(&self.db)
            .await
            .context("list mappings by owner")?;

        // Doctor is never absent here: the foreign key cascades on delete.
        Ok(rows
            .into_iter()
            .filter_map(|(mapping, doctor)| {
                let patient = owned.get(&mapping.patient_id)?.clone();
                Some(MappingDetail {
                    mapping: mapping_from_model(mapping),
                    patient,
                    doctor: doctor_from_model(doctor?),
                })
            })
            .collect())
    }

    async fn list_doctors_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Doctor>, ClinicServiceError> {
        let Some(patient) = patients::Entity::find_by_id(patient_id)
            .one(&self.db)
            .await
            .context("find patient for doctor list")?
        else {
            return Ok(Vec::new());
        };
        let models = patient
            .find_related(doctors::Entity)
            .order_by_asc(doctors::Column::Name)
            .all(&self.db)
            .await
            .context("list doctors for patient")?;
        Ok(models.into_iter().map(doctor_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClinicServiceError> {
        let result = mappings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete mapping")?;
        Ok(result.rows_affected > 0)
    }
}

fn mapping_from_model(model: mappings::Model) -> Mapping {
    Mapping {
        id: model.id,
        patient_id: model.patient_id,
        doctor_id: model.doctor_id,
        created_at: model.created_at,
    }
}
