use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbDoctorRepository, DbMappingRepository, DbPatientRepository, DbUserRepository,
};
use crate::infra::password::Argon2PasswordHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn patient_repo(&self) -> DbPatientRepository {
        DbPatientRepository {
            db: self.db.clone(),
        }
    }

    pub fn doctor_repo(&self) -> DbDoctorRepository {
        DbDoctorRepository {
            db: self.db.clone(),
        }
    }

    pub fn mapping_repo(&self) -> DbMappingRepository {
        DbMappingRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher
    }
}
