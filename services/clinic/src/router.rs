use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use clinic_core::health::{healthz, readiness};
use clinic_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::gate::require_principal;
use crate::handlers::{
    auth::{login, register},
    doctor::{create_doctor, delete_doctor, get_doctor, list_doctors, update_doctor},
    mapping::{create_mapping, delete_mapping, list_doctors_for_patient, list_mappings},
    patient::{create_patient, delete_patient, get_patient, list_patients, update_patient},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping().await)
}

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Doctor directory reads
        .route("/api/doctors", get(list_doctors))
        .route("/api/doctors/{id}", get(get_doctor));

    let protected = Router::new()
        // Patients
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        // Doctor writes
        .route("/api/doctors", post(create_doctor))
        .route("/api/doctors/{id}", put(update_doctor).delete(delete_doctor))
        // Mappings; GET takes a patient id, DELETE a mapping id
        .route("/api/mappings", get(list_mappings).post(create_mapping))
        .route(
            "/api/mappings/{id}",
            get(list_doctors_for_patient).delete(delete_mapping),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_principal,
        ));

    public
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
