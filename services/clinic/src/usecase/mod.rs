pub mod auth;
pub mod doctor;
pub mod mapping;
pub mod patient;
