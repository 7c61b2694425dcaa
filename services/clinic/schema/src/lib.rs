//! sea-orm entities for the clinic database.
//!
//! Relationship metadata lives here as static `Relation` / `Related`
//! declarations: a user owns patients, and patients and doctors are linked
//! many-to-many through `mappings`.

pub mod doctors;
pub mod mappings;
pub mod patients;
pub mod users;
